use super::*;

fn ranking(ids: &[u64]) -> Ranking {
    Ranking::from_order(ids.to_vec())
}

#[test]
fn test_spearman_self_is_one() {
    let a = ranking(&[3, 1, 4, 2, 5]);
    assert_eq!(spearman(&a, &a).unwrap(), 1.0);
}

#[test]
fn test_spearman_reverse_is_minus_one() {
    let a = ranking(&[1, 2, 3, 4]);
    let b = ranking(&[4, 3, 2, 1]);
    assert_eq!(spearman(&a, &b).unwrap(), -1.0);

    let c = ranking(&[7, 2, 9, 4, 5, 1, 8]);
    assert_eq!(spearman(&c, &c.reversed()).unwrap(), -1.0);
}

#[test]
fn test_spearman_is_symmetric() {
    let a = ranking(&[1, 2, 3, 4, 5, 6]);
    let b = ranking(&[2, 1, 5, 3, 6, 4]);
    assert_eq!(spearman(&a, &b).unwrap(), spearman(&b, &a).unwrap());
}

#[test]
fn test_spearman_known_value() {
    // d = [1, -1, 0, 0] -> sum d^2 = 2 -> 1 - 12 / 60 = 0.8
    let a = ranking(&[1, 2, 3, 4]);
    let b = ranking(&[2, 1, 3, 4]);
    let rho = spearman(&a, &b).unwrap();
    assert!((rho - 0.8).abs() < 1e-12);
}

#[test]
fn test_spearman_single_item_is_zero() {
    let a = ranking(&[42]);
    assert_eq!(spearman(&a, &a).unwrap(), 0.0);
    assert_eq!(spearman(&ranking(&[]), &ranking(&[])).unwrap(), 0.0);
}

#[test]
fn test_spearman_mismatched_ids() {
    let a = ranking(&[1, 2, 3]);
    let b = ranking(&[1, 2, 4]);
    assert!(matches!(
        spearman(&a, &b),
        Err(RankError::MismatchedIdSets { .. })
    ));

    let short = ranking(&[1, 2]);
    assert!(matches!(
        spearman(&a, &short),
        Err(RankError::MismatchedIdSets { .. })
    ));

    let dup = ranking(&[1, 1, 2]);
    assert!(matches!(
        spearman(&dup, &a),
        Err(RankError::MismatchedIdSets { .. })
    ));
}

#[test]
fn test_top_k_overlap_basic() {
    let a = ranking(&[1, 2, 3, 4, 5]);
    let b = ranking(&[3, 1, 5, 2, 4]);
    assert_eq!(top_k_overlap(&a, &b, 1).unwrap().overlap, 0);
    assert_eq!(top_k_overlap(&a, &b, 2).unwrap().overlap, 1);
    let o = top_k_overlap(&a, &b, 3).unwrap();
    assert_eq!(o, TopKOverlap { overlap: 2, k: 3 });
    assert_eq!(top_k_overlap(&a, &b, 5).unwrap().overlap, 5);
}

#[test]
fn test_top_k_overlap_self_and_symmetry() {
    let a = ranking(&[5, 4, 3, 2, 1, 6]);
    let b = ranking(&[1, 6, 2, 5, 3, 4]);
    for k in 1..=6 {
        assert_eq!(top_k_overlap(&a, &a, k).unwrap().overlap, k);
        assert_eq!(
            top_k_overlap(&a, &b, k).unwrap(),
            top_k_overlap(&b, &a, k).unwrap()
        );
    }
}

#[test]
fn test_top_k_ignores_order_inside_set() {
    let a = ranking(&[1, 2, 3, 4]);
    let b = ranking(&[3, 2, 1, 4]);
    assert_eq!(top_k_overlap(&a, &b, 3).unwrap().overlap, 3);
    assert!(spearman(&a, &b).unwrap() < 1.0);
}

#[test]
fn test_top_k_invalid_k() {
    let a = ranking(&[1, 2, 3]);
    assert_eq!(
        top_k_overlap(&a, &a, 0),
        Err(RankError::InvalidK { k: 0, n: 3 })
    );
    assert_eq!(
        top_k_overlap(&a, &a, 4),
        Err(RankError::InvalidK { k: 4, n: 3 })
    );
}

#[test]
fn test_top_k_percent() {
    let o = TopKOverlap { overlap: 3, k: 4 };
    assert_eq!(o.percent(), 75.0);
}

#[test]
fn test_cumulative_contribution_prefix_sums() {
    let values: HashMap<u64, f64> = [(1, 50.0), (2, 20.0), (3, 15.0), (4, 10.0), (5, 5.0)]
        .into_iter()
        .collect();
    let c = cumulative_contribution(&ranking(&[1, 2, 3, 4, 5]), &values).unwrap();
    assert_eq!(c, vec![50.0, 70.0, 85.0, 95.0, 100.0]);

    let r = cumulative_contribution(&ranking(&[5, 4, 3, 2, 1]), &values).unwrap();
    assert_eq!(r, vec![5.0, 15.0, 30.0, 50.0, 100.0]);
}

#[test]
fn test_cumulative_total_is_order_independent() {
    let values: HashMap<u64, f64> = [(10, 0.25), (20, 3.5), (30, 1.0), (40, 0.125)]
        .into_iter()
        .collect();
    let total: f64 = values.values().sum();
    for order in [[10, 20, 30, 40], [40, 30, 20, 10], [20, 40, 10, 30]] {
        let c = cumulative_contribution(&ranking(&order), &values).unwrap();
        assert_eq!(c.len(), 4);
        assert!((c[3] - total).abs() < 1e-12);
        assert!(c.windows(2).all(|w| w[1] >= w[0]));
    }
}

#[test]
fn test_cumulative_missing_value() {
    let values: HashMap<u64, f64> = [(1, 1.0), (2, 2.0)].into_iter().collect();
    assert!(matches!(
        cumulative_contribution(&ranking(&[1, 3]), &values),
        Err(RankError::MismatchedIdSets { .. })
    ));
    assert!(matches!(
        cumulative_contribution(&ranking(&[1]), &values),
        Err(RankError::MismatchedIdSets { .. })
    ));
}
