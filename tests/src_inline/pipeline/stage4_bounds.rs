use super::*;
use crate::model::item::Item;

fn bound_items(rows: &[(f64, f64, f64)]) -> ItemSet {
    ItemSet::new(
        rows.iter()
            .enumerate()
            .map(|(i, &(score, lower, fin))| {
                Item::new(i as u64 + 1)
                    .with_score("Score", score)
                    .with_score("LowerBound", lower)
                    .with_score("FinalEnergy", fin)
            })
            .collect(),
    )
    .unwrap()
}

fn columns() -> BoundColumns {
    "Score,LowerBound,FinalEnergy".parse().unwrap()
}

#[test]
fn test_parse_bound_columns() {
    let c = columns();
    assert_eq!(c.first, "Score");
    assert_eq!(c.second, "LowerBound");
    assert_eq!(c.observed, "FinalEnergy");
    assert!("Score,LowerBound".parse::<BoundColumns>().is_err());
    assert!("a,,c".parse::<BoundColumns>().is_err());
}

#[test]
fn test_audit_positions_and_distances() {
    let items = bound_items(&[
        (-10.0, -12.0, -13.0), // below, closer to LowerBound
        (-10.0, -12.0, -10.5), // between, closer to Score
        (-10.0, -12.0, -9.0),  // above, closer to Score
        (-5.0, -5.0, -5.0),    // equal bounds, between, equidistant
    ]);
    let audit = audit_bounds(&items, &columns()).unwrap();

    assert_eq!(audit.n_items, 4);
    assert_eq!(
        audit.positions,
        PositionCounts {
            below: 1,
            between: 2,
            above: 1,
        }
    );
    assert_eq!(
        audit.bound_order,
        OrderCounts {
            first_greater: 3,
            equal: 1,
            first_less: 0,
        }
    );
    assert_eq!(audit.closer_to_first, 2);
    assert_eq!(audit.closer_to_second, 1);
    assert_eq!(audit.rows[0].position, BoundPosition::Below);
    assert_eq!(audit.rows[0].closer, Closer::Second);
    assert_eq!(audit.rows[3].closer, Closer::Equal);

    // |obs - Score|: 3.0, 0.5, 1.0, 0.0
    assert!((audit.mean_distance_first - 1.125).abs() < 1e-12);
    // |obs - LowerBound|: 1.0, 1.5, 3.0, 0.0
    assert!((audit.mean_distance_second - 1.375).abs() < 1e-12);
    assert_eq!(audit.max_gap, 2.0);
    assert_eq!(audit.min_gap, 0.0);
    assert!((audit.mean_gap - 1.5).abs() < 1e-12);
    assert_eq!(audit.dominant_position(), BoundPosition::Above);
}

#[test]
fn test_dominant_between() {
    let items = bound_items(&[(0.0, -2.0, -1.0), (0.0, -2.0, -0.5), (0.0, -2.0, 1.0)]);
    let audit = audit_bounds(&items, &columns()).unwrap();
    assert_eq!(audit.dominant_position(), BoundPosition::Between);
}

#[test]
fn test_audit_missing_column() {
    let items = bound_items(&[(0.0, 0.0, 0.0)]);
    let cols: BoundColumns = "Score,Upper,FinalEnergy".parse().unwrap();
    assert!(matches!(
        audit_bounds(&items, &cols),
        Err(RankError::InvalidScore { ref score, .. }) if score == "Upper"
    ));
}

#[test]
fn test_near_equal_distances_are_equidistant() {
    // |0.2 - 0.1| and |0.2 - 0.3| differ only by float rounding
    let items = bound_items(&[(0.1, 0.3, 0.2)]);
    let audit = audit_bounds(&items, &columns()).unwrap();
    assert_eq!(audit.rows[0].closer, Closer::Equal);
    assert_eq!(audit.closer_to_first, 0);
    assert_eq!(audit.closer_to_second, 0);
}

#[test]
fn test_ordering_patterns() {
    let items = bound_items(&[
        (-10.0, -12.0, -13.0), // observed < second < first
        (-10.0, -12.0, -10.5), // second < observed < first
        (-10.0, -12.0, -11.0), // second < observed < first
        (-10.0, -12.0, -9.0),  // second < first < observed
        (-5.0, -5.0, -5.0),    // ties
    ]);
    let audit = audit_bounds(&items, &columns()).unwrap();

    assert_eq!(audit.patterns.len(), 4);
    assert_eq!(audit.patterns[&OrderingPattern::SecondObservedFirst], 2);
    assert_eq!(audit.patterns[&OrderingPattern::ObservedSecondFirst], 1);
    assert_eq!(audit.patterns[&OrderingPattern::SecondFirstObserved], 1);
    assert_eq!(audit.patterns[&OrderingPattern::Other], 1);
    assert_eq!(audit.rows[0].pattern, OrderingPattern::ObservedSecondFirst);
    assert_eq!(
        audit.most_common_pattern(),
        Some((OrderingPattern::SecondObservedFirst, 2))
    );
    assert_eq!(
        OrderingPattern::SecondObservedFirst.label(&columns()),
        "LowerBound < FinalEnergy < Score"
    );
}

#[test]
fn test_derive_bound_gap_ranks_largest_gap_first() {
    let items = bound_items(&[(-10.0, -10.5, 0.0), (-10.0, -13.0, 0.0), (-8.0, -9.0, 0.0)]);
    let (with_gap, name) = derive_bound_gap(&items, &columns()).unwrap();
    assert_eq!(name, "Score_LowerBound_gap");
    assert_eq!(with_gap.get(2).and_then(|item| item.score(&name)), Some(3.0));

    let ranking = crate::comparator::rank(&with_gap, &name, false).unwrap();
    assert_eq!(ranking.order(), &[2, 3, 1]);
}

#[test]
fn test_derive_bound_gap_missing_column() {
    let items = ItemSet::new(vec![Item::new(1).with_score("Score", 1.0)]).unwrap();
    assert!(matches!(
        derive_bound_gap(&items, &columns()),
        Err(RankError::InvalidScore { ref score, .. }) if score == "LowerBound"
    ));
}
