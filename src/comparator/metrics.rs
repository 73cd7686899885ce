use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::comparator::RankError;
use crate::model::item::ItemId;
use crate::model::ranking::Ranking;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopKOverlap {
    pub overlap: usize,
    pub k: usize,
}

impl TopKOverlap {
    pub fn percent(&self) -> f64 {
        if self.k == 0 {
            return 0.0;
        }
        self.overlap as f64 * 100.0 / self.k as f64
    }
}

/// Spearman rank correlation without tie correction:
/// `rho = 1 - 6 * sum(d^2) / (n * (n^2 - 1))`.
///
/// Returns `0.0` when fewer than two items are ranked.
pub fn spearman(a: &Ranking, b: &Ranking) -> Result<f64, RankError> {
    let (pos_a, pos_b) = checked_positions(a, b)?;
    let n = pos_a.len();
    if n < 2 {
        return Ok(0.0);
    }

    let mut sum_d2: u128 = 0;
    for (id, &ra) in &pos_a {
        let rb = pos_b[id];
        let d = ra.abs_diff(rb) as u128;
        sum_d2 += d * d;
    }

    let n = n as u128;
    let denom = n * (n * n - 1);
    Ok(1.0 - (6 * sum_d2) as f64 / denom as f64)
}

/// Size of the intersection of the two top-`k` sets. Order inside the sets is ignored.
pub fn top_k_overlap(a: &Ranking, b: &Ranking, k: usize) -> Result<TopKOverlap, RankError> {
    let (pos_a, _) = checked_positions(a, b)?;
    let n = pos_a.len();
    if k < 1 || k > n {
        return Err(RankError::InvalidK { k, n });
    }
    let top_a: HashSet<ItemId> = a.top(k).iter().copied().collect();
    let overlap = b.top(k).iter().filter(|id| top_a.contains(id)).count();
    Ok(TopKOverlap { overlap, k })
}

/// Prefix sums of `values` taken in ranking order. `values` must cover exactly the
/// ranked ids, which makes the last element the grand total for any ranking.
pub fn cumulative_contribution(
    ranking: &Ranking,
    values: &HashMap<ItemId, f64>,
) -> Result<Vec<f64>, RankError> {
    let positions = ranking.positions();
    if positions.len() != ranking.len() {
        return Err(RankError::MismatchedIdSets {
            detail: "ranking contains duplicate ids".to_string(),
        });
    }
    if values.len() != ranking.len() {
        return Err(RankError::MismatchedIdSets {
            detail: format!(
                "{} ranked ids but {} contribution values",
                ranking.len(),
                values.len()
            ),
        });
    }

    let mut out = Vec::with_capacity(ranking.len());
    let mut running = 0.0f64;
    for id in ranking.order() {
        let v = values
            .get(id)
            .ok_or_else(|| RankError::MismatchedIdSets {
                detail: format!("no contribution value for id {id}"),
            })?;
        running += v;
        out.push(running);
    }
    Ok(out)
}

fn checked_positions(
    a: &Ranking,
    b: &Ranking,
) -> Result<(HashMap<ItemId, usize>, HashMap<ItemId, usize>), RankError> {
    let pos_a = a.positions();
    let pos_b = b.positions();
    if pos_a.len() != a.len() || pos_b.len() != b.len() {
        return Err(RankError::MismatchedIdSets {
            detail: "ranking contains duplicate ids".to_string(),
        });
    }
    if pos_a.len() != pos_b.len() {
        return Err(RankError::MismatchedIdSets {
            detail: format!("{} ids vs {} ids", pos_a.len(), pos_b.len()),
        });
    }
    if let Some(id) = pos_a.keys().find(|id| !pos_b.contains_key(id)) {
        return Err(RankError::MismatchedIdSets {
            detail: format!("id {id} missing from second ranking"),
        });
    }
    Ok((pos_a, pos_b))
}

#[cfg(test)]
#[path = "../../tests/src_inline/comparator/metrics.rs"]
mod tests;
