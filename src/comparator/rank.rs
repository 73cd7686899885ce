use std::collections::HashMap;

use crate::comparator::RankError;
use crate::model::item::{ItemId, ItemSet};
use crate::model::ranking::Ranking;
use crate::model::score_spec::ScoreSpec;

/// Stable sort of the items by one score. Ties keep input order.
pub fn rank(items: &ItemSet, score_name: &str, ascending: bool) -> Result<Ranking, RankError> {
    if items.is_empty() {
        return Err(RankError::EmptyInput {
            required: 1,
            actual: 0,
        });
    }

    let mut keyed = Vec::with_capacity(items.len());
    for item in items.items() {
        let value = item.score(score_name).ok_or_else(|| RankError::InvalidScore {
            score: score_name.to_string(),
            item: item.id,
        })?;
        keyed.push((item.id, value));
    }

    // slice::sort_by is stable; total_cmp is safe since non-finite values were rejected.
    if ascending {
        keyed.sort_by(|a, b| a.1.total_cmp(&b.1));
    } else {
        keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
    }

    Ok(Ranking::from_order(
        keyed.into_iter().map(|(id, _)| id).collect(),
    ))
}

/// Reference ordering by actual importance plus per-id value and rank.
#[derive(Debug, Clone)]
pub struct GroundTruth {
    pub spec: ScoreSpec,
    pub ranking: Ranking,
    values: HashMap<ItemId, f64>,
    ranks: HashMap<ItemId, usize>,
}

impl GroundTruth {
    pub fn from_items(items: &ItemSet, spec: &ScoreSpec) -> Result<Self, RankError> {
        let ranking = rank(items, &spec.name, spec.ascending)?;
        let values = items
            .items()
            .iter()
            .filter_map(|item| item.score(&spec.name).map(|v| (item.id, v)))
            .collect();
        let ranks = ranking.positions();
        Ok(Self {
            spec: spec.clone(),
            ranking,
            values,
            ranks,
        })
    }

    pub fn value(&self, id: ItemId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn rank_of(&self, id: ItemId) -> Option<usize> {
        self.ranks.get(&id).copied()
    }

    pub fn values(&self) -> &HashMap<ItemId, f64> {
        &self.values
    }

    pub fn total(&self) -> f64 {
        self.ranking
            .order()
            .iter()
            .filter_map(|id| self.values.get(id))
            .sum()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/comparator/rank.rs"]
mod tests;
