use std::collections::HashMap;

use serde::Serialize;

use crate::model::item::ItemId;

/// Total order over item ids, rank 1 first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ranking {
    order: Vec<ItemId>,
}

impl Ranking {
    pub fn from_order(order: Vec<ItemId>) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &[ItemId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn top(&self, k: usize) -> &[ItemId] {
        &self.order[..k.min(self.order.len())]
    }

    /// id -> 1-based rank. Later duplicates overwrite earlier ones, so callers that need
    /// a permutation must compare the map size against `len()`.
    pub fn positions(&self) -> HashMap<ItemId, usize> {
        self.order
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx + 1))
            .collect()
    }

    pub fn reversed(&self) -> Self {
        Self {
            order: self.order.iter().rev().copied().collect(),
        }
    }
}
