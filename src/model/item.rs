use std::collections::{BTreeMap, HashSet};

pub type ItemId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub label: Option<String>,
    pub scores: BTreeMap<String, f64>,
}

impl Item {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            label: None,
            scores: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_score(mut self, name: impl Into<String>, value: f64) -> Self {
        self.scores.insert(name.into(), value);
        self
    }

    /// Returns the score only when it is present and finite.
    pub fn score(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied().filter(|v| v.is_finite())
    }
}

/// Immutable collection of items with unique ids, kept in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSet {
    items: Vec<Item>,
}

impl ItemSet {
    /// Fails with the first duplicated id.
    pub fn new(items: Vec<Item>) -> Result<Self, ItemId> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(item.id);
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Score names present on every item, in sorted order.
    pub fn common_scores(&self) -> Vec<String> {
        let Some(first) = self.items.first() else {
            return Vec::new();
        };
        first
            .scores
            .keys()
            .filter(|name| self.items.iter().all(|item| item.score(name).is_some()))
            .cloned()
            .collect()
    }

    /// Builds a new set with extra scores attached; `extra` must be index-aligned with
    /// the items.
    pub(crate) fn with_extra_scores(&self, name: &str, extra: &[f64]) -> Self {
        let items = self
            .items
            .iter()
            .zip(extra)
            .map(|(item, &value)| item.clone().with_score(name, value))
            .collect();
        Self { items }
    }
}
