use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::comparator::RankError;
use crate::model::item::{ItemId, ItemSet};

const EQUAL_EPS: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundColumns {
    pub first: String,
    pub second: String,
    pub observed: String,
}

impl FromStr for BoundColumns {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [first, second, observed]
                if !first.is_empty() && !second.is_empty() && !observed.is_empty() =>
            {
                Ok(Self {
                    first: first.to_string(),
                    second: second.to_string(),
                    observed: observed.to_string(),
                })
            }
            _ => Err(format!(
                "bound columns '{s}' must look like FIRST,SECOND,OBSERVED"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundPosition {
    Below,
    Between,
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Closer {
    First,
    Second,
    Equal,
}

/// Strict ordering of (first, second, observed), smallest first. Any tie is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPattern {
    FirstSecondObserved,
    FirstObservedSecond,
    SecondFirstObserved,
    SecondObservedFirst,
    ObservedFirstSecond,
    ObservedSecondFirst,
    Other,
}

impl OrderingPattern {
    pub fn classify(first: f64, second: f64, observed: f64) -> Self {
        let (f, s, o) = (first, second, observed);
        if f < s && s < o {
            Self::FirstSecondObserved
        } else if f < o && o < s {
            Self::FirstObservedSecond
        } else if s < f && f < o {
            Self::SecondFirstObserved
        } else if s < o && o < f {
            Self::SecondObservedFirst
        } else if o < f && f < s {
            Self::ObservedFirstSecond
        } else if o < s && s < f {
            Self::ObservedSecondFirst
        } else {
            Self::Other
        }
    }

    /// Human-readable form using the audited column names, e.g. `Score < LowerBound < FinalEnergy`.
    pub fn label(&self, columns: &BoundColumns) -> String {
        let (a, b, c) = match self {
            Self::FirstSecondObserved => (&columns.first, &columns.second, &columns.observed),
            Self::FirstObservedSecond => (&columns.first, &columns.observed, &columns.second),
            Self::SecondFirstObserved => (&columns.second, &columns.first, &columns.observed),
            Self::SecondObservedFirst => (&columns.second, &columns.observed, &columns.first),
            Self::ObservedFirstSecond => (&columns.observed, &columns.first, &columns.second),
            Self::ObservedSecondFirst => (&columns.observed, &columns.second, &columns.first),
            Self::Other => return "other (ties)".to_string(),
        };
        format!("{a} < {b} < {c}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundRow {
    pub id: ItemId,
    pub first: f64,
    pub second: f64,
    pub observed: f64,
    pub position: BoundPosition,
    pub closer: Closer,
    pub pattern: OrderingPattern,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PositionCounts {
    pub below: usize,
    pub between: usize,
    pub above: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderCounts {
    pub first_greater: usize,
    pub equal: usize,
    pub first_less: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundAudit {
    pub columns: BoundColumns,
    pub n_items: usize,
    pub positions: PositionCounts,
    pub bound_order: OrderCounts,
    pub closer_to_first: usize,
    pub closer_to_second: usize,
    pub mean_distance_first: f64,
    pub mean_distance_second: f64,
    pub mean_gap: f64,
    pub max_gap: f64,
    pub min_gap: f64,
    pub patterns: BTreeMap<OrderingPattern, usize>,
    pub rows: Vec<BoundRow>,
}

impl BoundAudit {
    pub fn dominant_position(&self) -> BoundPosition {
        let p = &self.positions;
        if p.below * 2 > self.n_items {
            BoundPosition::Below
        } else if p.between * 2 > self.n_items {
            BoundPosition::Between
        } else {
            BoundPosition::Above
        }
    }

    /// Most frequent ordering; ties go to the earlier pattern.
    pub fn most_common_pattern(&self) -> Option<(OrderingPattern, usize)> {
        let mut best: Option<(OrderingPattern, usize)> = None;
        for (&pattern, &count) in &self.patterns {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((pattern, count));
            }
        }
        best
    }
}

/// Places an observed value relative to two bound estimates, item by item.
pub fn audit_bounds(items: &ItemSet, columns: &BoundColumns) -> Result<BoundAudit, RankError> {
    if items.is_empty() {
        return Err(RankError::EmptyInput {
            required: 1,
            actual: 0,
        });
    }

    let mut rows = Vec::with_capacity(items.len());
    let mut positions = PositionCounts::default();
    let mut bound_order = OrderCounts::default();
    let mut closer_to_first = 0usize;
    let mut closer_to_second = 0usize;
    let mut dist_first = 0.0f64;
    let mut dist_second = 0.0f64;
    let mut gaps = Vec::with_capacity(items.len());
    let mut patterns = BTreeMap::new();

    for item in items.items() {
        let get = |name: &str| {
            item.score(name).ok_or_else(|| RankError::InvalidScore {
                score: name.to_string(),
                item: item.id,
            })
        };
        let first = get(&columns.first)?;
        let second = get(&columns.second)?;
        let observed = get(&columns.observed)?;

        if (first - second).abs() < EQUAL_EPS {
            bound_order.equal += 1;
        } else if first > second {
            bound_order.first_greater += 1;
        } else {
            bound_order.first_less += 1;
        }

        let lo = first.min(second);
        let hi = first.max(second);
        let position = if observed < lo {
            positions.below += 1;
            BoundPosition::Below
        } else if observed > hi {
            positions.above += 1;
            BoundPosition::Above
        } else {
            positions.between += 1;
            BoundPosition::Between
        };

        let d_first = (observed - first).abs();
        let d_second = (observed - second).abs();
        dist_first += d_first;
        dist_second += d_second;
        let closer = if (d_first - d_second).abs() < EQUAL_EPS {
            Closer::Equal
        } else if d_first < d_second {
            closer_to_first += 1;
            Closer::First
        } else {
            closer_to_second += 1;
            Closer::Second
        };

        let pattern = OrderingPattern::classify(first, second, observed);
        *patterns.entry(pattern).or_insert(0usize) += 1;

        gaps.push((first - second).abs());
        rows.push(BoundRow {
            id: item.id,
            first,
            second,
            observed,
            position,
            closer,
            pattern,
        });
    }

    let n = rows.len() as f64;
    Ok(BoundAudit {
        columns: columns.clone(),
        n_items: rows.len(),
        positions,
        bound_order,
        closer_to_first,
        closer_to_second,
        mean_distance_first: dist_first / n,
        mean_distance_second: dist_second / n,
        mean_gap: gaps.iter().sum::<f64>() / n,
        max_gap: gaps.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min_gap: gaps.iter().copied().fold(f64::INFINITY, f64::min),
        patterns,
        rows,
    })
}

/// Name of the derived `|first - second|` score.
pub fn gap_score_name(columns: &BoundColumns) -> String {
    format!("{}_{}_gap", columns.first, columns.second)
}

/// Adds `|first - second|` as a score so the bound gap can be ranked like any other
/// column (largest gap first with `:desc`).
pub fn derive_bound_gap(
    items: &ItemSet,
    columns: &BoundColumns,
) -> Result<(ItemSet, String), RankError> {
    let mut gaps = Vec::with_capacity(items.len());
    for item in items.items() {
        let get = |name: &str| {
            item.score(name).ok_or_else(|| RankError::InvalidScore {
                score: name.to_string(),
                item: item.id,
            })
        };
        gaps.push((get(&columns.first)? - get(&columns.second)?).abs());
    }
    let name = gap_score_name(columns);
    Ok((items.with_extra_scores(&name, &gaps), name))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_bounds.rs"]
mod tests;
