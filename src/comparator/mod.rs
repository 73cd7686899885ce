//! Rank-correlation comparison of candidate prioritization orderings against a
//! ground-truth contribution ranking. Every function here is pure: no I/O, no logging.

pub mod metrics;
pub mod rank;
pub mod strategies;

use thiserror::Error;

use crate::model::item::ItemId;

pub use metrics::{TopKOverlap, cumulative_contribution, spearman, top_k_overlap};
pub use rank::{GroundTruth, rank};
pub use strategies::{
    BestAtK, BestByCorrelation, CompareConfig, ComparisonReport, CumulativeCheckpoint,
    StrategyReport, compare_against, compare_strategies, resolve_checkpoints, resolve_k_values,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RankError {
    #[error("score '{score}' is missing or non-finite on item {item}")]
    InvalidScore { score: String, item: ItemId },
    #[error("operation needs at least {required} item(s), got {actual}")]
    EmptyInput { required: usize, actual: usize },
    #[error("rankings do not cover the same id set: {detail}")]
    MismatchedIdSets { detail: String },
    #[error("top-K value {k} is outside [1, {n}]")]
    InvalidK { k: usize, n: usize },
}
