//! Compare candidate prioritization orderings of conformations against their actual
//! contribution to a partition function.

pub mod comparator;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use comparator::{
    ComparisonReport, RankError, compare_strategies, cumulative_contribution, rank, spearman,
    top_k_overlap,
};
pub use model::item::{Item, ItemId, ItemSet};
pub use model::ranking::Ranking;
pub use model::score_spec::ScoreSpec;
