pub mod item;
pub mod ranking;
pub mod score_spec;
pub mod thresholds;
