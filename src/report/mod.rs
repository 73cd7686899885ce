pub mod json;
pub mod text;

use serde::Serialize;

use crate::comparator::{BestAtK, BestByCorrelation, CumulativeCheckpoint};
use crate::model::score_spec::ScoreSpec;
use crate::model::thresholds::{BoltzmannConfig, Verdict};
use crate::pipeline::stage4_bounds::{
    BoundColumns, BoundPosition, OrderCounts, OrderingPattern, PositionCounts,
};

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
    pub git_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub path: String,
    pub n_items: usize,
    pub id_column: Option<String>,
    pub label_column: Option<String>,
    pub scores: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverlapStat {
    pub k: usize,
    pub overlap: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategySummary {
    pub name: String,
    pub score: String,
    pub ascending: bool,
    pub spearman: f64,
    pub verdict: Verdict,
    pub top_share_percent: usize,
    pub top_share: f64,
    pub top_k: Vec<OverlapStat>,
    pub checkpoints: Vec<CumulativeCheckpoint>,
    /// First few ids under this ordering.
    pub head: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoltzmannSummary {
    pub energy_score: String,
    pub config: BoltzmannConfig,
    pub rt: f64,
    pub relative_weight_score: String,
    pub percent_contribution_score: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternCount {
    pub pattern: OrderingPattern,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundSummary {
    pub columns: BoundColumns,
    /// Derived `|first - second|` score, usable as a strategy.
    pub gap_score: String,
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
    pub dominant_position: BoundPosition,
    /// Most frequent first.
    pub patterns: Vec<PatternCount>,
    pub most_common_pattern: Option<PatternCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub ground_truth: ScoreSpec,
    pub total_contribution: f64,
    pub k_values: Vec<usize>,
    pub boltzmann: Option<BoltzmannSummary>,
    pub strategies: Vec<StrategySummary>,
    pub best_by_correlation: Option<BestByCorrelation>,
    pub best_by_top_k: Vec<BestAtK>,
    pub correlation_and_overlap_agree: bool,
    pub bounds: Option<BoundSummary>,
}

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
