use serde::Serialize;

use crate::comparator::RankError;
use crate::comparator::metrics::{TopKOverlap, cumulative_contribution, spearman, top_k_overlap};
use crate::comparator::rank::{GroundTruth, rank};
use crate::model::item::ItemSet;
use crate::model::ranking::Ranking;
use crate::model::score_spec::ScoreSpec;

#[derive(Debug, Clone, Serialize)]
pub struct CompareConfig {
    pub top_k: Vec<usize>,
    pub checkpoints_percent: Vec<usize>,
}

impl CompareConfig {
    pub fn default_v1() -> Self {
        Self {
            top_k: vec![3, 5, 10, 20],
            checkpoints_percent: vec![10, 25, 50, 75, 100],
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::default_v1()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CumulativeCheckpoint {
    pub percent: usize,
    pub n_items: usize,
    pub captured: f64,
    /// `captured` as a percent of the ground-truth total.
    pub captured_share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub name: String,
    pub spec: ScoreSpec,
    pub ranking: Ranking,
    pub spearman: f64,
    pub top_k: Vec<TopKOverlap>,
    pub cumulative: Vec<f64>,
    pub checkpoints: Vec<CumulativeCheckpoint>,
}

impl StrategyReport {
    pub fn overlap_at(&self, k: usize) -> Option<TopKOverlap> {
        self.top_k.iter().find(|o| o.k == k).copied()
    }

    /// Share of the total captured by the first `max(1, n * percent / 100)` items.
    pub fn captured_share_at_percent(&self, percent: usize, total: f64) -> f64 {
        let n = self.cumulative.len();
        if n == 0 || total == 0.0 {
            return 0.0;
        }
        let count = checkpoint_count(percent, n);
        self.cumulative[count - 1] * 100.0 / total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestByCorrelation {
    pub strategies: Vec<String>,
    pub rho: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestAtK {
    pub k: usize,
    pub strategies: Vec<String>,
    pub overlap: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub n_items: usize,
    pub ground_truth: ScoreSpec,
    pub ground_truth_ranking: Ranking,
    pub ground_truth_cumulative: Vec<f64>,
    pub total_contribution: f64,
    pub k_values: Vec<usize>,
    pub strategies: Vec<StrategyReport>,
    pub best_by_correlation: Option<BestByCorrelation>,
    pub best_by_top_k: Vec<BestAtK>,
}

impl ComparisonReport {
    pub fn strategy(&self, name: &str) -> Option<&StrategyReport> {
        self.strategies.iter().find(|s| s.name == name)
    }

    /// True when one correlation winner also ties for the best overlap at every K.
    /// False when there is no correlation winner.
    pub fn agreement(&self) -> bool {
        let Some(best) = &self.best_by_correlation else {
            return false;
        };
        best.strategies.iter().any(|name| {
            self.best_by_top_k
                .iter()
                .all(|at_k| at_k.strategies.contains(name))
        })
    }
}

/// Clips each K to `n`, drops zero, and returns the sorted unique values.
pub fn resolve_k_values(requested: &[usize], n: usize) -> Vec<usize> {
    let mut out: Vec<usize> = requested
        .iter()
        .map(|&k| k.min(n))
        .filter(|&k| k > 0)
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Maps each percent to an item count of `max(1, n * p / 100)`, capped at `n`.
pub fn resolve_checkpoints(percents: &[usize], n: usize) -> Vec<(usize, usize)> {
    if n == 0 {
        return Vec::new();
    }
    percents
        .iter()
        .map(|&p| (p, checkpoint_count(p, n)))
        .collect()
}

fn checkpoint_count(percent: usize, n: usize) -> usize {
    (n.saturating_mul(percent.min(100)) / 100).clamp(1, n)
}

pub fn compare_strategies(
    items: &ItemSet,
    strategies: &[ScoreSpec],
    ground_truth: &ScoreSpec,
    config: &CompareConfig,
) -> Result<ComparisonReport, RankError> {
    let truth = GroundTruth::from_items(items, ground_truth)?;
    compare_against(items, strategies, &truth, config)
}

/// Same as [`compare_strategies`] for a ground truth the caller already built.
pub fn compare_against(
    items: &ItemSet,
    strategies: &[ScoreSpec],
    truth: &GroundTruth,
    config: &CompareConfig,
) -> Result<ComparisonReport, RankError> {
    let n = items.len();
    let ground_truth_cumulative = cumulative_contribution(&truth.ranking, truth.values())?;
    let total = ground_truth_cumulative.last().copied().unwrap_or(0.0);
    let k_values = resolve_k_values(&config.top_k, n);
    let checkpoint_counts = resolve_checkpoints(&config.checkpoints_percent, n);

    let mut reports = Vec::with_capacity(strategies.len());
    for spec in strategies {
        let ranking = rank(items, &spec.name, spec.ascending)?;
        let rho = spearman(&ranking, &truth.ranking)?;
        let top_k = k_values
            .iter()
            .map(|&k| top_k_overlap(&ranking, &truth.ranking, k))
            .collect::<Result<Vec<_>, _>>()?;
        let cumulative = cumulative_contribution(&ranking, truth.values())?;
        let checkpoints = checkpoint_counts
            .iter()
            .map(|&(percent, n_items)| {
                let captured = cumulative[n_items - 1];
                CumulativeCheckpoint {
                    percent,
                    n_items,
                    captured,
                    captured_share: share(captured, total),
                }
            })
            .collect();
        reports.push(StrategyReport {
            name: spec.to_string(),
            spec: spec.clone(),
            ranking,
            spearman: rho,
            top_k,
            cumulative,
            checkpoints,
        });
    }

    let best_by_correlation = best_by_correlation(&reports);
    let best_by_top_k = k_values
        .iter()
        .filter_map(|&k| best_at_k(&reports, k))
        .collect();

    Ok(ComparisonReport {
        n_items: n,
        ground_truth: truth.spec.clone(),
        ground_truth_ranking: truth.ranking.clone(),
        ground_truth_cumulative,
        total_contribution: total,
        k_values,
        strategies: reports,
        best_by_correlation,
        best_by_top_k,
    })
}

fn share(captured: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        captured * 100.0 / total
    }
}

fn best_by_correlation(reports: &[StrategyReport]) -> Option<BestByCorrelation> {
    let rho = reports
        .iter()
        .map(|r| r.spearman)
        .max_by(|a, b| a.total_cmp(b))?;
    let strategies = reports
        .iter()
        .filter(|r| r.spearman == rho)
        .map(|r| r.name.clone())
        .collect();
    Some(BestByCorrelation { strategies, rho })
}

fn best_at_k(reports: &[StrategyReport], k: usize) -> Option<BestAtK> {
    let overlap = reports
        .iter()
        .filter_map(|r| r.overlap_at(k))
        .map(|o| o.overlap)
        .max()?;
    let strategies = reports
        .iter()
        .filter(|r| r.overlap_at(k).is_some_and(|o| o.overlap == overlap))
        .map(|r| r.name.clone())
        .collect();
    Some(BestAtK {
        k,
        strategies,
        overlap,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/comparator/strategies.rs"]
mod tests;
