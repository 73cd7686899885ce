use crate::comparator::{CompareConfig, ComparisonReport, GroundTruth, RankError, compare_against};
use crate::model::item::ItemSet;
use crate::model::score_spec::ScoreSpec;

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub items: &'a ItemSet,
    pub strategies: &'a [ScoreSpec],
    pub ground_truth: &'a ScoreSpec,
    pub config: &'a CompareConfig,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub ground_truth: GroundTruth,
    pub report: ComparisonReport,
}

pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> Result<Stage3Output, RankError> {
    if inputs.strategies.is_empty() {
        tracing::warn!("no candidate strategies given; report will only hold ground truth");
    }
    if inputs.items.len() < 2 {
        tracing::warn!(
            n_items = inputs.items.len(),
            "fewer than two items; Spearman correlation is reported as 0"
        );
    }

    let ground_truth = GroundTruth::from_items(inputs.items, inputs.ground_truth)?;
    let report = compare_against(
        inputs.items,
        inputs.strategies,
        &ground_truth,
        inputs.config,
    )?;

    for strategy in &report.strategies {
        tracing::info!(
            strategy = %strategy.name,
            rho = strategy.spearman,
            "strategy vs {}",
            report.ground_truth
        );
    }
    if !report.agreement() && !report.strategies.is_empty() {
        tracing::info!("best strategy by correlation differs from best by top-K overlap");
    }

    Ok(Stage3Output {
        ground_truth,
        report,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_compare.rs"]
mod tests;
