pub mod stage2_derive;
pub mod stage3_compare;
pub mod stage4_bounds;
pub mod stage5_report;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::comparator::{CompareConfig, ComparisonReport, RankError};
use crate::input::{InputError, ItemSchema, load_table};
use crate::model::score_spec::ScoreSpec;
use crate::model::thresholds::{BoltzmannConfig, VerdictThresholds};
use stage2_derive::derive_boltzmann;
use stage3_compare::{Stage3Inputs, run_stage3};
use stage4_bounds::{BoundColumns, audit_bounds, derive_bound_gap};
use stage5_report::{BoltzmannContext, Stage5Input, write_reports};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Rank(#[from] RankError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub schema: ItemSchema,
    pub ground_truth: ScoreSpec,
    pub strategies: Vec<ScoreSpec>,
    pub compare: CompareConfig,
    pub thresholds: VerdictThresholds,
    /// Energy score to convert into Boltzmann contributions before comparing.
    pub boltzmann_energy: Option<String>,
    pub boltzmann: BoltzmannConfig,
    pub bounds: Option<BoundColumns>,
}

pub fn run_pipeline(config: &PipelineConfig) -> Result<ComparisonReport, PipelineError> {
    let loaded = load_table(&config.input, &config.schema)?;

    let (items, derived) = match config.boltzmann_energy.as_deref() {
        Some(energy) => {
            let (items, names) = derive_boltzmann(&loaded, energy, &config.boltzmann)?;
            tracing::info!(
                energy,
                temperature = config.boltzmann.temperature,
                "added {} and {}",
                names.relative_weight,
                names.percent_contribution
            );
            (items, Some(names))
        }
        None => (loaded, None),
    };

    let items = match &config.bounds {
        Some(columns) => {
            let (items, gap) = derive_bound_gap(&items, columns)?;
            tracing::info!("added {gap}");
            items
        }
        None => items,
    };

    let stage3 = run_stage3(&Stage3Inputs {
        items: &items,
        strategies: &config.strategies,
        ground_truth: &config.ground_truth,
        config: &config.compare,
    })?;
    let comparison = stage3.report;
    let ground_truth = stage3.ground_truth;

    let bounds = match &config.bounds {
        Some(columns) => Some(audit_bounds(&items, columns)?),
        None => None,
    };

    let boltzmann = match (&config.boltzmann_energy, &derived) {
        (Some(energy), Some(names)) => Some(BoltzmannContext {
            energy_score: energy,
            config: &config.boltzmann,
            derived: names,
        }),
        _ => None,
    };

    let stage5 = Stage5Input {
        input_path: &config.input,
        schema: &config.schema,
        items: &items,
        ground_truth: &ground_truth,
        comparison: &comparison,
        bounds: bounds.as_ref(),
        boltzmann,
        thresholds: &config.thresholds,
        tool_name: "kira-priorityqc".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(Path::new(".")),
    };
    write_reports(&stage5, &config.out_dir)?;

    Ok(comparison)
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}
