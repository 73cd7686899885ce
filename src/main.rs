use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use kira_priorityqc::comparator::CompareConfig;
use kira_priorityqc::input::ItemSchema;
use kira_priorityqc::logging;
use kira_priorityqc::model::score_spec::ScoreSpec;
use kira_priorityqc::model::thresholds::{BoltzmannConfig, VerdictThresholds};
use kira_priorityqc::pipeline::stage4_bounds::BoundColumns;
use kira_priorityqc::pipeline::{PipelineConfig, run_pipeline};

#[derive(Debug, Parser)]
#[command(name = "kira-priorityqc", version)]
#[command(about = "Compare prioritization orderings against ground-truth contribution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank items under each strategy and write comparison reports
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// CSV or TSV table, optionally .gz
    #[arg(long)]
    input: PathBuf,
    /// Output directory
    #[arg(long)]
    out: PathBuf,
    /// Ground-truth score as NAME:asc|desc
    #[arg(long, default_value = "PercentContribution:desc")]
    ground_truth: ScoreSpec,
    /// Candidate strategy as NAME:asc|desc; repeatable
    #[arg(long = "strategy", required = true)]
    strategies: Vec<ScoreSpec>,
    #[arg(long, default_value = "MinimizeOrder", conflicts_with = "no_id_column")]
    id_column: String,
    /// Use 1-based row numbers as item ids
    #[arg(long)]
    no_id_column: bool,
    #[arg(long, default_value = "Conformation")]
    label_column: String,
    #[arg(long, value_delimiter = ',', default_value = "3,5,10,20")]
    top_k: Vec<usize>,
    /// Percent-of-items cut points for cumulative contribution
    #[arg(long, value_delimiter = ',', default_value = "10,25,50,75,100")]
    checkpoints: Vec<usize>,
    /// Derive Boltzmann-weighted contributions from this energy column
    #[arg(long)]
    boltzmann_energy: Option<String>,
    /// Temperature in Kelvin for Boltzmann weighting
    #[arg(long, default_value_t = 298.15)]
    temperature: f64,
    /// Bound audit columns as FIRST,SECOND,OBSERVED
    #[arg(long)]
    bounds: Option<BoundColumns>,
    #[arg(long, short)]
    verbose: bool,
}

impl RunArgs {
    fn into_config(self) -> Result<PipelineConfig, String> {
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(format!(
                "invalid --temperature {} (must be > 0)",
                self.temperature
            ));
        }
        let schema = ItemSchema {
            id_column: if self.no_id_column {
                None
            } else {
                Some(self.id_column)
            },
            label_column: Some(self.label_column),
        };
        Ok(PipelineConfig {
            input: self.input,
            out_dir: self.out,
            schema,
            ground_truth: self.ground_truth,
            strategies: self.strategies,
            compare: CompareConfig {
                top_k: self.top_k,
                checkpoints_percent: self.checkpoints,
            },
            thresholds: VerdictThresholds::default_v1(),
            boltzmann_energy: self.boltzmann_energy,
            boltzmann: BoltzmannConfig::room_temperature_v1().with_temperature(self.temperature),
            bounds: self.bounds,
        })
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            logging::init(args.verbose);
            let config = args.into_config()?;
            let report = run_pipeline(&config).map_err(|e| e.to_string())?;
            match &report.best_by_correlation {
                Some(best) => println!(
                    "best by correlation: {} (rho={:.4})",
                    best.strategies.join(", "),
                    best.rho
                ),
                None => println!("no strategies compared"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
