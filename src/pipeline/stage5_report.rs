use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::comparator::{ComparisonReport, GroundTruth};
use crate::input::ItemSchema;
use crate::model::item::{ItemId, ItemSet};
use crate::model::thresholds::{BoltzmannConfig, VerdictThresholds};
use crate::pipeline::PipelineError;
use crate::pipeline::stage2_derive::DerivedScores;
use crate::pipeline::stage4_bounds::{BoundAudit, gap_score_name};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    BoltzmannSummary, BoundSummary, InputMeta, OverlapStat, PatternCount, StrategySummary,
    SummaryData, ToolMeta, format_f64_4,
};

const HEAD_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct BoltzmannContext<'a> {
    pub energy_score: &'a str,
    pub config: &'a BoltzmannConfig,
    pub derived: &'a DerivedScores,
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub input_path: &'a Path,
    pub schema: &'a ItemSchema,
    pub items: &'a ItemSet,
    pub ground_truth: &'a GroundTruth,
    pub comparison: &'a ComparisonReport,
    pub bounds: Option<&'a BoundAudit>,
    pub boltzmann: Option<BoltzmannContext<'a>>,
    pub thresholds: &'a VerdictThresholds,

    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(out_dir)?;

    let summary = build_summary(input);

    let summary_path = out_dir.join("summary.json");
    let json = render_summary_json(&summary)?;
    write_text(&summary_path, &json)?;

    let report_path = out_dir.join("report.txt");
    let report = render_report_text(&summary, input.thresholds);
    write_text(&report_path, &report)?;

    write_rankings_tsv(input, &out_dir.join("rankings.tsv"))?;
    write_cumulative_tsv(input, &out_dir.join("cumulative.tsv"))?;

    tracing::info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let cmp = input.comparison;
    let share_percent = input.thresholds.top_share_percent;

    let strategies = cmp
        .strategies
        .iter()
        .map(|s| {
            let top_share = s.captured_share_at_percent(share_percent, cmp.total_contribution);
            StrategySummary {
                name: s.name.clone(),
                score: s.spec.name.clone(),
                ascending: s.spec.ascending,
                spearman: s.spearman,
                verdict: input.thresholds.classify(s.spearman, top_share),
                top_share_percent: share_percent,
                top_share,
                top_k: s
                    .top_k
                    .iter()
                    .map(|o| OverlapStat {
                        k: o.k,
                        overlap: o.overlap,
                        percent: o.percent(),
                    })
                    .collect(),
                checkpoints: s.checkpoints.clone(),
                head: s.ranking.top(HEAD_LEN).to_vec(),
            }
        })
        .collect();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
            git_hash: input.git_hash.clone(),
        },
        input: InputMeta {
            path: input.input_path.display().to_string(),
            n_items: input.items.len(),
            id_column: input.schema.id_column.clone(),
            label_column: input.schema.label_column.clone(),
            scores: input.items.common_scores(),
        },
        ground_truth: cmp.ground_truth.clone(),
        total_contribution: cmp.total_contribution,
        k_values: cmp.k_values.clone(),
        boltzmann: input.boltzmann.as_ref().map(|b| BoltzmannSummary {
            energy_score: b.energy_score.to_string(),
            config: *b.config,
            rt: b.config.rt(),
            relative_weight_score: b.derived.relative_weight.clone(),
            percent_contribution_score: b.derived.percent_contribution.clone(),
        }),
        strategies,
        best_by_correlation: cmp.best_by_correlation.clone(),
        best_by_top_k: cmp.best_by_top_k.clone(),
        correlation_and_overlap_agree: cmp.agreement(),
        bounds: input.bounds.map(|b| BoundSummary {
            columns: b.columns.clone(),
            gap_score: gap_score_name(&b.columns),
            n_items: b.n_items,
            positions: b.positions.clone(),
            bound_order: b.bound_order.clone(),
            closer_to_first: b.closer_to_first,
            closer_to_second: b.closer_to_second,
            mean_distance_first: b.mean_distance_first,
            mean_distance_second: b.mean_distance_second,
            mean_gap: b.mean_gap,
            max_gap: b.max_gap,
            min_gap: b.min_gap,
            dominant_position: b.dominant_position(),
            patterns: pattern_counts(b),
            most_common_pattern: b.most_common_pattern().map(|(pattern, count)| PatternCount {
                pattern,
                label: pattern.label(&b.columns),
                count,
            }),
        }),
    }
}

fn pattern_counts(audit: &BoundAudit) -> Vec<PatternCount> {
    let mut out: Vec<PatternCount> = audit
        .patterns
        .iter()
        .map(|(&pattern, &count)| PatternCount {
            pattern,
            label: pattern.label(&audit.columns),
            count,
        })
        .collect();
    // stable: equal counts keep pattern order
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

fn write_rankings_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let cmp = input.comparison;

    let mut header = vec![
        "id".to_string(),
        "label".to_string(),
        "ground_truth_value".to_string(),
        "ground_truth_rank".to_string(),
    ];
    for s in &cmp.strategies {
        header.push(format!("rank_{}", s.name));
    }
    writeln!(w, "{}", header.join("\t"))?;

    let positions: Vec<HashMap<ItemId, usize>> =
        cmp.strategies.iter().map(|s| s.ranking.positions()).collect();

    for &id in input.ground_truth.ranking.order() {
        let label = input
            .items
            .get(id)
            .and_then(|item| item.label.as_deref())
            .map(sanitize_field)
            .unwrap_or_default();
        let mut row = vec![
            id.to_string(),
            label,
            input
                .ground_truth
                .value(id)
                .map(format_f64_4)
                .unwrap_or_default(),
            input
                .ground_truth
                .rank_of(id)
                .map(|r| r.to_string())
                .unwrap_or_default(),
        ];
        for pos in &positions {
            row.push(pos.get(&id).map(|r| r.to_string()).unwrap_or_default());
        }
        writeln!(w, "{}", row.join("\t"))?;
    }

    w.flush()?;
    Ok(())
}

fn write_cumulative_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let cmp = input.comparison;

    let mut header = vec!["n_items".to_string(), "ground_truth".to_string()];
    for s in &cmp.strategies {
        header.push(s.name.clone());
    }
    writeln!(w, "{}", header.join("\t"))?;

    for (idx, truth) in cmp.ground_truth_cumulative.iter().enumerate() {
        let mut row = vec![(idx + 1).to_string(), format_f64_4(*truth)];
        for s in &cmp.strategies {
            row.push(
                s.cumulative
                    .get(idx)
                    .map(|v| format_f64_4(*v))
                    .unwrap_or_default(),
            );
        }
        writeln!(w, "{}", row.join("\t"))?;
    }

    w.flush()?;
    Ok(())
}

fn sanitize_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
