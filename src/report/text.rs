use crate::model::thresholds::{Verdict, VerdictThresholds};
use crate::pipeline::stage4_bounds::BoundPosition;
use crate::report::{StrategySummary, SummaryData, format_f64_2, format_f64_4, percent_of};

pub fn render_report_text(data: &SummaryData, thresholds: &VerdictThresholds) -> String {
    let mut out = String::new();

    out.push_str("Prioritization vs Contribution Report\n");
    out.push_str("=====================================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Table: {}\n", data.input.path));
    out.push_str(&format!("Items: {}\n", data.input.n_items));
    out.push_str(&format!("Ground truth: {}\n", data.ground_truth));
    out.push_str(&format!(
        "Total contribution: {}\n",
        format_f64_4(data.total_contribution)
    ));
    if let Some(b) = &data.boltzmann {
        out.push_str(&format!(
            "Boltzmann weighting of {}: T={} K, RT={} kcal/mol\n",
            b.energy_score,
            format_f64_2(b.config.temperature),
            format_f64_4(b.rt)
        ));
    }
    out.push('\n');

    out.push_str("2. Strategies\n");
    if data.strategies.is_empty() {
        out.push_str("No candidate strategies.\n");
    }
    for s in &data.strategies {
        out.push_str(&format!(
            "{}: rho={} verdict={} top {}% share={}%\n",
            s.name,
            format_f64_4(s.spearman),
            verdict_label(s.verdict),
            s.top_share_percent,
            format_f64_2(s.top_share)
        ));
        if s.verdict == Verdict::Strong && s.spearman > thresholds.very_strong_rho {
            out.push_str("  Correlation is very strong.\n");
        }
        for o in &s.top_k {
            out.push_str(&format!(
                "  Top-{} overlap: {}/{} ({}%)\n",
                o.k,
                o.overlap,
                o.k,
                format_f64_2(o.percent)
            ));
        }
        for c in &s.checkpoints {
            out.push_str(&format!(
                "  First {:>3}% ({} items) capture {}% of total\n",
                c.percent,
                c.n_items,
                format_f64_2(c.captured_share)
            ));
        }
    }
    out.push('\n');

    out.push_str("3. Best strategy\n");
    match &data.best_by_correlation {
        Some(best) => out.push_str(&format!(
            "By correlation: {} (rho={})\n",
            best.strategies.join(", "),
            format_f64_4(best.rho)
        )),
        None => out.push_str("By correlation: n/a\n"),
    }
    for at_k in &data.best_by_top_k {
        out.push_str(&format!(
            "By top-{} overlap: {} ({}/{})\n",
            at_k.k,
            at_k.strategies.join(", "),
            at_k.overlap,
            at_k.k
        ));
    }
    out.push_str(&format!(
        "{}\n",
        agreement_statement(data.correlation_and_overlap_agree, &data.strategies)
    ));

    if let Some(b) = &data.bounds {
        out.push_str("\n4. Bound audit\n");
        out.push_str(&format!(
            "Observed {} vs bounds {} and {}\n",
            b.columns.observed, b.columns.first, b.columns.second
        ));
        out.push_str(&format!(
            "{} > {}: {} ({}%)\n",
            b.columns.first,
            b.columns.second,
            b.bound_order.first_greater,
            format_f64_2(percent_of(b.bound_order.first_greater, b.n_items))
        ));
        out.push_str(&format!(
            "{} = {}: {} ({}%)\n",
            b.columns.first,
            b.columns.second,
            b.bound_order.equal,
            format_f64_2(percent_of(b.bound_order.equal, b.n_items))
        ));
        out.push_str(&format!(
            "{} < {}: {} ({}%)\n",
            b.columns.first,
            b.columns.second,
            b.bound_order.first_less,
            format_f64_2(percent_of(b.bound_order.first_less, b.n_items))
        ));
        out.push_str(&format!(
            "Below both: {}  Between: {}  Above both: {}\n",
            b.positions.below, b.positions.between, b.positions.above
        ));
        out.push_str(&format!(
            "Mean distance to {}: {}  to {}: {}\n",
            b.columns.first,
            format_f64_4(b.mean_distance_first),
            b.columns.second,
            format_f64_4(b.mean_distance_second)
        ));
        out.push_str(&format!(
            "Closer to {}: {}  closer to {}: {}\n",
            b.columns.first, b.closer_to_first, b.columns.second, b.closer_to_second
        ));
        out.push_str(&format!(
            "Bound gap mean={} max={} min={}\n",
            format_f64_4(b.mean_gap),
            format_f64_4(b.max_gap),
            format_f64_4(b.min_gap)
        ));
        out.push_str(&format!(
            "{}\n",
            position_statement(b.dominant_position)
        ));
        out.push_str("Ordering patterns:\n");
        for p in &b.patterns {
            out.push_str(&format!(
                "  {}: {} ({}%)\n",
                p.label,
                p.count,
                format_f64_2(percent_of(p.count, b.n_items))
            ));
        }
        if let Some(p) = &b.most_common_pattern {
            out.push_str(&format!(
                "Most common ordering: {} ({}/{})\n",
                p.label, p.count, b.n_items
            ));
        }
        out.push_str(&format!(
            "Bound gap is available as strategy {}:desc\n",
            b.gap_score
        ));
    }

    out
}

fn verdict_label(v: Verdict) -> &'static str {
    match v {
        Verdict::Strong => "strong",
        Verdict::Moderate => "moderate",
        Verdict::Weak => "weak",
    }
}

fn agreement_statement(agree: bool, strategies: &[StrategySummary]) -> &'static str {
    if strategies.is_empty() {
        "No strategies to compare."
    } else if agree {
        "Correlation and top-K overlap pick the same strategy."
    } else {
        "Correlation and top-K overlap disagree on the best strategy."
    }
}

fn position_statement(p: BoundPosition) -> &'static str {
    match p {
        BoundPosition::Below => "Observed values mostly fall below both bounds.",
        BoundPosition::Between => "Observed values mostly fall between the bounds.",
        BoundPosition::Above => "Observed values are not mostly below or between the bounds.",
    }
}
