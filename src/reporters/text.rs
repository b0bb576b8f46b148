//! Text (terminal) reporter

use crate::models::{MetricFamily, MethodSpan, ReadabilityReport, READABILITY_KEY};
use console::style;

const RULE: &str = "──────────────────────────────────────";

/// Render report as one table per family, readability score first
pub fn render(report: &ReadabilityReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", style("Readability Analysis").bold()));
    out.push_str(&format!("{}\n", style(RULE).dim()));

    out.push_str(&format!("{}\n", style("SCORES").bold()));
    for family in MetricFamily::ALL {
        out.push_str(&format!(
            "  {:<12} {}\n",
            family.to_string(),
            format_score(report.metrics.readability(family))
        ));
    }
    out.push('\n');

    for (family, metrics) in report.metrics.iter() {
        let count = metrics.keys().filter(|id| *id != READABILITY_KEY).count();
        out.push_str(&format!(
            "{} ({} metrics)\n",
            style(family.to_string().to_uppercase()).bold(),
            count
        ));
        for (id, value) in metrics.iter().filter(|(id, _)| *id != READABILITY_KEY) {
            out.push_str(&format!("  {:<48} {}\n", id, format_value(*value)));
        }
        out.push('\n');
    }

    for error in &report.errors {
        out.push_str(&format!("{} {}\n", style("✗").red(), error));
    }

    out
}

/// Render spans with their line ranges (1-based)
pub fn render_spans(spans: &[MethodSpan]) -> String {
    let mut out = String::new();
    for (i, span) in spans.iter().enumerate() {
        out.push_str(&format!(
            "{} {}\n",
            style(format!("#{}", i + 1)).bold(),
            style(format!(
                "lines {}-{} ({} lines)",
                span.start_line + 1,
                span.end_line + 1,
                span.line_count()
            ))
            .dim()
        ));
        out.push_str(&span.text);
        out.push_str("\n\n");
    }
    out
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => style("n/a").dim().to_string(),
    }
}

fn format_score(score: Option<f64>) -> String {
    let Some(score) = score else {
        return style("n/a").dim().to_string();
    };
    let text = format!("{score:.4}");
    if score >= 0.6 {
        style(text).green().to_string()
    } else if score >= 0.4 {
        style(text).yellow().to_string()
    } else {
        style(text).red().to_string()
    }
}
