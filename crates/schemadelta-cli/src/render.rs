//! Report renderers
//!
//! Rendering is a stateless projection of a saved report. The compare and
//! render commands share these functions, so a report re-rendered later
//! matches what the original run printed.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use schemadelta_core::Report;

/// Stdout rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with colors
    Text,

    /// The report object as pretty-printed JSON
    Json,

    /// One record per discrepancy
    Csv,
}

/// Render a report in the requested format
///
/// The returned string carries no trailing newline.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => Ok(report.to_json()?),
        OutputFormat::Csv => render_csv(report),
    }
}

/// Colored summary plus one line per discrepancy, in report order
fn render_text(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "=".repeat(60).bright_blue()));
    out.push_str(&format!(
        "{}\n",
        "Schema Comparison Report".bold().bright_blue()
    ));
    out.push_str(&format!("{}\n", "=".repeat(60).bright_blue()));
    out.push('\n');

    out.push_str(&format!("Version:   {}\n", report.version));
    out.push_str(&format!("Generated: {}\n", report.generated_at));
    out.push_str(&format!("Baseline:  {}\n", report.baseline_env));
    out.push_str(&format!("Target:    {}\n", report.target_env));
    out.push('\n');

    out.push_str(&format!("{}\n", "Summary:".bold()));
    out.push_str(&format!(
        "  Tables compared:  {}\n",
        report.summary.tables_compared
    ));
    out.push_str(&format!(
        "  Columns compared: {}\n",
        report.summary.columns_compared
    ));

    if report.summary.total > 0 {
        out.push_str(&format!(
            "  Discrepancies:    {}\n",
            report.summary.total.to_string().red().bold()
        ));
        for (kind, count) in &report.summary.by_kind {
            out.push_str(&format!("    {:<20} {}\n", kind, count));
        }
    } else {
        out.push_str(&format!(
            "  Discrepancies:    {}\n",
            report.summary.total.to_string().green()
        ));
    }
    out.push('\n');

    if report.is_match() {
        out.push_str(&format!("{}\n", "✓ Schemas match!".green().bold()));
    } else {
        out.push_str(&format!("{}\n", "Discrepancies:".bold()));
        for discrepancy in &report.discrepancies {
            let kind = if discrepancy.kind.is_mismatch() {
                discrepancy.kind.as_str().yellow()
            } else {
                discrepancy.kind.as_str().red()
            };

            out.push_str(&format!("  [{}] {}", kind, discrepancy.table_name));
            if let Some(column) = &discrepancy.column_name {
                out.push_str(&format!(".{}", column));
            }
            if discrepancy.kind.is_mismatch() {
                out.push_str(&format!(
                    ": baseline {}, target {}",
                    discrepancy.baseline.as_deref().unwrap_or("(none)"),
                    discrepancy.target.as_deref().unwrap_or("(none)"),
                ));
            }
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(&format!("{}", "=".repeat(60).bright_blue()));

    out
}

/// Header plus one record per discrepancy
fn render_csv(report: &Report) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["kind", "table", "column", "baseline", "target"])?;

    for discrepancy in &report.discrepancies {
        writer.write_record([
            discrepancy.kind.as_str(),
            discrepancy.table_name.as_str(),
            discrepancy.column_name.as_deref().unwrap_or(""),
            discrepancy.baseline.as_deref().unwrap_or(""),
            discrepancy.target.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?.trim_end().to_string())
}
