//! Text (terminal) reporter
//!
//! Prints one titled list per rule, then the skipped/failed artifact count.
//! Styling goes through `console`, which drops colors when stdout is not a
//! terminal.

use super::AnalysisReport;
use anyhow::Result;
use console::style;
use std::fmt::Write;

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "\n{}", style("smellgraph analysis").bold())?;
    writeln!(out, "{}", style("──────────────────────────────────────").dim())?;
    writeln!(
        out,
        "Root: {}  Classes: {}  Methods: {}  Findings: {}\n",
        report.root,
        report.classes,
        report.methods,
        report.total_findings()
    )?;

    for smell in &report.smells {
        let heading = format!("{} ({})", smell.title, smell.findings.len());
        if smell.findings.is_empty() {
            writeln!(out, "{}", style(heading).bold().dim())?;
        } else {
            writeln!(out, "{}", style(heading).bold().yellow())?;
        }

        if smell.disabled {
            writeln!(out, "  {}", style("(disabled)").dim())?;
        } else if let Some(err) = &smell.error {
            writeln!(out, "  {} {}", style("detector failed:").red(), err)?;
        }
        for finding in &smell.findings {
            writeln!(out, "  {}", finding)?;
        }
    }

    writeln!(
        out,
        "\nSkipped/failed artifacts: {} ({} skipped, {} failed)",
        style(report.skipped_or_failed()).bold(),
        report.skipped,
        report.failed.len()
    )?;
    for failure in &report.failed {
        writeln!(out, "  {} {}: {}", style("✗").red(), failure.path, failure.error)?;
    }

    Ok(out)
}
