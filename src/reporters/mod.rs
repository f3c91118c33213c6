//! Output reporters for smellgraph analysis results
//!
//! Supports two output formats:
//! - `text` - Terminal output, one titled list per rule
//! - `json` - Machine-readable JSON
//!
//! The `json` module also owns the interchange document, the exported
//! class model that a later run can analyse without the original artifacts.

pub mod json;
mod text;

use crate::detectors::DetectorResult;
use crate::models::SystemModel;
use anyhow::{anyhow, Result};
use serde::Serialize;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One rule's result list
#[derive(Debug, Clone, Serialize)]
pub struct SmellList {
    pub title: String,
    pub detector: String,
    /// `"<entity> [<detail>]"` strings in detector order
    pub findings: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DetectorResult> for SmellList {
    fn from(result: &DetectorResult) -> Self {
        Self {
            title: result.title.clone(),
            detector: result.detector_name.clone(),
            findings: result.findings.iter().map(|f| f.to_string()).collect(),
            disabled: result.disabled,
            error: result.error.clone(),
        }
    }
}

/// An artifact that was recognised but could not be turned into classes
#[derive(Debug, Clone, Serialize)]
pub struct FailedArtifact {
    pub path: String,
    pub error: String,
}

/// Everything handed to the presentation layer after one analysis run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub root: String,
    pub classes: usize,
    pub methods: usize,
    /// One list per rule, in rule order
    pub smells: Vec<SmellList>,
    /// Files with no recognised artifact kind
    pub skipped: usize,
    pub failed: Vec<FailedArtifact>,
}

impl AnalysisReport {
    pub fn new(
        root: impl Into<String>,
        model: &SystemModel,
        results: &[DetectorResult],
        skipped: usize,
        failed: Vec<FailedArtifact>,
    ) -> Self {
        Self {
            root: root.into(),
            classes: model.len(),
            methods: model.method_count(),
            smells: results.iter().map(SmellList::from).collect(),
            skipped,
            failed,
        }
    }

    /// Count of skipped plus failed artifacts
    pub fn skipped_or_failed(&self) -> usize {
        self.skipped + self.failed.len()
    }

    /// Findings for one rule, by title
    pub fn findings_for(&self, title: &str) -> Option<&[String]> {
        self.smells
            .iter()
            .find(|s| s.title == title)
            .map(|s| s.findings.as_slice())
    }

    pub fn total_findings(&self) -> usize {
        self.smells.iter().map(|s| s.findings.len()).sum()
    }
}

/// Render an analysis report in the specified format
pub fn report(report: &AnalysisReport, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt)
}

/// Render an analysis report using an OutputFormat enum
pub fn report_with_format(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
    }
}
