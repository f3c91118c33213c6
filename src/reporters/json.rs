//! JSON reporter and interchange document
//!
//! `render` outputs the AnalysisReport as pretty-printed JSON.
//!
//! The interchange document is a top-level array of class objects:
//!
//! ```json
//! [{"name": "a.B", "attributes": ["x"], "superClass": "java.lang.Object",
//!   "interfaces": [], "metrics": {"wmc": 1, "atfd": 0, "tcc": 0.0,
//!   "methodCount": 1, "attributeCount": 1},
//!   "methods": [{"name": "m", "parameters": ["int"], "loc": 3, "cc": 1,
//!                "accessedFields": ["x"], "calledMethods": []}]}]
//! ```
//!
//! Missing `loc`, `cc` and list keys default to `0`, `1` and empty.

use super::AnalysisReport;
use crate::models::SystemModel;
use anyhow::{Context, Result};
use std::path::Path;

/// Render report as JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Serialize a model, metrics included, as an interchange document
pub fn export_model(model: &SystemModel) -> Result<String> {
    serde_json::to_string_pretty(model).context("Failed to serialize class model")
}

/// Parse an interchange document back into a model
pub fn import_model(document: &str) -> Result<SystemModel> {
    serde_json::from_str(document).context("Invalid interchange document")
}

/// Read an interchange document from disk
pub fn read_model(path: &Path) -> Result<SystemModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file {}", path.display()))?;
    import_model(&content).with_context(|| format!("While loading {}", path.display()))
}
