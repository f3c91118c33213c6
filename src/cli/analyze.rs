//! Analyze and export commands
//!
//! `analyze` performs a full analysis:
//! 1. Load project config (smellgraph.toml)
//! 2. Build the class model from PATH, or read an exported model
//! 3. Build the code graph and class metrics
//! 4. Run the ten smell rules
//! 5. Output results (text, json)
//!
//! `export` stops after step 3 and writes the interchange document.

use crate::config::{load_project_config, ProjectConfig};
use crate::detectors::create_default_engine;
use crate::graph::import_model;
use crate::models::SystemModel;
use crate::pipeline::{analyze_model, ProjectModelBuilder};
use crate::reporters::{self, json, AnalysisReport, FailedArtifact};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::write_output;

/// Class model plus the skip/failure bookkeeping of its build
pub(super) struct LoadedModel {
    pub model: SystemModel,
    pub skipped: usize,
    pub failed: Vec<FailedArtifact>,
}

/// Build the model for `path`, or read it from an interchange document
pub(super) fn load_model(
    path: &Path,
    model_file: Option<&Path>,
    config: &ProjectConfig,
    workers: usize,
) -> Result<LoadedModel> {
    if let Some(file) = model_file {
        let model = json::read_model(file)?;
        info!("Loaded {} classes from {}", model.len(), file.display());
        return Ok(LoadedModel {
            model,
            skipped: 0,
            failed: Vec::new(),
        });
    }

    let report = ProjectModelBuilder::from_config(config)
        .with_workers(workers)
        .build(path)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;

    Ok(LoadedModel {
        failed: report.failed_artifacts(),
        skipped: report.skipped,
        model: report.model,
    })
}

/// Run the analyze command
pub fn run(
    path: &Path,
    format: Option<&str>,
    output: Option<&Path>,
    model_file: Option<&Path>,
    workers: Option<usize>,
) -> Result<()> {
    let config = load_project_config(path);
    let workers = workers.or(config.defaults.workers).unwrap_or(0);
    let format = format
        .map(str::to_string)
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());

    let loaded = load_model(path, model_file, &config, workers)?;

    let engine = create_default_engine(workers, config.disabled_detectors());
    let analysis = analyze_model(loaded.model, &engine)?;

    let root = model_file.unwrap_or(path).display().to_string();
    let report = AnalysisReport::new(
        root,
        &analysis.model,
        &analysis.results,
        loaded.skipped,
        loaded.failed,
    );

    let rendered = reporters::report(&report, &format)?;
    write_output(output, &rendered)
}

/// Run the export command
pub fn export(path: &Path, output: Option<&Path>, workers: Option<usize>) -> Result<()> {
    let config = load_project_config(path);
    let workers = workers.or(config.defaults.workers).unwrap_or(0);

    let mut loaded = load_model(path, None, &config, workers)?;
    // Metrics are computed during import and written back into the model
    import_model(&mut loaded.model);

    let mut document = json::export_model(&loaded.model)?;
    document.push('\n');
    write_output(output, &document)
}
