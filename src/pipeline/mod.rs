//! Analysis pipeline
//!
//! Orchestrates the full analysis:
//! 1. Classify the root and walk it for artifacts
//! 2. Load compiled units and extract one ClassModel per unit (parallel)
//! 3. Build the code graph and class metrics
//! 4. Run detectors
//!
//! Graph construction only starts once every artifact has been extracted,
//! so name resolution always sees the complete model.

use crate::artifact::{classify, ArtifactError, ArtifactKind, ArtifactResult, JavacCompiler, UnitLoader};
use crate::config::{ExcludeConfig, ProjectConfig};
use crate::detectors::{DetectionSummary, DetectorEngine, DetectorResult};
use crate::graph::{import_model, CodeGraph};
use crate::models::{ClassModel, SystemModel};
use crate::parsers;
use crate::reporters::FailedArtifact;
use anyhow::Result;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-directory ignore file, read in addition to `.gitignore`
pub const IGNORE_FILE: &str = ".smellgraphignore";

/// A recognised artifact, or one unit inside it, that produced no class
#[derive(Debug)]
pub struct ArtifactFailure {
    pub path: PathBuf,
    pub error: ArtifactError,
}

impl From<&ArtifactFailure> for FailedArtifact {
    fn from(failure: &ArtifactFailure) -> Self {
        Self {
            path: failure.path.display().to_string(),
            error: failure.error.to_string(),
        }
    }
}

/// Outcome of building a project model
#[derive(Debug, Default)]
pub struct BuildReport {
    pub model: SystemModel,
    pub failures: Vec<ArtifactFailure>,
    /// Files with no recognised artifact kind
    pub skipped: usize,
}

impl BuildReport {
    /// Count of skipped plus failed artifacts
    pub fn skipped_or_failed(&self) -> usize {
        self.skipped + self.failures.len()
    }

    pub fn failed_artifacts(&self) -> Vec<FailedArtifact> {
        self.failures.iter().map(FailedArtifact::from).collect()
    }
}

/// Turns an analysis root into one SystemModel
#[derive(Clone)]
pub struct ProjectModelBuilder {
    loader: UnitLoader,
    workers: usize,
    excludes: ExcludeConfig,
}

impl ProjectModelBuilder {
    pub fn new(loader: UnitLoader) -> Self {
        Self {
            loader,
            workers: 0,
            excludes: ExcludeConfig::default(),
        }
    }

    /// Builder set up from `[compiler]` and `[exclude]` settings
    pub fn from_config(config: &ProjectConfig) -> Self {
        let compiler = JavacCompiler::new(&config.compiler.program, config.compiler.timeout_secs);
        Self::new(UnitLoader::new(Arc::new(compiler))).with_excludes(config.exclude.paths.clone())
    }

    /// Number of extraction threads (0 = rayon default)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Path prefixes, relative to the root, never walked into
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = ExcludeConfig { paths: excludes };
        self
    }

    /// Build the model for `root`.
    ///
    /// A single-artifact root fails hard on any loading or extraction
    /// error. A directory root never fails: unrecognised files are counted
    /// as skipped, failing artifacts are recorded and left out.
    pub fn build(&self, root: &Path) -> ArtifactResult<BuildReport> {
        let start = Instant::now();
        let kind = classify(root)?;

        let report = if kind == ArtifactKind::Directory {
            self.build_directory(root)?
        } else {
            self.build_single(root, kind)?
        };

        info!(
            "Extracted {} classes ({} skipped, {} failed) in {:?}",
            report.model.len(),
            report.skipped,
            report.failures.len(),
            start.elapsed()
        );
        Ok(report)
    }

    /// Load and extract one artifact, failing on the first error.
    ///
    /// Entries of an archive are the exception: an entry that does not
    /// parse is recorded in the report and the remaining entries are kept.
    pub fn build_single(&self, path: &Path, kind: ArtifactKind) -> ArtifactResult<BuildReport> {
        let units = self.loader.load(path, kind)?;
        let mut report = BuildReport::default();

        for unit in &units {
            match parsers::extract(unit) {
                Ok(class) => report.model.add_class(class),
                Err(e) if is_archive(kind) => {
                    warn!("Skipping {} in {}: {}", unit.name, path.display(), e);
                    report.failures.push(ArtifactFailure {
                        path: path.to_path_buf(),
                        error: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    fn build_directory(&self, root: &Path) -> ArtifactResult<BuildReport> {
        let (artifacts, skipped) = self.discover(root);
        debug!("Discovered {} artifacts under {}", artifacts.len(), root.display());

        let extract_all = || -> Vec<ArtifactOutcome> {
            artifacts
                .par_iter()
                .map(|(path, kind)| self.extract_artifact(path, *kind))
                .collect()
        };

        let outcomes = if self.workers == 0 {
            extract_all()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .map_err(|e| ArtifactError::io(root, std::io::Error::other(e)))?;
            pool.install(extract_all)
        };

        let mut report = BuildReport {
            skipped,
            ..Default::default()
        };
        for outcome in outcomes {
            report.model.classes.extend(outcome.classes);
            report.failures.extend(outcome.failures);
            report.skipped += outcome.skipped;
        }
        Ok(report)
    }

    /// Recognised artifacts in file-name order, plus the unrecognised count
    fn discover(&self, root: &Path) -> (Vec<(PathBuf, ArtifactKind)>, usize) {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(IGNORE_FILE)
            .sort_by_file_name(|a, b| a.cmp(b));

        let mut artifacts = Vec::new();
        let mut skipped = 0;

        for entry in builder.build().flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path);
            if self.excludes.should_exclude(relative) {
                debug!("Excluded by config: {}", relative.display());
                continue;
            }

            match classify(path) {
                Ok(kind) => artifacts.push((path.to_path_buf(), kind)),
                Err(e) => {
                    debug!("Skipping {}: {}", path.display(), e);
                    skipped += 1;
                }
            }
        }

        (artifacts, skipped)
    }

    /// Extract one discovered artifact.
    ///
    /// A file picked up only by its signature bytes whose archive does not
    /// open is counted as skipped, not failed.
    fn extract_artifact(&self, path: &Path, kind: ArtifactKind) -> ArtifactOutcome {
        match self.build_single(path, kind) {
            Ok(report) => ArtifactOutcome {
                classes: report.model.classes,
                failures: report.failures,
                skipped: 0,
            },
            Err(error) if kind == ArtifactKind::EmbeddedArchive => {
                debug!("Skipping {}: {}", path.display(), error);
                ArtifactOutcome {
                    classes: Vec::new(),
                    failures: Vec::new(),
                    skipped: 1,
                }
            }
            Err(error) => {
                warn!("Failed to analyse {}: {}", path.display(), error);
                ArtifactOutcome {
                    classes: Vec::new(),
                    failures: vec![ArtifactFailure {
                        path: path.to_path_buf(),
                        error,
                    }],
                    skipped: 0,
                }
            }
        }
    }
}

impl Default for ProjectModelBuilder {
    fn default() -> Self {
        Self::new(UnitLoader::default())
    }
}

struct ArtifactOutcome {
    classes: Vec<ClassModel>,
    failures: Vec<ArtifactFailure>,
    skipped: usize,
}

fn is_archive(kind: ArtifactKind) -> bool {
    matches!(kind, ArtifactKind::Archive | ArtifactKind::EmbeddedArchive)
}

/// Graph, metrics and detector results for one model
pub struct Analysis {
    /// The analysed model, metrics filled in
    pub model: SystemModel,
    pub graph: CodeGraph,
    /// One result per registered detector, in registration order
    pub results: Vec<DetectorResult>,
    pub summary: DetectionSummary,
}

/// Build the graph for `model` and run every detector over it
pub fn analyze_model(mut model: SystemModel, engine: &DetectorEngine) -> Result<Analysis> {
    let graph = import_model(&mut model);
    let (results, summary) = engine.run(&graph)?;
    Ok(Analysis {
        model,
        graph,
        results,
        summary,
    })
}
