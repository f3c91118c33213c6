//! Base detector trait and types
//!
//! This module defines the core abstractions for smell detection:
//! - `Detector` trait that all detectors must implement
//! - `DetectorResult` for capturing execution results
//! - `DetectionSummary` for aggregate statistics

use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;

/// Result from running a single detector
#[derive(Debug, Clone)]
pub struct DetectorResult {
    /// Name of the detector that produced these results
    pub detector_name: String,
    /// Display title of the smell, e.g. "God Class"
    pub title: String,
    /// Findings produced by the detector
    pub findings: Vec<Finding>,
    /// Execution time in milliseconds
    pub duration_ms: u64,
    /// Whether the detector completed successfully
    pub success: bool,
    /// Whether the detector was turned off by configuration
    pub disabled: bool,
    /// Error message if the detector failed
    pub error: Option<String>,
}

impl DetectorResult {
    /// Create a successful result
    pub fn success(detector: &dyn Detector, findings: Vec<Finding>, duration_ms: u64) -> Self {
        Self {
            detector_name: detector.name().to_string(),
            title: detector.title().to_string(),
            findings,
            duration_ms,
            success: true,
            disabled: false,
            error: None,
        }
    }

    /// Create a failed result; the finding list stays empty
    pub fn failure(detector: &dyn Detector, error: String, duration_ms: u64) -> Self {
        Self {
            detector_name: detector.name().to_string(),
            title: detector.title().to_string(),
            findings: Vec::new(),
            duration_ms,
            success: false,
            disabled: false,
            error: Some(error),
        }
    }

    /// Placeholder for a detector that was not run
    pub fn disabled(detector: &dyn Detector) -> Self {
        Self {
            detector_name: detector.name().to_string(),
            title: detector.title().to_string(),
            findings: Vec::new(),
            duration_ms: 0,
            success: true,
            disabled: true,
            error: None,
        }
    }
}

/// Trait for all smell detectors
///
/// Detectors are pure read-only queries over a fully imported
/// [`CodeGraph`]. They never mutate it, so any number may run at once.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyDetector;
///
/// impl Detector for MyDetector {
///     fn name(&self) -> &'static str {
///         "MyDetector"
///     }
///
///     fn title(&self) -> &'static str {
///         "My Smell"
///     }
///
///     fn description(&self) -> &'static str {
///         "Detects my specific code smell"
///     }
///
///     fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector (e.g., "GodClassDetector")
    fn name(&self) -> &'static str;

    /// Human-readable smell name used as the result list heading
    fn title(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Run detection and return findings in a deterministic order
    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>>;

    /// Category of issues this detector finds
    ///
    /// Used for grouping findings in reports.
    fn category(&self) -> &'static str {
        "code_smell"
    }

    /// Key used in `[detectors.<key>]` configuration tables
    fn config_key(&self) -> String {
        self.title().to_lowercase().replace(' ', "-")
    }
}

/// Summary statistics from running all detectors
#[derive(Debug, Clone, Default)]
pub struct DetectionSummary {
    /// Total number of detectors run
    pub detectors_run: usize,
    /// Number of detectors that succeeded
    pub detectors_succeeded: usize,
    /// Number of detectors that failed
    pub detectors_failed: usize,
    /// Number of detectors turned off by configuration
    pub detectors_disabled: usize,
    /// Total findings across all detectors
    pub total_findings: usize,
    /// Total execution time in milliseconds
    pub total_duration_ms: u64,
}

impl DetectionSummary {
    /// Update summary with a detector result
    pub fn add_result(&mut self, result: &DetectorResult) {
        if result.disabled {
            self.detectors_disabled += 1;
            return;
        }

        self.detectors_run += 1;
        self.total_duration_ms += result.duration_ms;

        if result.success {
            self.detectors_succeeded += 1;
            self.total_findings += result.findings.len();
        } else {
            self.detectors_failed += 1;
        }
    }

    pub fn from_results(results: &[DetectorResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.add_result(result);
        }
        summary
    }
}

/// Render a cohesion value the way detail strings show it
pub(crate) fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}
