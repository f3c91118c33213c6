//! Detector execution engine with parallel support
//!
//! The DetectorEngine orchestrates the execution of all registered detectors:
//! - Runs enabled detectors in parallel using rayon over the frozen graph
//! - Keeps one result per registered detector, in registration order
//! - Isolates failures: an error or panic yields an empty result
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    DetectorEngine                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Register detectors (rule order)                     │
//! │  2. Mark disabled ones from configuration               │
//! │  3. Run enabled detectors in parallel (rayon)           │
//! │  4. Return results in registration order                │
//! └─────────────────────────────────────────────────────────┘
//! ```

use crate::detectors::base::{DetectionSummary, Detector, DetectorResult};
use crate::graph::CodeGraph;
use anyhow::Result;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Orchestrates smell detection across all registered detectors
pub struct DetectorEngine {
    /// Registered detectors
    detectors: Vec<Arc<dyn Detector>>,
    /// Config keys of detectors that must not run
    disabled: HashSet<String>,
    /// Number of worker threads for parallel execution
    workers: usize,
}

impl DetectorEngine {
    /// Create a new detector engine
    ///
    /// # Arguments
    /// * `workers` - Number of worker threads (0 = auto-detect)
    pub fn new(workers: usize) -> Self {
        let actual_workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
                .min(16) // Cap at 16 threads
        } else {
            workers
        };

        Self {
            detectors: Vec::new(),
            disabled: HashSet::new(),
            workers: actual_workers,
        }
    }

    /// Register a detector
    pub fn register(&mut self, detector: Arc<dyn Detector>) {
        debug!("Registering detector: {}", detector.name());
        self.detectors.push(detector);
    }

    /// Register multiple detectors at once
    pub fn register_all(&mut self, detectors: impl IntoIterator<Item = Arc<dyn Detector>>) {
        for detector in detectors {
            self.register(detector);
        }
    }

    /// Skip a detector by config key or detector name
    pub fn disable(&mut self, key: impl Into<String>) {
        self.disabled.insert(key.into());
    }

    fn is_disabled(&self, detector: &dyn Detector) -> bool {
        self.disabled.contains(detector.name()) || self.disabled.contains(&detector.config_key())
    }

    /// Get the number of registered detectors
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Run all detectors and return one result per detector, in
    /// registration order
    pub fn run(&self, graph: &CodeGraph) -> Result<(Vec<DetectorResult>, DetectionSummary)> {
        let start = Instant::now();
        info!(
            "Starting detection with {} detectors on {} workers",
            self.detectors.len(),
            self.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        let results: Vec<DetectorResult> = pool.install(|| {
            self.detectors
                .par_iter()
                .map(|detector| {
                    if self.is_disabled(detector.as_ref()) {
                        debug!("Detector {} disabled by configuration", detector.name());
                        DetectorResult::disabled(detector.as_ref())
                    } else {
                        self.run_single_detector(detector, graph)
                    }
                })
                .collect()
        });

        for result in &results {
            if let Some(err) = &result.error {
                warn!("Detector {} failed: {}", result.detector_name, err);
            }
        }

        let mut summary = DetectionSummary::from_results(&results);
        summary.total_duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Detection complete: {} findings from {}/{} detectors in {:?}",
            summary.total_findings,
            summary.detectors_succeeded,
            summary.detectors_run,
            start.elapsed()
        );

        Ok((results, summary))
    }

    fn run_single_detector(&self, detector: &Arc<dyn Detector>, graph: &CodeGraph) -> DetectorResult {
        let name = detector.name();
        let start = Instant::now();

        debug!("Running detector: {}", name);

        // Wrap in catch_unwind to handle panics
        let detect_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            detector.detect(graph)
        }));

        let duration = start.elapsed().as_millis() as u64;
        match detect_result {
            Ok(Ok(findings)) => {
                info!("{}: {} findings", detector.title(), findings.len());
                DetectorResult::success(detector.as_ref(), findings, duration)
            }
            Ok(Err(e)) => {
                debug!("Detector {} failed: {}", name, e);
                DetectorResult::failure(detector.as_ref(), e.to_string(), duration)
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("Detector {} panicked: {}", name, panic_msg);
                DetectorResult::failure(detector.as_ref(), format!("Panic: {}", panic_msg), duration)
            }
        }
    }
}

impl Default for DetectorEngine {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Builder for creating a configured DetectorEngine
pub struct DetectorEngineBuilder {
    workers: usize,
    detectors: Vec<Arc<dyn Detector>>,
    disabled: Vec<String>,
}

impl DetectorEngineBuilder {
    pub fn new() -> Self {
        Self {
            workers: 0,
            detectors: Vec::new(),
            disabled: Vec::new(),
        }
    }

    /// Set the number of worker threads
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Add a detector
    pub fn detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.detectors.push(detector);
        self
    }

    /// Add multiple detectors
    pub fn detectors(mut self, detectors: impl IntoIterator<Item = Arc<dyn Detector>>) -> Self {
        self.detectors.extend(detectors);
        self
    }

    /// Disable detectors by config key or name
    pub fn disabled(mut self, keys: impl IntoIterator<Item = String>) -> Self {
        self.disabled.extend(keys);
        self
    }

    /// Build the engine
    pub fn build(self) -> DetectorEngine {
        let mut engine = DetectorEngine::new(self.workers);
        engine.register_all(self.detectors);
        for key in self.disabled {
            engine.disable(key);
        }
        engine
    }
}

impl Default for DetectorEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Finding;

    // Mock detector for testing
    struct MockDetector {
        name: &'static str,
        title: &'static str,
        findings_count: usize,
        fail: bool,
        panic: bool,
    }

    impl MockDetector {
        fn new(name: &'static str, title: &'static str, findings_count: usize) -> Self {
            Self {
                name,
                title,
                findings_count,
                fail: false,
                panic: false,
            }
        }
    }

    impl Detector for MockDetector {
        fn name(&self) -> &'static str {
            self.name
        }

        fn title(&self) -> &'static str {
            self.title
        }

        fn description(&self) -> &'static str {
            "Mock detector for testing"
        }

        fn detect(&self, _graph: &CodeGraph) -> Result<Vec<Finding>> {
            if self.panic {
                panic!("mock detector exploded");
            }
            if self.fail {
                anyhow::bail!("mock detector failed");
            }
            Ok((0..self.findings_count)
                .map(|i| Finding::new(self.name, format!("Entity{}", i), "detail"))
                .collect())
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = DetectorEngine::new(4);
        assert_eq!(engine.workers, 4);
        assert_eq!(engine.detector_count(), 0);
    }

    #[test]
    fn test_engine_default_workers() {
        let engine = DetectorEngine::new(0);
        assert!(engine.workers > 0);
        assert!(engine.workers <= 16);
    }

    #[test]
    fn test_results_keep_registration_order() {
        let engine = DetectorEngineBuilder::new()
            .workers(4)
            .detector(Arc::new(MockDetector::new("D1", "First", 2)))
            .detector(Arc::new(MockDetector::new("D2", "Second", 0)))
            .detector(Arc::new(MockDetector::new("D3", "Third", 1)))
            .build();

        let (results, summary) = engine.run(&CodeGraph::new()).expect("run");
        let names: Vec<_> = results.iter().map(|r| r.detector_name.as_str()).collect();
        assert_eq!(names, vec!["D1", "D2", "D3"]);
        assert_eq!(results[0].findings.len(), 2);
        assert_eq!(summary.total_findings, 3);
    }

    #[test]
    fn test_failures_and_panics_are_isolated() {
        let mut failing = MockDetector::new("Failing", "Failing", 3);
        failing.fail = true;
        let mut panicking = MockDetector::new("Panicking", "Panicking", 3);
        panicking.panic = true;

        let engine = DetectorEngineBuilder::new()
            .workers(2)
            .detector(Arc::new(failing))
            .detector(Arc::new(panicking))
            .detector(Arc::new(MockDetector::new("Ok", "Ok", 1)))
            .build();

        let (results, summary) = engine.run(&CodeGraph::new()).expect("run");
        assert!(!results[0].success);
        assert!(results[0].findings.is_empty());
        assert!(results[1].error.as_deref().unwrap_or("").contains("Panic"));
        assert!(results[2].success);
        assert_eq!(summary.detectors_failed, 2);
    }

    #[test]
    fn test_disabled_detector_keeps_empty_slot() {
        let engine = DetectorEngineBuilder::new()
            .workers(1)
            .detector(Arc::new(MockDetector::new("D1", "Message Chains", 5)))
            .detector(Arc::new(MockDetector::new("D2", "Data Class", 1)))
            .disabled(["message-chains".to_string()])
            .build();

        let (results, summary) = engine.run(&CodeGraph::new()).expect("run");
        assert_eq!(results.len(), 2);
        assert!(results[0].disabled);
        assert!(results[0].findings.is_empty());
        assert_eq!(results[1].findings.len(), 1);
        assert_eq!(summary.detectors_disabled, 1);
    }
}
