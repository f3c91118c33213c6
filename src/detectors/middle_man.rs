//! Middle man detector
//!
//! Flags classes where most methods just forward work elsewhere: the share
//! of owned methods with at least one outgoing call exceeds the threshold.

use crate::detectors::base::Detector;
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;

/// Thresholds for middle man detection
#[derive(Debug, Clone)]
pub struct MiddleManThresholds {
    /// Delegating fraction above which a class is a middle man
    pub delegation_ratio: f64,
}

impl Default for MiddleManThresholds {
    fn default() -> Self {
        Self {
            delegation_ratio: 0.6,
        }
    }
}

pub struct MiddleManDetector {
    thresholds: MiddleManThresholds,
}

impl MiddleManDetector {
    pub fn new() -> Self {
        Self {
            thresholds: MiddleManThresholds::default(),
        }
    }
}

impl Default for MiddleManDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MiddleManDetector {
    fn name(&self) -> &'static str {
        "MiddleManDetector"
    }

    fn title(&self) -> &'static str {
        "Middle Man"
    }

    fn description(&self) -> &'static str {
        "Detects classes that mostly delegate to other code"
    }

    fn category(&self) -> &'static str {
        "coupling"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for class in graph.classes() {
            let methods = graph.owned_methods(class);
            let total = methods.len();
            if total == 0 {
                continue;
            }

            let delegating = methods
                .iter()
                .filter(|&&m| !graph.callees(m).is_empty())
                .count();

            if delegating as f64 > total as f64 * self.thresholds.delegation_ratio {
                findings.push(Finding::new(
                    self.name(),
                    graph.name(class),
                    format!("Delegating={}/{}", delegating, total),
                ));
            }
        }

        Ok(findings)
    }
}
