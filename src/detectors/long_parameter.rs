//! Long parameter list detector
//!
//! Detects methods with too many parameters, which is a code smell indicating:
//! - The method is doing too much (violates SRP)
//! - Related parameters should be grouped into objects
//! - The method has poor API design

use crate::detectors::base::Detector;
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;

/// Thresholds for long parameter list detection
#[derive(Debug, Clone)]
pub struct LongParameterThresholds {
    /// Parameters above this count are flagged
    pub max_params: i64,
}

impl Default for LongParameterThresholds {
    fn default() -> Self {
        Self { max_params: 5 }
    }
}

/// Detects methods with too many parameters
pub struct LongParameterListDetector {
    thresholds: LongParameterThresholds,
}

impl LongParameterListDetector {
    pub fn new() -> Self {
        Self {
            thresholds: LongParameterThresholds::default(),
        }
    }
}

impl Default for LongParameterListDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for LongParameterListDetector {
    fn name(&self) -> &'static str {
        "LongParameterListDetector"
    }

    fn title(&self) -> &'static str {
        "Long Parameter List"
    }

    fn description(&self) -> &'static str {
        "Detects methods with too many parameters"
    }

    fn category(&self) -> &'static str {
        "complexity"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for class in graph.classes() {
            for method in graph.owned_methods(class) {
                let Some(node) = graph.node(method) else {
                    continue;
                };
                let params = node.param_count();
                if params > self.thresholds.max_params {
                    findings.push(Finding::new(
                        self.name(),
                        format!("{}.{}", graph.name(class), node.name),
                        format!("Params={}", params),
                    ));
                }
            }
        }

        Ok(findings)
    }
}
