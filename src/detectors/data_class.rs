//! Data class detector
//!
//! A data class only carries state: every method it owns is trivial
//! (straight-line and short), typically getters and setters. Classes that
//! own no methods at all are not considered.

use crate::detectors::base::Detector;
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;

/// Thresholds for data class detection
#[derive(Debug, Clone)]
pub struct DataClassThresholds {
    /// Complexity below which a method counts as trivial
    pub trivial_complexity: i64,
    /// Lines of code below which a method counts as trivial
    pub trivial_loc: i64,
}

impl Default for DataClassThresholds {
    fn default() -> Self {
        Self {
            trivial_complexity: 2,
            trivial_loc: 10,
        }
    }
}

pub struct DataClassDetector {
    thresholds: DataClassThresholds,
}

impl DataClassDetector {
    pub fn new() -> Self {
        Self {
            thresholds: DataClassThresholds::default(),
        }
    }
}

impl Default for DataClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DataClassDetector {
    fn name(&self) -> &'static str {
        "DataClassDetector"
    }

    fn title(&self) -> &'static str {
        "Data Class"
    }

    fn description(&self) -> &'static str {
        "Detects classes whose methods carry no real behavior"
    }

    fn category(&self) -> &'static str {
        "design"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for class in graph.classes() {
            let methods = graph.owned_methods(class);
            if methods.is_empty() {
                continue;
            }

            let all_trivial = methods.iter().all(|&m| {
                graph.node(m).is_some_and(|node| {
                    node.complexity() < self.thresholds.trivial_complexity
                        && node.loc() < self.thresholds.trivial_loc
                })
            });

            if all_trivial {
                findings.push(Finding::new(
                    self.name(),
                    graph.name(class),
                    format!("Methods={}, Behavior=weak", methods.len()),
                ));
            }
        }

        Ok(findings)
    }
}
