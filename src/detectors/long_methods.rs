//! Long method detector
//!
//! Flags methods whose body spans too many source lines or has too many
//! decision points. Line counts come from debug information, so classes
//! compiled without it never trip the length clause.

use crate::detectors::base::Detector;
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;
use tracing::debug;

/// Thresholds for long method detection
#[derive(Debug, Clone)]
pub struct LongMethodThresholds {
    /// Lines of code above which a method is long
    pub max_loc: i64,
    /// Cyclomatic complexity above which a method is long
    pub max_complexity: i64,
}

impl Default for LongMethodThresholds {
    fn default() -> Self {
        Self {
            max_loc: 50,
            max_complexity: 10,
        }
    }
}

pub struct LongMethodsDetector {
    thresholds: LongMethodThresholds,
}

impl LongMethodsDetector {
    pub fn new() -> Self {
        Self {
            thresholds: LongMethodThresholds::default(),
        }
    }
}

impl Default for LongMethodsDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for LongMethodsDetector {
    fn name(&self) -> &'static str {
        "LongMethodsDetector"
    }

    fn title(&self) -> &'static str {
        "Long Method"
    }

    fn description(&self) -> &'static str {
        "Detects methods that are too long or too complex"
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
                let loc = node.loc();
                let cc = node.complexity();
                if loc > self.thresholds.max_loc || cc > self.thresholds.max_complexity {
                    let entity = format!("{}.{}", graph.name(class), node.name);
                    debug!("Long method {} (line {})", entity, node.line_start);
                    findings.push(Finding::new(
                        self.name(),
                        entity,
                        format!("LOC={}, CC={}", loc, cc),
                    ));
                }
            }
        }

        Ok(findings)
    }
}
