//! Divergent change detector
//!
//! A class with many methods and almost no cohesion between them tends to
//! change for many unrelated reasons.

use crate::detectors::base::{format_ratio, Detector};
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;

/// Thresholds for divergent change detection
#[derive(Debug, Clone)]
pub struct DivergentChangeThresholds {
    /// TCC below which a class is incohesive
    pub min_tcc: f64,
    /// Method count above which incohesion matters
    pub max_methods: i64,
}

impl Default for DivergentChangeThresholds {
    fn default() -> Self {
        Self {
            min_tcc: 0.2,
            max_methods: 8,
        }
    }
}

pub struct DivergentChangeDetector {
    thresholds: DivergentChangeThresholds,
}

impl DivergentChangeDetector {
    pub fn new() -> Self {
        Self {
            thresholds: DivergentChangeThresholds::default(),
        }
    }
}

impl Default for DivergentChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for DivergentChangeDetector {
    fn name(&self) -> &'static str {
        "DivergentChangeDetector"
    }

    fn title(&self) -> &'static str {
        "Divergent Change"
    }

    fn description(&self) -> &'static str {
        "Detects large classes whose methods share no state"
    }

    fn category(&self) -> &'static str {
        "cohesion"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for class in graph.classes() {
            let Some(node) = graph.node(class) else {
                continue;
            };
            let tcc = node.get_f64("tcc").unwrap_or(0.0);
            let methods = node.get_i64("methodCount").unwrap_or(0);
            if tcc < self.thresholds.min_tcc && methods > self.thresholds.max_methods {
                findings.push(Finding::new(
                    self.name(),
                    &node.name,
                    format!("TCC={}, Methods={}", format_ratio(tcc), methods),
                ));
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::class_with_metrics;

    #[test]
    fn test_both_clauses_required() {
        let mut graph = CodeGraph::new();
        class_with_metrics(&mut graph, "Sprawl", &[("tcc", 0.1.into()), ("methodCount", 9.into())]);
        class_with_metrics(&mut graph, "Small", &[("tcc", 0.0.into()), ("methodCount", 8.into())]);
        class_with_metrics(&mut graph, "Tight", &[("tcc", 0.2.into()), ("methodCount", 20.into())]);

        let findings = DivergentChangeDetector::new().detect(&graph).expect("detect");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].to_string(), "Sprawl [TCC=0.10, Methods=9]");
    }

    #[test]
    fn test_limits_are_exclusive() {
        let mut graph = CodeGraph::new();
        class_with_metrics(&mut graph, "AtTcc", &[("tcc", 0.2.into()), ("methodCount", 9.into())]);
        class_with_metrics(&mut graph, "AtMethods", &[("tcc", 0.19.into()), ("methodCount", 8.into())]);
        assert!(DivergentChangeDetector::new().detect(&graph).expect("detect").is_empty());

        class_with_metrics(&mut graph, "JustOver", &[("tcc", 0.19.into()), ("methodCount", 9.into())]);
        let findings = DivergentChangeDetector::new().detect(&graph).expect("detect");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].to_string(), "JustOver [TCC=0.19, Methods=9]");
    }
}
