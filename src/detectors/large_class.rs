//! Large class detector
//!
//! Flags classes that declare too many methods or too many attributes.

use crate::detectors::base::Detector;
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;

/// Thresholds for large class detection
#[derive(Debug, Clone)]
pub struct LargeClassThresholds {
    /// Method count above which a class is large
    pub max_methods: i64,
    /// Attribute count above which a class is large
    pub max_attributes: i64,
}

impl Default for LargeClassThresholds {
    fn default() -> Self {
        Self {
            max_methods: 12,
            max_attributes: 10,
        }
    }
}

pub struct LargeClassDetector {
    thresholds: LargeClassThresholds,
}

impl LargeClassDetector {
    pub fn new() -> Self {
        Self {
            thresholds: LargeClassThresholds::default(),
        }
    }
}

impl Default for LargeClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for LargeClassDetector {
    fn name(&self) -> &'static str {
        "LargeClassDetector"
    }

    fn title(&self) -> &'static str {
        "Large Class"
    }

    fn description(&self) -> &'static str {
        "Detects classes with too many methods or attributes"
    }

    fn category(&self) -> &'static str {
        "size"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let findings = graph
            .classes()
            .into_iter()
            .filter_map(|class| graph.node(class))
            .filter_map(|node| {
                let methods = node.get_i64("methodCount").unwrap_or(0);
                let attributes = node.get_i64("attributeCount").unwrap_or(0);
                (methods > self.thresholds.max_methods
                    || attributes > self.thresholds.max_attributes)
                    .then(|| {
                        Finding::new(
                            self.name(),
                            &node.name,
                            format!("Methods={}, Attributes={}", methods, attributes),
                        )
                    })
            })
            .collect();
        Ok(findings)
    }
}
