//! God class detector - finds classes that do too much
//!
//! A "god class" combines three symptoms at once:
//! - High weighted method count (WMC)
//! - Heavy use of other classes' data (ATFD)
//! - Low cohesion between its own methods (TCC)
//!
//! These classes violate the Single Responsibility Principle and
//! are difficult to understand, test, and maintain.

use crate::detectors::base::{format_ratio, Detector};
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;
use tracing::debug;

/// Thresholds for god class detection
#[derive(Debug, Clone)]
pub struct GodClassThresholds {
    /// WMC above which a class is suspicious
    pub max_wmc: i64,
    /// ATFD above which a class is suspicious
    pub max_atfd: i64,
    /// TCC below which a class is suspicious
    pub min_tcc: f64,
}

impl Default for GodClassThresholds {
    fn default() -> Self {
        Self {
            max_wmc: 20,
            max_atfd: 5,
            min_tcc: 0.33,
        }
    }
}

/// Detects god classes (classes with too many responsibilities)
pub struct GodClassDetector {
    thresholds: GodClassThresholds,
}

impl GodClassDetector {
    pub fn new() -> Self {
        Self {
            thresholds: GodClassThresholds::default(),
        }
    }

    /// All three clauses must hold
    fn is_god_class(&self, wmc: i64, atfd: i64, tcc: f64) -> bool {
        wmc > self.thresholds.max_wmc
            && atfd > self.thresholds.max_atfd
            && tcc < self.thresholds.min_tcc
    }
}

impl Default for GodClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for GodClassDetector {
    fn name(&self) -> &'static str {
        "GodClassDetector"
    }

    fn title(&self) -> &'static str {
        "God Class"
    }

    fn description(&self) -> &'static str {
        "Detects large, low-cohesion classes that lean on foreign data"
    }

    fn category(&self) -> &'static str {
        "design"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for class in graph.classes() {
            let Some(node) = graph.node(class) else {
                continue;
            };
            let wmc = node.get_i64("wmc").unwrap_or(0);
            let atfd = node.get_i64("atfd").unwrap_or(0);
            let tcc = node.get_f64("tcc").unwrap_or(0.0);

            if self.is_god_class(wmc, atfd, tcc) {
                debug!("God class: {} (wmc={}, atfd={})", node.name, wmc, atfd);
                findings.push(Finding::new(
                    self.name(),
                    &node.name,
                    format!("WMC={}, ATFD={}, TCC={}", wmc, atfd, format_ratio(tcc)),
                ));
            }
        }

        Ok(findings)
    }
}
