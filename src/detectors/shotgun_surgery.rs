//! Shotgun surgery detector
//!
//! A class whose methods are called from many distinct places elsewhere
//! forces scattered edits whenever it changes. Only callers owned by other
//! classes count; a class calling itself does not widen its blast radius.

use crate::detectors::base::Detector;
use crate::graph::{CodeGraph, NodeIndex};
use crate::models::Finding;
use anyhow::Result;
use std::collections::HashSet;
use tracing::debug;

/// Thresholds for shotgun surgery detection
#[derive(Debug, Clone)]
pub struct ShotgunSurgeryThresholds {
    /// Distinct external callers above which a class is flagged
    pub max_callers: usize,
}

impl Default for ShotgunSurgeryThresholds {
    fn default() -> Self {
        Self { max_callers: 8 }
    }
}

pub struct ShotgunSurgeryDetector {
    thresholds: ShotgunSurgeryThresholds,
}

impl ShotgunSurgeryDetector {
    pub fn new() -> Self {
        Self {
            thresholds: ShotgunSurgeryThresholds::default(),
        }
    }

    /// Distinct methods outside `class` calling any of its methods
    fn external_callers(graph: &CodeGraph, class: NodeIndex) -> HashSet<NodeIndex> {
        graph
            .owned_methods(class)
            .into_iter()
            .flat_map(|m| graph.callers(m))
            .filter(|&caller| graph.owner_of(caller) != Some(class))
            .collect()
    }
}

impl Default for ShotgunSurgeryDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ShotgunSurgeryDetector {
    fn name(&self) -> &'static str {
        "ShotgunSurgeryDetector"
    }

    fn title(&self) -> &'static str {
        "Shotgun Surgery"
    }

    fn description(&self) -> &'static str {
        "Detects classes whose changes ripple into many callers"
    }

    fn category(&self) -> &'static str {
        "coupling"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for class in graph.classes() {
            let callers = Self::external_callers(graph, class).len();
            if callers > self.thresholds.max_callers {
                debug!("{} has {} external callers", graph.name(class), callers);
                findings.push(Finding::new(
                    self.name(),
                    graph.name(class),
                    format!("Callers={}", callers),
                ));
            }
        }

        Ok(findings)
    }
}
