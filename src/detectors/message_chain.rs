//! Message Chain detector for Law of Demeter violations
//!
//! Reports every directed call path of exactly three methods,
//! `m1 → m2 → m3`. Longer paths show up as overlapping three-node
//! windows rather than as a single long chain.
//!
//! A path needs two distinct CALLS edges, so a lone recursive method does
//! not chain with itself, while `a → a → b` does.

use crate::detectors::base::Detector;
use crate::graph::CodeGraph;
use crate::models::Finding;
use anyhow::Result;
use tracing::debug;

/// Detects call chains of three methods
pub struct MessageChainDetector;

impl MessageChainDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MessageChainDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for MessageChainDetector {
    fn name(&self) -> &'static str {
        "MessageChainDetector"
    }

    fn title(&self) -> &'static str {
        "Message Chains"
    }

    fn description(&self) -> &'static str {
        "Detects chains of calls passing through three methods"
    }

    fn category(&self) -> &'static str {
        "coupling"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for first in graph.methods() {
            for second in graph.callees(first) {
                for third in graph.callees(second) {
                    if first == second && second == third {
                        continue;
                    }
                    findings.push(Finding::new(
                        self.name(),
                        graph.qualified_name(first),
                        format!(
                            "Chain={} → {} → {}",
                            graph.name(first),
                            graph.name(second),
                            graph.name(third)
                        ),
                    ));
                }
            }
        }

        debug!("Found {} message chains", findings.len());
        Ok(findings)
    }
}
