//! Feature envy detector
//!
//! A method envies another class when it touches more of that class's
//! fields than of its own. Each (method, envied class) pair is reported
//! separately, so one method can envy several classes.

use crate::detectors::base::Detector;
use crate::graph::{CodeGraph, NodeIndex};
use crate::models::Finding;
use anyhow::Result;
use std::collections::BTreeMap;
use tracing::debug;

pub struct FeatureEnvyDetector;

impl FeatureEnvyDetector {
    pub fn new() -> Self {
        Self
    }

    /// Own-field access count plus foreign access counts keyed by owner
    fn access_profile(
        graph: &CodeGraph,
        class: NodeIndex,
        method: NodeIndex,
    ) -> (usize, BTreeMap<NodeIndex, usize>) {
        let mut own = 0;
        let mut foreign: BTreeMap<NodeIndex, usize> = BTreeMap::new();
        for field in graph.accessed_fields(method) {
            match graph.owner_of(field) {
                Some(owner) if owner == class => own += 1,
                Some(owner) => *foreign.entry(owner).or_insert(0) += 1,
                None => {}
            }
        }
        (own, foreign)
    }
}

impl Default for FeatureEnvyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for FeatureEnvyDetector {
    fn name(&self) -> &'static str {
        "FeatureEnvyDetector"
    }

    fn title(&self) -> &'static str {
        "Feature Envy"
    }

    fn description(&self) -> &'static str {
        "Detects methods more interested in another class's data than their own"
    }

    fn category(&self) -> &'static str {
        "coupling"
    }

    fn detect(&self, graph: &CodeGraph) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        for class in graph.classes() {
            let class_name = graph.name(class);
            for method in graph.owned_methods(class) {
                let (own, foreign) = Self::access_profile(graph, class, method);
                for (other, count) in foreign {
                    if count > own && count > 0 {
                        let envied = graph.name(other);
                        debug!("{}.{} envies {}", class_name, graph.name(method), envied);
                        findings.push(Finding::new(
                            self.name(),
                            format!("{}.{} → {}", class_name, graph.name(method), envied),
                            format!(
                                "ForeignAccess={}, OwnAccess={}, EnviedClass={}",
                                count, own, envied
                            ),
                        ));
                    }
                }
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::graph_of;
    use crate::models::{ClassModel, MethodModel};

    fn customer() -> ClassModel {
        ClassModel::new("Y").with_attributes(["street", "city", "zip", "phone"])
    }

    #[test]
    fn test_more_foreign_than_own_is_reported() {
        let graph = graph_of(vec![
            ClassModel::new("X")
                .with_attributes(["id"])
                .with_method(MethodModel::new("label").with_accesses(["id", "street", "city", "zip"])),
            customer(),
        ]);

        let findings = FeatureEnvyDetector::new().detect(&graph).expect("detect");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].entity, "X.label → Y");
        assert_eq!(
            findings[0].detail,
            "ForeignAccess=3, OwnAccess=1, EnviedClass=Y"
        );
    }

    #[test]
    fn test_equal_counts_not_reported() {
        let graph = graph_of(vec![
            ClassModel::new("X")
                .with_attributes(["id", "name"])
                .with_method(
                    MethodModel::new("balanced").with_accesses(["id", "name", "street", "city"]),
                ),
            customer(),
        ]);

        assert!(FeatureEnvyDetector::new().detect(&graph).expect("detect").is_empty());
    }

    #[test]
    fn test_no_accesses_not_reported() {
        let graph = graph_of(vec![
            ClassModel::new("X").with_method(MethodModel::new("idle")),
            customer(),
        ]);
        assert!(FeatureEnvyDetector::new().detect(&graph).expect("detect").is_empty());
    }
}
