//! Derived per-class metrics over the code graph

use super::store::CodeGraph;
use crate::models::MetricSet;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// Compute the metric set of one class node.
///
/// `wmc` weighs every method as one. `atfd` counts the ACCESSES edges from
/// owned methods to fields of other classes, so two methods reading the same
/// foreign field count twice. `tcc` only considers fields the class owns.
pub fn class_metrics(graph: &CodeGraph, class: NodeIndex) -> MetricSet {
    let methods = graph.owned_methods(class);
    let own_fields: HashSet<NodeIndex> = graph.owned_fields(class).into_iter().collect();

    let mut foreign_accesses = 0usize;
    let mut own_access_sets: Vec<HashSet<NodeIndex>> = Vec::with_capacity(methods.len());

    for &method in &methods {
        let mut own = HashSet::new();
        for field in graph.accessed_fields(method) {
            if own_fields.contains(&field) {
                own.insert(field);
            } else {
                foreign_accesses += 1;
            }
        }
        own_access_sets.push(own);
    }

    let method_count = methods.len() as u32;
    MetricSet {
        wmc: method_count,
        atfd: foreign_accesses as u32,
        tcc: tight_class_cohesion(&own_access_sets),
        method_count,
        attribute_count: own_fields.len() as u32,
    }
}

/// Fraction of unordered method pairs sharing at least one accessed field.
/// Zero with fewer than two methods.
pub fn tight_class_cohesion(access_sets: &[HashSet<NodeIndex>]) -> f64 {
    let n = access_sets.len();
    if n < 2 {
        return 0.0;
    }

    let mut connected = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if !access_sets[i].is_disjoint(&access_sets[j]) {
                connected += 1;
            }
        }
    }

    let pairs = n * (n - 1) / 2;
    connected as f64 / pairs as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::{CodeEdge, CodeNode};

    struct Fixture {
        graph: CodeGraph,
        class: NodeIndex,
    }

    /// One class with `fields` owned fields and one method per access list
    fn fixture(fields: &[&str], methods: &[&[&str]]) -> Fixture {
        let mut graph = CodeGraph::new();
        let class = graph.add_node(CodeNode::class("C"));
        let field_nodes: Vec<_> = fields
            .iter()
            .map(|f| {
                let idx = graph.add_node(CodeNode::field(f));
                graph.add_edge(class, idx, CodeEdge::owns_field());
                idx
            })
            .collect();
        for (i, accesses) in methods.iter().enumerate() {
            let m = graph.add_node(CodeNode::method(&format!("m{}", i)));
            graph.add_edge(class, m, CodeEdge::owns_method());
            for name in accesses.iter() {
                if let Some(pos) = fields.iter().position(|f| f == name) {
                    graph.add_edge(m, field_nodes[pos], CodeEdge::accesses());
                }
            }
        }
        Fixture { graph, class }
    }

    #[test]
    fn test_tcc_zero_for_single_method() {
        let f = fixture(&["a"], &[&["a"]]);
        assert_eq!(class_metrics(&f.graph, f.class).tcc, 0.0);
        let empty = fixture(&[], &[]);
        assert_eq!(class_metrics(&empty.graph, empty.class).tcc, 0.0);
    }

    #[test]
    fn test_tcc_two_methods() {
        let disjoint = fixture(&["a", "b"], &[&["a"], &["b"]]);
        assert_eq!(class_metrics(&disjoint.graph, disjoint.class).tcc, 0.0);

        let shared = fixture(&["a", "b"], &[&["a"], &["a", "b"]]);
        assert_eq!(class_metrics(&shared.graph, shared.class).tcc, 1.0);
    }

    #[test]
    fn test_tcc_partial() {
        // pairs: (0,1) share a, (0,2) none, (1,2) none
        let f = fixture(&["a", "b", "c"], &[&["a"], &["a"], &["c"]]);
        let tcc = class_metrics(&f.graph, f.class).tcc;
        assert!((tcc - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_counts_match_ownership_edges() {
        let f = fixture(&["a", "b"], &[&[], &[], &["a"]]);
        let m = class_metrics(&f.graph, f.class);
        assert_eq!(m.method_count as usize, f.graph.owned_methods(f.class).len());
        assert_eq!(m.attribute_count as usize, f.graph.owned_fields(f.class).len());
        assert_eq!(m.wmc, 3);
        assert_eq!(m.atfd, 0);
    }

    #[test]
    fn test_atfd_counts_foreign_access_edges() {
        let mut f = fixture(&["own"], &[&["own"], &[]]);
        let other = f.graph.add_node(CodeNode::class("Other"));
        let x = f.graph.add_node(CodeNode::field("x"));
        let y = f.graph.add_node(CodeNode::field("y"));
        f.graph.add_edge(other, x, CodeEdge::owns_field());
        f.graph.add_edge(other, y, CodeEdge::owns_field());

        let methods = f.graph.owned_methods(f.class);
        f.graph.add_edge(methods[0], x, CodeEdge::accesses());
        f.graph.add_edge(methods[1], x, CodeEdge::accesses());
        f.graph.add_edge(methods[1], y, CodeEdge::accesses());

        assert_eq!(class_metrics(&f.graph, f.class).atfd, 3);
    }

    #[test]
    fn test_atfd_counts_shared_foreign_field_per_method() {
        let mut f = fixture(&[], &[&[], &[]]);
        let data = f.graph.add_node(CodeNode::class("Data"));
        let fields: Vec<_> = ["x", "y", "z"]
            .iter()
            .map(|name| {
                let idx = f.graph.add_node(CodeNode::field(name));
                f.graph.add_edge(data, idx, CodeEdge::owns_field());
                idx
            })
            .collect();

        for method in f.graph.owned_methods(f.class) {
            for &field in &fields {
                f.graph.add_edge(method, field, CodeEdge::accesses());
            }
        }

        assert_eq!(class_metrics(&f.graph, f.class).atfd, 6);
        assert_eq!(class_metrics(&f.graph, data).atfd, 0);
    }
}
