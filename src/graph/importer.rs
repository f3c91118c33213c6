//! SystemModel → CodeGraph import
//!
//! Import runs in stages, each one complete over the whole model before the
//! next starts, so name resolution always sees every node:
//!
//! 1. class nodes
//! 2. field nodes + OWNS_FIELD
//! 3. method nodes + OWNS_METHOD, then EXTENDS / IMPLEMENTS by class name
//! 4. CALLS by bare method name
//! 5. ACCESSES by bare field name
//! 6. per-class metrics, written to the class node and back into the model
//!
//! Names that resolve to nothing produce no edge.

use super::metrics::class_metrics;
use super::store::{CodeEdge, CodeGraph, CodeNode, NodeKind};
use crate::models::SystemModel;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;
use tracing::{debug, info};

/// Build a fresh graph from `model` and fill in each class's metrics.
pub fn import_model(model: &mut SystemModel) -> CodeGraph {
    let mut graph = CodeGraph::new();

    // 1. classes
    let class_nodes: Vec<NodeIndex> = model
        .classes
        .iter()
        .map(|class| graph.add_node(CodeNode::class(&class.name)))
        .collect();

    // 2. fields
    for (class, &class_idx) in model.classes.iter().zip(&class_nodes) {
        for attribute in &class.attributes {
            let field = graph.add_node(CodeNode::field(attribute));
            graph.add_edge(class_idx, field, CodeEdge::owns_field());
        }
    }

    // 3. methods
    let mut method_nodes: Vec<Vec<NodeIndex>> = Vec::with_capacity(model.classes.len());
    for (class, &class_idx) in model.classes.iter().zip(&class_nodes) {
        let mut owned = Vec::with_capacity(class.methods.len());
        for method in &class.methods {
            let node = CodeNode::method(&method.name)
                .with_line_start(method.line_start.unwrap_or(0))
                .with_property("paramCount", method.param_count() as i64)
                .with_property("loc", method.lines_of_code as i64)
                .with_property("complexity", method.cyclomatic_complexity.max(1) as i64);
            let idx = graph.add_node(node);
            graph.add_edge(class_idx, idx, CodeEdge::owns_method());
            owned.push(idx);
        }
        method_nodes.push(owned);
    }

    for (class, &class_idx) in model.classes.iter().zip(&class_nodes) {
        if let Some(super_name) = &class.super_class {
            for &target in graph.named(NodeKind::Class, super_name).to_vec().iter() {
                graph.add_edge_once(class_idx, target, CodeEdge::extends());
            }
        }
        for interface in &class.interfaces {
            for &target in graph.named(NodeKind::Class, interface).to_vec().iter() {
                graph.add_edge_once(class_idx, target, CodeEdge::implements());
            }
        }
    }

    // 4. calls
    let mut calls = 0usize;
    for (class, owned) in model.classes.iter().zip(&method_nodes) {
        for (method, &source) in class.methods.iter().zip(owned) {
            for name in unique(&method.called_methods) {
                for &target in graph.named(NodeKind::Method, name).to_vec().iter() {
                    if graph.add_edge_once(source, target, CodeEdge::calls()) {
                        calls += 1;
                    }
                }
            }
        }
    }

    // 5. accesses
    let mut accesses = 0usize;
    for (class, owned) in model.classes.iter().zip(&method_nodes) {
        for (method, &source) in class.methods.iter().zip(owned) {
            for name in unique(&method.accessed_fields) {
                for &target in graph.named(NodeKind::Field, name).to_vec().iter() {
                    if graph.add_edge_once(source, target, CodeEdge::accesses()) {
                        accesses += 1;
                    }
                }
            }
        }
    }
    debug!("Resolved {} CALLS and {} ACCESSES edges", calls, accesses);

    // 6. metrics
    for (class, &class_idx) in model.classes.iter_mut().zip(&class_nodes) {
        let metrics = class_metrics(&graph, class_idx);
        if let Some(node) = graph.node_mut(class_idx) {
            node.set_property("wmc", metrics.wmc);
            node.set_property("atfd", metrics.atfd);
            node.set_property("tcc", metrics.tcc);
            node.set_property("methodCount", metrics.method_count);
            node.set_property("attributeCount", metrics.attribute_count);
        }
        class.metrics = metrics;
    }

    info!(
        "Imported {} classes into graph ({} nodes, {} edges)",
        class_nodes.len(),
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

/// Names in first-seen order, each once
fn unique(names: &[String]) -> impl Iterator<Item = &str> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(String::as_str)
        .filter(move |name| seen.insert(*name))
}
