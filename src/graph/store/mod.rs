//! In-memory property graph built with petgraph
//!
//! One `CodeGraph` is owned by one analysis run. It is populated by the
//! importer and then only read; detectors share it by reference across
//! threads, so no interior locking is needed.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeMap, HashMap};

pub use super::store_models::{CodeEdge, CodeNode, EdgeKind, NodeKind};

/// Directed property graph of classes, fields and methods
#[derive(Debug, Default)]
pub struct CodeGraph {
    graph: DiGraph<CodeNode, CodeEdge>,
    /// Name lookup per node kind; values are in insertion order
    by_name: HashMap<(NodeKind, String), Vec<NodeIndex>>,
}

impl CodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Mutation ====================

    pub fn add_node(&mut self, node: CodeNode) -> NodeIndex {
        let key = (node.kind, node.name.clone());
        let idx = self.graph.add_node(node);
        self.by_name.entry(key).or_default().push(idx);
        idx
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: CodeEdge) {
        self.graph.add_edge(from, to, edge);
    }

    /// Add an edge unless one of the same kind already joins the pair
    pub fn add_edge_once(&mut self, from: NodeIndex, to: NodeIndex, edge: CodeEdge) -> bool {
        if self.has_edge(from, to, edge.kind) {
            return false;
        }
        self.graph.add_edge(from, to, edge);
        true
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> Option<&mut CodeNode> {
        self.graph.node_weight_mut(idx)
    }

    // ==================== Node queries ====================

    pub fn node(&self, idx: NodeIndex) -> Option<&CodeNode> {
        self.graph.node_weight(idx)
    }

    /// Name of a node, empty when the index is foreign to this graph
    pub fn name(&self, idx: NodeIndex) -> &str {
        self.node(idx).map(|n| n.name.as_str()).unwrap_or("")
    }

    /// All nodes of one kind, in insertion order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].kind == kind)
            .collect()
    }

    pub fn classes(&self) -> Vec<NodeIndex> {
        self.nodes_of_kind(NodeKind::Class)
    }

    pub fn methods(&self) -> Vec<NodeIndex> {
        self.nodes_of_kind(NodeKind::Method)
    }

    pub fn fields(&self) -> Vec<NodeIndex> {
        self.nodes_of_kind(NodeKind::Field)
    }

    /// Every node of `kind` carrying exactly `name`
    pub fn named(&self, kind: NodeKind, name: &str) -> &[NodeIndex] {
        self.by_name
            .get(&(kind, name.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ==================== Edge queries ====================

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex, kind: EdgeKind) -> bool {
        self.graph
            .edges_connecting(from, to)
            .any(|e| e.weight().kind == kind)
    }

    /// Targets of `kind` edges leaving `idx`, in insertion order
    pub fn outgoing(&self, idx: NodeIndex, kind: EdgeKind) -> Vec<NodeIndex> {
        self.neighbors(idx, kind, Direction::Outgoing)
    }

    /// Sources of `kind` edges entering `idx`, in insertion order
    pub fn incoming(&self, idx: NodeIndex, kind: EdgeKind) -> Vec<NodeIndex> {
        self.neighbors(idx, kind, Direction::Incoming)
    }

    fn neighbors(&self, idx: NodeIndex, kind: EdgeKind, dir: Direction) -> Vec<NodeIndex> {
        // petgraph walks adjacency newest-first; sort by edge id instead
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, dir)
            .filter(|e| e.weight().kind == kind)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, other)| other).collect()
    }

    pub fn owned_methods(&self, class: NodeIndex) -> Vec<NodeIndex> {
        self.outgoing(class, EdgeKind::OwnsMethod)
    }

    pub fn owned_fields(&self, class: NodeIndex) -> Vec<NodeIndex> {
        self.outgoing(class, EdgeKind::OwnsField)
    }

    /// Owning class of a field or method node
    pub fn owner_of(&self, member: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(member, Direction::Incoming)
            .find(|e| matches!(e.weight().kind, EdgeKind::OwnsField | EdgeKind::OwnsMethod))
            .map(|e| e.source())
    }

    pub fn callees(&self, method: NodeIndex) -> Vec<NodeIndex> {
        self.outgoing(method, EdgeKind::Calls)
    }

    pub fn callers(&self, method: NodeIndex) -> Vec<NodeIndex> {
        self.incoming(method, EdgeKind::Calls)
    }

    pub fn accessed_fields(&self, method: NodeIndex) -> Vec<NodeIndex> {
        self.outgoing(method, EdgeKind::Accesses)
    }

    /// `Owner.member` for fields and methods, the plain name otherwise
    pub fn qualified_name(&self, idx: NodeIndex) -> String {
        match self.owner_of(idx) {
            Some(owner) => format!("{}.{}", self.name(owner), self.name(idx)),
            None => self.name(idx).to_string(),
        }
    }

    // ==================== Statistics ====================

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edge_count_of(&self, kind: EdgeKind) -> usize {
        self.graph
            .edge_references()
            .filter(|e| e.weight().kind == kind)
            .count()
    }

    /// Node and edge counts per kind
    pub fn stats(&self) -> BTreeMap<String, i64> {
        let mut stats = BTreeMap::new();
        for kind in [NodeKind::Class, NodeKind::Field, NodeKind::Method] {
            stats.insert(
                kind.as_str().to_string(),
                self.nodes_of_kind(kind).len() as i64,
            );
        }
        for kind in EdgeKind::ALL {
            stats.insert(kind.as_str().to_string(), self.edge_count_of(kind) as i64);
        }
        stats.insert("totalNodes".to_string(), self.node_count() as i64);
        stats.insert("totalEdges".to_string(), self.edge_count() as i64);
        stats
    }
}

#[cfg(test)]
mod tests;
