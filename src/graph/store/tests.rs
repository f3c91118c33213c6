use super::*;

#[test]
fn test_basic_operations() {
    let mut graph = CodeGraph::new();

    let class = graph.add_node(CodeNode::class("com.acme.Order"));
    let field = graph.add_node(CodeNode::field("total"));
    let method = graph.add_node(
        CodeNode::method("recalculate")
            .with_line_start(12)
            .with_property("complexity", 5),
    );
    graph.add_edge(class, field, CodeEdge::owns_field());
    graph.add_edge(class, method, CodeEdge::owns_method());

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.classes(), vec![class]);
    assert_eq!(graph.owned_fields(class), vec![field]);
    assert_eq!(graph.owned_methods(class), vec![method]);
    assert_eq!(graph.owner_of(method), Some(class));
    assert_eq!(graph.owner_of(class), None);

    let m = graph.node(method).expect("method node");
    assert_eq!(m.complexity(), 5);
    assert_eq!(m.loc(), 0);
    assert_eq!(graph.qualified_name(method), "com.acme.Order.recalculate");
}

#[test]
fn test_edges_in_insertion_order() {
    let mut graph = CodeGraph::new();
    let a = graph.add_node(CodeNode::method("a"));
    let b = graph.add_node(CodeNode::method("b"));
    let c = graph.add_node(CodeNode::method("c"));

    graph.add_edge(a, b, CodeEdge::calls());
    graph.add_edge(a, c, CodeEdge::calls());

    assert_eq!(graph.callees(a), vec![b, c]);
    assert_eq!(graph.callers(c), vec![a]);
    assert!(graph.accessed_fields(a).is_empty());
}

#[test]
fn test_add_edge_once() {
    let mut graph = CodeGraph::new();
    let a = graph.add_node(CodeNode::method("a"));
    let f = graph.add_node(CodeNode::field("f"));

    assert!(graph.add_edge_once(a, f, CodeEdge::accesses()));
    assert!(!graph.add_edge_once(a, f, CodeEdge::accesses()));
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_named_lookup_keeps_duplicates() {
    let mut graph = CodeGraph::new();
    let first = graph.add_node(CodeNode::class("dup.Name"));
    let second = graph.add_node(CodeNode::class("dup.Name"));
    graph.add_node(CodeNode::method("dup.Name"));

    assert_eq!(graph.named(NodeKind::Class, "dup.Name"), &[first, second]);
    assert_eq!(graph.named(NodeKind::Method, "dup.Name").len(), 1);
    assert!(graph.named(NodeKind::Field, "missing").is_empty());
}

#[test]
fn test_stats() {
    let mut graph = CodeGraph::new();
    let class = graph.add_node(CodeNode::class("A"));
    let m = graph.add_node(CodeNode::method("run"));
    graph.add_edge(class, m, CodeEdge::owns_method());
    graph.add_edge(m, m, CodeEdge::calls());

    let stats = graph.stats();
    assert_eq!(stats.get("Class"), Some(&1));
    assert_eq!(stats.get("Method"), Some(&1));
    assert_eq!(stats.get("Field"), Some(&0));
    assert_eq!(stats.get("OWNS_METHOD"), Some(&1));
    assert_eq!(stats.get("CALLS"), Some(&1));
    assert_eq!(stats.get("totalEdges"), Some(&2));
}
