//! Code graph for smell detection
//!
//! Pure Rust property graph using petgraph. Classes, fields and methods are
//! nodes; ownership, inheritance, calls and field accesses are typed edges.
//! The graph is rebuilt from scratch for every analysis run.

pub mod importer;
pub mod metrics;
pub mod store;
pub mod store_models;

pub use importer::import_model;
pub use metrics::{class_metrics, tight_class_cohesion};
pub use store::CodeGraph;
pub use store_models::{CodeEdge, CodeNode, EdgeKind, NodeKind};

pub use petgraph::graph::NodeIndex;
