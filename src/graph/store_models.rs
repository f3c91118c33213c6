use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Node types in the code graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    Field,
    Method,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Class => "Class",
            NodeKind::Field => "Field",
            NodeKind::Method => "Method",
        }
    }
}

/// A node in the code graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeNode {
    pub kind: NodeKind,
    /// Qualified name for classes, bare name for fields and methods
    pub name: String,
    pub line_start: u32,
    pub properties: HashMap<String, serde_json::Value>,
}

impl CodeNode {
    pub fn new(kind: NodeKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            line_start: 0,
            properties: HashMap::new(),
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(NodeKind::Class, name)
    }

    pub fn field(name: &str) -> Self {
        Self::new(NodeKind::Field, name)
    }

    pub fn method(name: &str) -> Self {
        Self::new(NodeKind::Method, name)
    }

    pub fn with_line_start(mut self, line: u32) -> Self {
        self.line_start = line;
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.properties.insert(key.to_string(), value.into());
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.properties.get(key).and_then(|v| v.as_i64())
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(|v| v.as_f64())
    }

    /// Lines of code (methods)
    pub fn loc(&self) -> i64 {
        self.get_i64("loc").unwrap_or(0)
    }

    /// Cyclomatic complexity (methods)
    pub fn complexity(&self) -> i64 {
        self.get_i64("complexity").unwrap_or(1)
    }

    /// Parameter count (methods)
    pub fn param_count(&self) -> i64 {
        self.get_i64("paramCount").unwrap_or(0)
    }
}

/// Edge types in the code graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    OwnsField,
    OwnsMethod,
    Extends,
    Implements,
    Calls,
    Accesses,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 6] = [
        EdgeKind::OwnsField,
        EdgeKind::OwnsMethod,
        EdgeKind::Extends,
        EdgeKind::Implements,
        EdgeKind::Calls,
        EdgeKind::Accesses,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::OwnsField => "OWNS_FIELD",
            EdgeKind::OwnsMethod => "OWNS_METHOD",
            EdgeKind::Extends => "EXTENDS",
            EdgeKind::Implements => "IMPLEMENTS",
            EdgeKind::Calls => "CALLS",
            EdgeKind::Accesses => "ACCESSES",
        }
    }
}

/// An edge in the code graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeEdge {
    pub kind: EdgeKind,
}

impl CodeEdge {
    pub fn new(kind: EdgeKind) -> Self {
        Self { kind }
    }

    pub fn owns_field() -> Self {
        Self::new(EdgeKind::OwnsField)
    }

    pub fn owns_method() -> Self {
        Self::new(EdgeKind::OwnsMethod)
    }

    pub fn extends() -> Self {
        Self::new(EdgeKind::Extends)
    }

    pub fn implements() -> Self {
        Self::new(EdgeKind::Implements)
    }

    pub fn calls() -> Self {
        Self::new(EdgeKind::Calls)
    }

    pub fn accesses() -> Self {
        Self::new(EdgeKind::Accesses)
    }
}
