//! Core data models for smellgraph
//!
//! These models are used throughout the codebase for representing
//! extracted classes, their derived metrics, and detector findings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Root of the type hierarchy, used when a class declares no superclass
pub const ROOT_TYPE: &str = "java.lang.Object";

/// Derived per-class metrics, written by the graph builder
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    /// Weighted methods per class (one unit per method)
    #[serde(default)]
    pub wmc: u32,
    /// Access to foreign data: distinct foreign fields touched by the class
    #[serde(default)]
    pub atfd: u32,
    /// Tight class cohesion in [0, 1]
    #[serde(default)]
    pub tcc: f64,
    #[serde(default)]
    pub method_count: u32,
    #[serde(default)]
    pub attribute_count: u32,
}

/// A method declared by a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodModel {
    pub name: String,
    /// Simple type names, in declaration order
    #[serde(default, rename = "parameters")]
    pub parameter_types: Vec<String>,
    /// Field names referenced from the body, own or foreign
    #[serde(default)]
    pub accessed_fields: Vec<String>,
    /// Method names invoked from the body
    #[serde(default)]
    pub called_methods: Vec<String>,
    #[serde(default, rename = "loc")]
    pub lines_of_code: u32,
    #[serde(default = "default_complexity", rename = "cc")]
    pub cyclomatic_complexity: u32,
    /// First source line, when debug information was present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<u32>,
}

fn default_complexity() -> u32 {
    1
}

impl MethodModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types: Vec::new(),
            accessed_fields: Vec::new(),
            called_methods: Vec::new(),
            lines_of_code: 0,
            cyclomatic_complexity: 1,
            line_start: None,
        }
    }

    pub fn with_parameters<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_types = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accesses<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accessed_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_calls<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.called_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size(mut self, loc: u32, cc: u32) -> Self {
        self.lines_of_code = loc;
        self.cyclomatic_complexity = cc.max(1);
        self
    }

    pub fn param_count(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Structural model of one compiled class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassModel {
    /// Fully-qualified name
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub methods: Vec<MethodModel>,
    #[serde(default)]
    pub super_class: Option<String>,
    #[serde(default)]
    pub interfaces: BTreeSet<String>,
    /// Computed during graph import; never authored by the extractor
    #[serde(default)]
    pub metrics: MetricSet,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
            super_class: Some(ROOT_TYPE.to_string()),
            interfaces: BTreeSet::new(),
            metrics: MetricSet::default(),
        }
    }

    pub fn with_attributes<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attrs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_super_class(mut self, name: impl Into<String>) -> Self {
        self.super_class = Some(name.into());
        self
    }

    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.insert(name.into());
        self
    }

    /// Simple (unqualified) class name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// All classes extracted in one analysis run, in discovery order.
///
/// Duplicates by qualified name are kept as separate entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemModel {
    pub classes: Vec<ClassModel>,
}

impl SystemModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: ClassModel) {
        self.classes.push(class);
    }

    pub fn extend(&mut self, other: SystemModel) {
        self.classes.extend(other.classes);
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

impl FromIterator<ClassModel> for SystemModel {
    fn from_iter<T: IntoIterator<Item = ClassModel>>(iter: T) -> Self {
        Self {
            classes: iter.into_iter().collect(),
        }
    }
}

/// A code smell finding: the offending entity plus supporting metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub detector: String,
    pub entity: String,
    pub detail: String,
}

impl Finding {
    pub fn new(detector: &str, entity: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            detector: detector.to_string(),
            entity: entity.into(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.entity, self.detail)
    }
}
