//! smellgraph - Graph-powered code smell detection for JVM artifacts
//!
//! Turns classes, sources, jars and jar-bearing executables into a
//! structural class model, builds a property graph of ownership,
//! inheritance, call and field-access relations, and evaluates ten code
//! smell rules over it.
//!
//! ```ignore
//! use smellgraph::detectors::create_default_engine;
//! use smellgraph::pipeline::{analyze_model, ProjectModelBuilder};
//!
//! let report = ProjectModelBuilder::default().build(Path::new("app.jar"))?;
//! let analysis = analyze_model(report.model, &create_default_engine(0, Vec::new()))?;
//! for result in &analysis.results {
//!     println!("{}: {}", result.title, result.findings.len());
//! }
//! ```

pub mod artifact;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod graph;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod reporters;
