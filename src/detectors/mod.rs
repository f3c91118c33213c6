//! Code smell detectors
//!
//! This module provides the detector framework and the ten rules evaluated
//! over the frozen code graph.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DetectorEngine                          │
//! │  - Registers detectors in rule order                        │
//! │  - Runs detectors in parallel (rayon)                       │
//! │  - Isolates failures and panics per detector                │
//! │  - Returns one result per detector, in registration order   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Detector Trait                         │
//! │  - name(): Unique identifier                                │
//! │  - title(): Heading of the result list                      │
//! │  - detect(graph): Read-only query, returns findings         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//! ┌──────────────────┐ ┌──────────────┐ ┌──────────────────┐
//! │ Metric-based     │ │ Method-level │ │ Relation-based   │
//! │ (GodClass,       │ │ (LongMethod, │ │ (FeatureEnvy,    │
//! │  LargeClass,     │ │  LongParam,  │ │  MiddleMan,      │
//! │  Divergent)      │ │  DataClass)  │ │  Chains, Surgery)│
//! └──────────────────┘ └──────────────┘ └──────────────────┘
//! ```
//!
//! Thresholds are fixed. Each detector keeps them in a `*Thresholds`
//! struct whose `Default` holds the values.
//!
//! # Usage
//!
//! ```ignore
//! use smellgraph::detectors::{default_detectors, DetectorEngineBuilder};
//!
//! let engine = DetectorEngineBuilder::new()
//!     .workers(4)
//!     .detectors(default_detectors())
//!     .disabled(["message-chains".to_string()])
//!     .build();
//!
//! let (results, summary) = engine.run(&graph)?;
//! ```

mod base;
mod engine;

mod data_class;
mod divergent_change;
mod feature_envy;
mod god_class;
mod large_class;
mod long_methods;
mod long_parameter;
mod message_chain;
mod middle_man;
mod shotgun_surgery;

pub use base::{DetectionSummary, Detector, DetectorResult};
pub use engine::{DetectorEngine, DetectorEngineBuilder};

pub use data_class::{DataClassDetector, DataClassThresholds};
pub use divergent_change::{DivergentChangeDetector, DivergentChangeThresholds};
pub use feature_envy::FeatureEnvyDetector;
pub use god_class::{GodClassDetector, GodClassThresholds};
pub use large_class::{LargeClassDetector, LargeClassThresholds};
pub use long_methods::{LongMethodThresholds, LongMethodsDetector};
pub use long_parameter::{LongParameterListDetector, LongParameterThresholds};
pub use message_chain::MessageChainDetector;
pub use middle_man::{MiddleManDetector, MiddleManThresholds};
pub use shotgun_surgery::{ShotgunSurgeryDetector, ShotgunSurgeryThresholds};

use std::sync::Arc;

/// All ten rules, in reporting order
pub fn default_detectors() -> Vec<Arc<dyn Detector>> {
    vec![
        Arc::new(GodClassDetector::new()),
        Arc::new(LargeClassDetector::new()),
        Arc::new(LongMethodsDetector::new()),
        Arc::new(LongParameterListDetector::new()),
        Arc::new(FeatureEnvyDetector::new()),
        Arc::new(DataClassDetector::new()),
        Arc::new(MiddleManDetector::new()),
        Arc::new(MessageChainDetector::new()),
        Arc::new(ShotgunSurgeryDetector::new()),
        Arc::new(DivergentChangeDetector::new()),
    ]
}

/// Create an engine with the default detectors, minus the disabled keys
pub fn create_default_engine(
    workers: usize,
    disabled: impl IntoIterator<Item = String>,
) -> DetectorEngine {
    DetectorEngineBuilder::new()
        .workers(workers)
        .detectors(default_detectors())
        .disabled(disabled)
        .build()
}
