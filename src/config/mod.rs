//! Project-level configuration support
//!
//! Loads per-project configuration from `smellgraph.toml` in the analysed
//! root directory, or in the parent directory when the root is a single
//! artifact.
//!
//! # Configuration Format
//!
//! ```toml
//! # smellgraph.toml
//!
//! [defaults]
//! format = "text"
//! workers = 8
//!
//! [compiler]
//! program = "javac"
//! timeout_secs = 60
//!
//! [exclude]
//! paths = ["build/tmp/", "target/"]
//!
//! [detectors.message-chains]
//! enabled = false
//! ```
//!
//! Detection thresholds are fixed; a detector table can only switch the
//! whole rule off.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "smellgraph.toml";

/// Project-level configuration loaded from smellgraph.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Per-detector switches, keyed by config key (e.g. `god-class`)
    #[serde(default)]
    pub detectors: HashMap<String, DetectorToggle>,

    /// External compiler settings for source units
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Path exclusion prefixes
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Configuration for a specific detector
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DetectorToggle {
    /// Whether the detector is enabled (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Compiler invoked for source artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_compiler_program")]
    pub program: String,
    #[serde(default = "default_compiler_timeout")]
    pub timeout_secs: u64,
}

fn default_compiler_program() -> String {
    "javac".to_string()
}

fn default_compiler_timeout() -> u64 {
    60
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_compiler_program(),
            timeout_secs: default_compiler_timeout(),
        }
    }
}

/// Path exclusion configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExcludeConfig {
    /// Path prefixes, relative to the analysed root
    #[serde(default)]
    pub paths: Vec<String>,
}

impl ExcludeConfig {
    /// Check if a path relative to the analysed root is excluded
    pub fn should_exclude(&self, relative: &Path) -> bool {
        let path_str = relative.to_string_lossy().replace('\\', "/");
        self.paths
            .iter()
            .any(|prefix| path_str.starts_with(prefix.as_str()))
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Default number of workers
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Load project configuration for an analysis root.
///
/// A directory root is searched directly; a file root is searched in its
/// parent. A missing file yields the defaults; a malformed one is logged
/// and also yields the defaults.
pub fn load_project_config(root: &Path) -> ProjectConfig {
    let dir = if root.is_dir() {
        root
    } else {
        root.parent().unwrap_or(root)
    };

    let toml_path = dir.join(CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid TOML in {}", path.display()))?;
    Ok(config)
}

impl ProjectConfig {
    /// Config keys of every detector switched off
    pub fn disabled_detectors(&self) -> Vec<String> {
        let mut disabled: Vec<String> = self
            .detectors
            .iter()
            .filter(|(_, c)| c.enabled == Some(false))
            .map(|(k, _)| normalize_detector_key(k))
            .collect();
        disabled.sort();
        disabled
    }
}

/// Normalize a detector key for lookup: `Message_Chains` → `message-chains`
pub fn normalize_detector_key(key: &str) -> String {
    key.trim().to_lowercase().replace(['_', ' '], "-")
}
