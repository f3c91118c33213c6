//! Graph statistics command

use super::analyze::load_model;
use crate::config::load_project_config;
use crate::graph::{import_model, EdgeKind};

use anyhow::Result;
use console::style;
use std::path::Path;

/// Print node and edge counts of the code graph built for `path`
pub fn stats(path: &Path, model_file: Option<&Path>, workers: Option<usize>) -> Result<()> {
    let config = load_project_config(path);
    let workers = workers.or(config.defaults.workers).unwrap_or(0);

    let mut loaded = load_model(path, model_file, &config, workers)?;
    let graph = import_model(&mut loaded.model);
    let stats = graph.stats();
    let count = |key: &str| stats.get(key).copied().unwrap_or(0);

    println!("\n{} Graph Statistics\n", style("smellgraph").bold());

    // Node counts
    println!("  {}: {}", style("Classes").cyan(), style(count("Class")).bold());
    println!("  {}: {}", style("Methods").cyan(), style(count("Method")).bold());
    println!("  {}: {}", style("Fields").cyan(), style(count("Field")).bold());

    // Edge counts by type
    println!();
    for kind in EdgeKind::ALL {
        println!(
            "  {} edges: {}",
            style(kind.as_str()).cyan(),
            style(count(kind.as_str())).bold()
        );
    }

    println!();
    println!("  Total nodes: {}", style(count("totalNodes")).bold());
    println!("  Total edges: {}", style(count("totalEdges")).bold());
    println!(
        "  Skipped/failed artifacts: {}",
        style(loaded.skipped + loaded.failed.len()).bold()
    );

    Ok(())
}
