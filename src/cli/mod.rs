//! CLI command definitions and handlers

mod analyze;
mod graph;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// smellgraph - Graph-powered code smell detection for JVM artifacts
#[derive(Parser, Debug)]
#[command(name = "smellgraph")]
#[command(
    version,
    about = "Graph-powered code smell detection for JVM classes, sources, jars and jar-bearing executables",
    long_about = "smellgraph extracts a structural model from compiled classes, source files, \
jar archives or executables with an embedded jar, builds a code graph of ownership, \
inheritance, call and field-access relations, and evaluates ten code smell rules over it.\n\n\
Run without a subcommand to analyze the current directory:\n  \
smellgraph .",
    after_help = "\
Examples:
  smellgraph .                               Analyze current directory
  smellgraph app.jar analyze --format json   JSON output for scripting
  smellgraph build/classes export -o m.json  Export the class model
  smellgraph analyze --model m.json          Re-analyze an exported model
  smellgraph lib/ stats                      Graph node and edge counts"
)]
pub struct Cli {
    /// Directory or single artifact to analyze (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64, default: config or automatic)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all ten smell rules and print the result lists
    #[command(after_help = "\
Examples:
  smellgraph analyze .                         Analyze current directory
  smellgraph analyze app.jar --format json     JSON output for scripting
  smellgraph analyze . -o report.txt           Write the report to a file
  smellgraph analyze --model model.json        Analyze an exported model")]
    Analyze {
        /// Output format: text, json (default: config or text)
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Analyze a previously exported interchange document instead of PATH
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Write the class model, metrics included, as an interchange document
    Export {
        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show class, method, field and edge counts of the code graph
    Stats {
        /// Read an exported interchange document instead of PATH
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Analyze {
            format,
            output,
            model,
        }) => analyze::run(
            &cli.path,
            format.as_deref(),
            output.as_deref(),
            model.as_deref(),
            cli.workers,
        ),

        Some(Commands::Export { output }) => {
            analyze::export(&cli.path, output.as_deref(), cli.workers)
        }

        Some(Commands::Stats { model }) => graph::stats(&cli.path, model.as_deref(), cli.workers),

        None => analyze::run(&cli.path, None, None, None, cli.workers),
    }
}

/// Write `content` to `output`, or to stdout when absent
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    use anyhow::Context;
    use console::style;

    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Written to {}", style("✓").green(), path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
