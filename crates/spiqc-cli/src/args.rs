//! CLI argument definitions using clap
//!
//! - spiqc evaluate <TARGET>        # Score a target
//! - spiqc report <RESULTS>         # Re-render a saved report
//! - spiqc compare <A> <B>          # Compare two targets or reports
//! - spiqc config init|show         # Manage the config file

use clap::{Parser, Subcommand};
use spiqc_eval::ReportFormat;
use std::path::PathBuf;

/// Default configuration file name used across all CLI commands.
pub const DEFAULT_CONFIG_FILE: &str = "spiqc.toml";

#[derive(Parser, Debug)]
#[command(name = "spiqc")]
#[command(about = "SPI-QC - four-dimension quality evaluator for calculator code")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a target file and print its report
    Evaluate {
        /// Python source exposing the calculator class
        target: PathBuf,

        /// Path to configuration file (defaults to ./spiqc.toml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Also save the JSON report to this path
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Output format: table, markdown or json
        #[arg(long, short, default_value = "table")]
        format: ReportFormat,
    },

    /// Render a previously saved JSON report
    Report {
        /// JSON report written by `evaluate --output`
        results: PathBuf,

        /// Output format: table, markdown or json
        #[arg(long, short, default_value = "table")]
        format: ReportFormat,
    },

    /// Compare two versions; `.json` arguments are read as saved reports
    Compare {
        /// Baseline target or report
        baseline: PathBuf,

        /// Candidate target or report
        candidate: PathBuf,

        /// Path to configuration file (defaults to ./spiqc.toml when present)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Create a new configuration file with defaults
    Init {
        /// Path for the new configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },
}
