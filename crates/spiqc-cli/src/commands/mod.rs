//! CLI commands

pub mod compare;
pub mod config;
pub mod evaluate;
pub mod report;

use std::path::Path;

use anyhow::{Context, Result};
use spiqc_eval::EvalConfig;

use crate::args::DEFAULT_CONFIG_FILE;

/// Resolve the evaluation config
///
/// An explicit path must exist. Without one, `./spiqc.toml` is used when
/// present and the compiled-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<EvalConfig> {
    match path {
        Some(path) => EvalConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::debug!("using {}", DEFAULT_CONFIG_FILE);
            EvalConfig::load(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_FILE))
        }
        None => Ok(EvalConfig::default()),
    }
}
