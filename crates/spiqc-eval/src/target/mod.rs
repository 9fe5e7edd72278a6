//! Target loading
//!
//! A [`Target`] pairs an immutable snapshot of the source text with a
//! launcher for its executable side. Loading checks that some class in the
//! source exposes the full calculator interface; instantiation is deferred to
//! the scorers that need a live unit.

mod python;
#[cfg(test)]
pub(crate) mod scripted;
mod unit;

pub use python::{PythonLauncher, PythonUnit};
pub use unit::{CalculatorUnit, Operation, Probe, Reply, UnitLauncher};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{LoadError, UnitError};
use crate::runner::EvalConfig;
use crate::syntax::{Declaration, Outline};

/// The program under evaluation
#[derive(Clone)]
pub struct Target {
    path: PathBuf,
    source: Arc<str>,
    class_name: String,
    launcher: Arc<dyn UnitLauncher>,
}

impl std::fmt::Debug for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("path", &self.path)
            .field("class_name", &self.class_name)
            .field("source_len", &self.source.len())
            .finish()
    }
}

impl Target {
    /// Build a target from in-memory source
    ///
    /// Runs the same capability check as [`TargetLoader::load`]. Line
    /// endings are normalized to `\n`.
    pub fn from_source(
        path: impl Into<PathBuf>,
        source: impl Into<Arc<str>>,
        launcher: Arc<dyn UnitLauncher>,
    ) -> Result<Self, LoadError> {
        let path = path.into();
        let source = normalize_newlines(source.into());
        let class_name = check_capabilities(&path, &source)?;
        Ok(Self {
            path,
            source,
            class_name,
            launcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw source text as read at load time
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the class that satisfied the capability check
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Start a fresh calculator unit
    pub async fn instantiate(&self) -> Result<Box<dyn CalculatorUnit>, UnitError> {
        self.launcher.launch().await
    }
}

/// Loads targets from disk with Python launchers built from the config
pub struct TargetLoader {
    interpreter: String,
    unit_class: String,
    call_timeout: std::time::Duration,
    launch_timeout: std::time::Duration,
}

impl TargetLoader {
    pub fn new(config: &EvalConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            unit_class: config.unit_class.clone(),
            call_timeout: config.call_timeout,
            launch_timeout: config.launch_timeout,
        }
    }

    /// Read the target file and verify its calculator interface
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<Target, LoadError> {
        let path = path.as_ref().to_path_buf();
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => LoadError::NotFound { path: path.clone() },
                _ => LoadError::Unreadable {
                    path: path.clone(),
                    source,
                },
            })?;

        tracing::debug!("loaded {} ({} bytes)", path.display(), source.len());

        let launcher = PythonLauncher::new(&self.interpreter, &path, &self.unit_class)
            .with_timeouts(self.call_timeout, self.launch_timeout);
        let target = Target::from_source(path, source, Arc::new(launcher))?;
        if target.class_name() != self.unit_class {
            tracing::warn!(
                "{} defines the calculator interface on class {}, but {} will be instantiated",
                target.path().display(),
                target.class_name(),
                self.unit_class
            );
        }
        Ok(target)
    }
}

/// Translate `\r\n` and lone `\r` to `\n`, as text-mode reads do
fn normalize_newlines(source: Arc<str>) -> Arc<str> {
    if !source.contains('\r') {
        return source;
    }
    source.replace("\r\n", "\n").replace('\r', "\n").into()
}

/// Find the class exposing every required operation
///
/// Returns the class name, or the operations missing from the closest
/// candidate.
fn check_capabilities(path: &Path, source: &str) -> Result<String, LoadError> {
    let required: Vec<&str> = Operation::REQUIRED
        .iter()
        .map(|op| op.method_name())
        .collect();

    let missing_from = |class: &Declaration| -> Vec<String> {
        required
            .iter()
            .filter(|name| !class.methods.iter().any(|m| m == *name))
            .map(|name| name.to_string())
            .collect()
    };

    let outline = Outline::parse(source).ok();
    let mut best: Option<Vec<String>> = None;

    for class in outline.iter().flat_map(|o| o.classes()) {
        let missing = missing_from(class);
        if missing.is_empty() {
            return Ok(class.name.clone());
        }
        if best.as_ref().is_none_or(|b| missing.len() < b.len()) {
            best = Some(missing);
        }
    }

    Err(LoadError::MissingCapability {
        path: path.to_path_buf(),
        missing: best.unwrap_or_else(|| required.iter().map(|s| s.to_string()).collect()),
    })
}
