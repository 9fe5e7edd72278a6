//! Python calculator units
//!
//! Each unit is a child interpreter running the embedded driver. The driver
//! imports the target, instantiates the calculator class and then answers
//! one JSON request per line on stdin with one JSON reply per line on stdout.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

use super::unit::{CalculatorUnit, Operation, Probe, Reply, UnitLauncher};
use crate::error::UnitError;

const DRIVER: &str = include_str!("driver.py");

#[derive(Debug, Clone)]
struct LaunchSettings {
    interpreter: String,
    path: PathBuf,
    class_name: String,
    call_timeout: Duration,
    launch_timeout: Duration,
}

/// Launches Python calculator units for one target file
#[derive(Debug, Clone)]
pub struct PythonLauncher {
    settings: Arc<LaunchSettings>,
}

impl PythonLauncher {
    pub fn new(
        interpreter: impl Into<String>,
        path: impl Into<PathBuf>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            settings: Arc::new(LaunchSettings {
                interpreter: interpreter.into(),
                path: path.into(),
                class_name: class_name.into(),
                call_timeout: Duration::from_secs(5),
                launch_timeout: Duration::from_secs(10),
            }),
        }
    }

    /// Set the per-call and startup time limits
    pub fn with_timeouts(mut self, call_timeout: Duration, launch_timeout: Duration) -> Self {
        let settings = Arc::make_mut(&mut self.settings);
        settings.call_timeout = call_timeout;
        settings.launch_timeout = launch_timeout;
        self
    }
}

#[async_trait]
impl UnitLauncher for PythonLauncher {
    async fn launch(&self) -> Result<Box<dyn CalculatorUnit>, UnitError> {
        let session = Session::start(&self.settings).await?;
        Ok(Box::new(PythonUnit {
            settings: Arc::clone(&self.settings),
            session: Some(session),
        }))
    }
}

/// A calculator unit backed by a child interpreter
///
/// After a timeout or a broken pipe the session is dropped, which kills
/// the child, and the next call starts a fresh one.
pub struct PythonUnit {
    settings: Arc<LaunchSettings>,
    session: Option<Session>,
}

#[async_trait]
impl CalculatorUnit for PythonUnit {
    async fn invoke(&mut self, op: Operation, args: &[&str]) -> Result<Probe, UnitError> {
        let mut session = match self.session.take() {
            Some(session) => session,
            None => {
                tracing::debug!("relaunching unit for {}", self.settings.path.display());
                Session::start(&self.settings).await?
            }
        };

        let request = serde_json::json!({ "op": op.method_name(), "args": args }).to_string();
        let wire = session
            .round_trip(&request, self.settings.call_timeout)
            .await?;

        // Only a clean exchange keeps the child around
        self.session = Some(session);
        Ok(wire.into_probe())
    }
}

struct Session {
    _child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

#[derive(Debug, Deserialize)]
struct Handshake {
    ready: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    ok: bool,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    repr: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    elapsed: Option<f64>,
    #[serde(default)]
    peak: Option<u64>,
}

impl WireReply {
    fn into_probe(self) -> Probe {
        let reply = if self.ok {
            match (self.value, self.repr) {
                (Some(value), _) => Reply::Text(value),
                (None, Some(repr)) => Reply::NonText(repr),
                (None, None) => Reply::NonText("None".to_string()),
            }
        } else {
            Reply::Raised(self.error.unwrap_or_default())
        };

        let probe = Probe::bare(reply);
        let elapsed = self
            .elapsed
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
        match (elapsed, self.peak) {
            (Some(elapsed), Some(peak)) => probe.with_measurements(elapsed, peak),
            _ => probe,
        }
    }
}

impl Session {
    async fn start(settings: &LaunchSettings) -> Result<Self, UnitError> {
        let mut cmd = Command::new(&settings.interpreter);
        cmd.arg("-u")
            .arg("-c")
            .arg(DRIVER)
            .arg(&settings.path)
            .arg(&settings.class_name)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| UnitError::Spawn(format!("{}: {}", settings.interpreter, e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| UnitError::Spawn("stdin was not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| UnitError::Spawn("stdout was not captured".to_string()))?;
        let mut stdout = BufReader::new(stdout).lines();

        let line = timeout(settings.launch_timeout, stdout.next_line())
            .await
            .map_err(|_| UnitError::Timeout(settings.launch_timeout))??
            .ok_or(UnitError::Closed)?;

        let handshake: Handshake = serde_json::from_str(&line)
            .map_err(|e| UnitError::Protocol(format!("{}: {}", e, line)))?;
        if !handshake.ready {
            return Err(UnitError::Instantiation(
                handshake
                    .error
                    .unwrap_or_else(|| "unit refused to start".to_string()),
            ));
        }

        Ok(Self {
            _child: child,
            stdin,
            stdout,
        })
    }

    async fn round_trip(&mut self, request: &str, limit: Duration) -> Result<WireReply, UnitError> {
        let exchange = async {
            self.stdin.write_all(request.as_bytes()).await?;
            self.stdin.write_all(b"\n").await?;
            self.stdin.flush().await?;

            let line = self.stdout.next_line().await?.ok_or(UnitError::Closed)?;
            let reply = serde_json::from_str::<WireReply>(&line)
                .map_err(|e| UnitError::Protocol(format!("{}: {}", e, line)))?;
            Ok::<_, UnitError>(reply)
        };

        timeout(limit, exchange)
            .await
            .map_err(|_| UnitError::Timeout(limit))?
    }
}
