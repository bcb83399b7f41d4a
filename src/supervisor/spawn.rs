//! Agent process spawning.
//!
//! Builds the `tokio::process::Command` for the external agent with all
//! three stdio streams piped (never inherited from the host console),
//! the configured environment overrides injected on top of the inherited
//! environment, and `kill_on_drop(true)` so an abandoned handle cannot
//! leak the process. On POSIX the child is placed in its own process
//! group so termination can take the full descendant tree with it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::info;

use crate::{AppError, Result};

/// Configuration for spawning the agent process.
#[derive(Debug, Clone)]
pub struct SpawnConfig {
    /// Interpreter or binary to launch (e.g. `python`).
    pub executable: String,
    /// Script path passed as the first argument, if any.
    pub script: Option<PathBuf>,
    /// Additional arguments appended after the script path.
    pub args: Vec<String>,
    /// Working directory the agent starts in. Must exist.
    pub working_dir: PathBuf,
    /// Environment variables injected on top of the inherited environment.
    pub env: HashMap<String, String>,
}

/// A freshly spawned agent with its captured stdio streams.
#[derive(Debug)]
pub(crate) struct SpawnedAgent {
    pub child: Child,
    pub stdin: ChildStdin,
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

/// Spawn the agent process described by `config`.
///
/// # Errors
///
/// Returns [`AppError::Spawn`] when the working directory does not
/// exist, the executable cannot be launched, or a stdio pipe could not
/// be captured. Spawn failures are fatal to this launch attempt and are
/// never retried here.
pub(crate) fn spawn_agent(config: &SpawnConfig) -> Result<SpawnedAgent> {
    if !config.working_dir.is_dir() {
        return Err(AppError::Spawn(format!(
            "working directory does not exist: {}",
            config.working_dir.display()
        )));
    }

    let mut cmd = Command::new(&config.executable);

    if let Some(ref script) = config.script {
        cmd.arg(script);
    }
    cmd.args(&config.args);

    for (key, value) in &config.env {
        cmd.env(key, value);
    }

    cmd.current_dir(&config.working_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // Own process group, so terminate() can signal the whole tree.
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = cmd.spawn().map_err(|err| {
        AppError::Spawn(format!(
            "failed to spawn agent `{}`: {err}",
            config.executable
        ))
    })?;

    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| AppError::Spawn("failed to capture agent stdin".into()))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::Spawn("failed to capture agent stdout".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AppError::Spawn("failed to capture agent stderr".into()))?;

    info!(
        executable = config.executable,
        script = ?config.script,
        pid = child.id(),
        working_dir = %config.working_dir.display(),
        "agent process spawned"
    );

    Ok(SpawnedAgent {
        child,
        stdin,
        stdout,
        stderr,
    })
}
