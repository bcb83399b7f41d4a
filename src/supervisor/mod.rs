//! Agent process lifecycle owner.
//!
//! The [`Supervisor`] is an explicitly owned resource injected into the
//! bridge at construction — there is no module-level singleton. It
//! spawns at most one agent process at a time, tracks its liveness,
//! drains its stderr, reports unexpected exits through the bridge event
//! channel, and tears down the whole process tree on termination.
//!
//! The supervisor never restarts a crashed agent on its own: a silent
//! respawn could duplicate side effects the agent was mid-way through.
//! Reconnecting is a user-initiated action.

mod kill;
mod monitor;
mod spawn;
mod stderr;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::process::{ChildStdin, ChildStdout};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub use spawn::SpawnConfig;

use crate::bridge::BridgeEvent;
use crate::{AppError, Result};

/// Stdio streams of a running agent, handed to the bridge's codec tasks.
#[derive(Debug)]
pub struct AgentStreams {
    /// Agent's stdin, for the writer task.
    pub stdin: ChildStdin,
    /// Agent's stdout, for the reader task.
    pub stdout: ChildStdout,
}

/// Bookkeeping for the currently running agent process.
#[derive(Debug)]
struct RunningAgent {
    pid: Option<u32>,
    alive: Arc<AtomicBool>,
    cancel: CancellationToken,
    monitor: JoinHandle<()>,
    stderr_drain: JoinHandle<()>,
}

/// Owner of the agent process lifecycle.
#[derive(Debug)]
pub struct Supervisor {
    config: SpawnConfig,
    running: Option<RunningAgent>,
}

impl Supervisor {
    /// Create a supervisor for the given spawn configuration. No process
    /// is started until [`Supervisor::start`].
    #[must_use]
    pub fn new(config: SpawnConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    /// Spawn the agent process and its monitoring tasks.
    ///
    /// Unexpected exits are reported through `event_tx` as exactly one
    /// [`BridgeEvent::AgentExited`]. Stderr is drained and logged, never
    /// parsed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Spawn`] if an agent is already running, the
    /// working directory is invalid, or the process cannot be launched.
    pub fn start(&mut self, event_tx: mpsc::Sender<BridgeEvent>) -> Result<AgentStreams> {
        if self.is_alive() {
            return Err(AppError::Spawn("agent process already running".into()));
        }

        let spawned = spawn::spawn_agent(&self.config)?;
        let pid = spawned.child.id();
        let alive = Arc::new(AtomicBool::new(true));
        let cancel = CancellationToken::new();

        let monitor = monitor::monitor_exit(
            spawned.child,
            event_tx,
            Arc::clone(&alive),
            cancel.child_token(),
        );
        let stderr_drain = stderr::drain_stderr(spawned.stderr, cancel.child_token());

        self.running = Some(RunningAgent {
            pid,
            alive,
            cancel,
            monitor,
            stderr_drain,
        });

        Ok(AgentStreams {
            stdin: spawned.stdin,
            stdout: spawned.stdout,
        })
    }

    /// Whether the agent process is currently alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| running.alive.load(Ordering::SeqCst))
    }

    /// Process ID of the running agent, if any.
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.running.as_ref().and_then(|running| running.pid)
    }

    /// Forcefully terminate the agent and its descendant tree.
    ///
    /// Idempotent: calling it twice, or on an already-exited process, is
    /// a no-op. Host-initiated termination emits no
    /// [`BridgeEvent::AgentExited`] — the monitor is cancelled first.
    pub async fn terminate(&mut self) {
        let Some(running) = self.running.take() else {
            debug!("terminate: no agent process attached");
            return;
        };

        // Cancel before killing so an intentional shutdown never
        // surfaces as a disconnect event.
        running.cancel.cancel();
        running.alive.store(false, Ordering::SeqCst);

        if let Some(pid) = running.pid {
            kill::kill_process_tree(pid);
        }

        let _ = tokio::join!(running.monitor, running.stderr_drain);
        info!("agent process terminated");
    }
}
