//! Transport layer between the host and the agent process.
//!
//! [`Bridge::launch`] starts the agent through an injected
//! [`Supervisor`], wires the reader/writer tasks through the NDJSON
//! codec, and hands back the event stream. The bridge exposes exactly
//! two primitives to the rest of the application: [`Bridge::send`] and
//! the [`BridgeEvent`] receiver.

pub mod codec;
pub mod reader;
pub mod writer;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::protocol::{InboundMessage, OutboundCommand};
use crate::supervisor::Supervisor;
use crate::Result;

/// Events surfaced to bridge consumers, in arrival order.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// A decoded message from the agent's stdout.
    Message(InboundMessage),
    /// The agent process exited outside of a host-initiated termination.
    /// Emitted at most once per process lifetime; the agent is not
    /// restarted automatically.
    AgentExited {
        /// Process exit code; `None` when killed by a signal.
        code: Option<i32>,
    },
}

/// Transport facade owning the supervisor and the codec tasks.
#[derive(Debug)]
pub struct Bridge {
    supervisor: Supervisor,
    cmd_tx: mpsc::Sender<OutboundCommand>,
    cancel: CancellationToken,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Bridge {
    /// Start the agent and wire the transport.
    ///
    /// Returns the bridge and the event receiver. The receiver yields
    /// every decoded [`InboundMessage`] in arrival order, followed by at
    /// most one [`BridgeEvent::AgentExited`] if the process dies on its
    /// own. Handlers must not block: the bridge is the sole reader of
    /// the agent's stdout, and an unconsumed event channel stalls all
    /// further delivery.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Spawn`](crate::AppError::Spawn) if the agent
    /// process cannot be launched. Startup failure is surfaced once and
    /// never retried here.
    pub fn launch(
        mut supervisor: Supervisor,
        channel_capacity: usize,
    ) -> Result<(Self, mpsc::Receiver<BridgeEvent>)> {
        let (event_tx, event_rx) = mpsc::channel(channel_capacity);
        let (cmd_tx, cmd_rx) = mpsc::channel(channel_capacity);
        let cancel = CancellationToken::new();

        let streams = supervisor.start(event_tx.clone())?;

        let reader_cancel = cancel.child_token();
        let reader = tokio::spawn(async move {
            if let Err(err) = reader::run_reader(streams.stdout, event_tx, reader_cancel).await {
                warn!(%err, "bridge reader task failed");
            }
        });

        let writer_cancel = cancel.child_token();
        let writer = tokio::spawn(async move {
            if let Err(err) = writer::run_writer(streams.stdin, cmd_rx, writer_cancel).await {
                warn!(%err, "bridge writer task failed");
            }
        });

        Ok((
            Self {
                supervisor,
                cmd_tx,
                cancel,
                reader,
                writer,
            },
            event_rx,
        ))
    }

    /// Queue a command for the agent, fire-and-forget.
    ///
    /// There is no request/response correlation on the wire: callers
    /// cannot tell "my command's reply" from any other message that
    /// happens to arrive next, and no timeout or retry exists for a
    /// specific command. Once written to the agent's stdin a command
    /// cannot be cancelled.
    ///
    /// Never fails: with no live agent attached, or with the channel
    /// full, the command is logged and dropped.
    pub fn send(&self, command: OutboundCommand) {
        use tokio::sync::mpsc::error::TrySendError;

        match self.cmd_tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!(?command, "bridge: command channel full, dropping command");
            }
            Err(TrySendError::Closed(command)) => {
                warn!(?command, "bridge: no agent attached, dropping command");
            }
        }
    }

    /// Whether the agent process is currently alive.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.supervisor.is_alive()
    }

    /// Stop the transport tasks and terminate the agent process tree.
    ///
    /// Idempotent with respect to the process: terminating an
    /// already-exited agent is a no-op.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        self.supervisor.terminate().await;
        let _ = tokio::join!(self.reader, self.writer);
    }
}
