//! Exit monitor — detects the agent process ending on its own.
//!
//! A background task awaits the child's exit and emits exactly one
//! [`BridgeEvent::AgentExited`] when it happens. Host-initiated
//! termination cancels the task first, so an intentional shutdown never
//! produces a disconnect event.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bridge::BridgeEvent;

/// Spawn the exit-monitoring task for `child`.
///
/// The task owns the child handle. When the process exits it clears the
/// shared liveness flag and sends [`BridgeEvent::AgentExited`] with the
/// exit code (`None` when killed by a signal). When `cancel` fires
/// first, the task exits without emitting an event.
#[must_use]
pub(crate) fn monitor_exit(
    mut child: Child,
    event_tx: mpsc::Sender<BridgeEvent>,
    alive: Arc<AtomicBool>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = child.wait() => {
                alive.store(false, Ordering::SeqCst);

                let code = match result {
                    Ok(status) => status.code(),
                    Err(err) => {
                        warn!(%err, "error waiting for agent process");
                        None
                    }
                };

                info!(?code, "agent process exited");

                if event_tx.send(BridgeEvent::AgentExited { code }).await.is_err() {
                    debug!("event channel closed before AgentExited could be delivered");
                }
            }
            () = cancel.cancelled() => {
                // Host-initiated termination — no disconnect event.
                debug!("exit monitor: cancellation received, exiting");
            }
        }
    })
}
