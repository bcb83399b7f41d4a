//! Stderr drain — captures agent diagnostics.
//!
//! The agent's stderr is never parsed as protocol. Each line is logged
//! as-is so crashes and interpreter tracebacks stay visible in the
//! host's own log stream.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::ChildStderr;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Spawn the stderr-draining task.
#[must_use]
pub(crate) fn drain_stderr(stderr: ChildStderr, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(stderr).lines();

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    debug!("stderr drain: cancellation received, stopping");
                    break;
                }

                line = lines.next_line() => {
                    match line {
                        Ok(Some(text)) => warn!(line = %text, "agent stderr"),
                        Ok(None) => {
                            debug!("stderr drain: EOF");
                            break;
                        }
                        Err(err) => {
                            warn!(%err, "stderr drain: read error, stopping");
                            break;
                        }
                    }
                }
            }
        }
    })
}
