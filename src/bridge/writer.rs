//! Bridge writer task.
//!
//! Receives outbound commands from a tokio [`mpsc`] channel, serialises
//! each to a single-line JSON string terminated by `\n`, and writes the
//! bytes to the agent's stdin.
//!
//! Failures never propagate to the sender: a command that cannot be
//! serialised is logged and dropped, and a write against a dead child's
//! stdin (the usual shutdown race) is logged and dropped as well. The
//! task only stops on cancellation or when all senders are gone.

use tokio::io::AsyncWriteExt;
use tokio::process::ChildStdin;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::protocol::OutboundCommand;
use crate::Result;

/// Writer task — serialises outbound commands and writes to `stdin`.
///
/// # Errors
///
/// Always returns `Ok(())`; per-command failures are logged and the
/// command dropped so the bridge stays usable.
pub async fn run_writer(
    stdin: ChildStdin,
    mut cmd_rx: mpsc::Receiver<OutboundCommand>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut stdin = stdin;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                debug!("bridge writer: cancellation received, stopping");
                break;
            }

            cmd = cmd_rx.recv() => {
                let Some(command) = cmd else {
                    debug!("bridge writer: command channel closed, stopping");
                    break;
                };

                let mut line = match command.to_line() {
                    Ok(line) => line,
                    Err(err) => {
                        warn!(%err, "bridge writer: dropping unserialisable command");
                        continue;
                    }
                };
                line.push('\n');

                if let Err(err) = stdin.write_all(line.as_bytes()).await {
                    // Write-after-close: expected during shutdown races.
                    warn!(%err, "bridge writer: write to agent stdin failed, dropping command");
                    continue;
                }

                if let Err(err) = stdin.flush().await {
                    warn!(%err, "bridge writer: flush to agent stdin failed");
                }
            }
        }
    }

    Ok(())
}
