//! Bridge reader task.
//!
//! Reads newline-delimited lines from the agent's stdout, decodes each
//! into an [`InboundMessage`] via [`decode_line`], and forwards the
//! messages through the bridge event channel in arrival order.
//!
//! Framing errors (a line over the 1 MiB limit) are logged and skipped;
//! the reader keeps going with the next line. EOF and I/O errors end the
//! task silently — exit reporting belongs to the supervisor's monitor so
//! the disconnect event fires exactly once.

use futures_util::StreamExt;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::codec::FramedRead;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::bridge::codec::BridgeCodec;
use crate::bridge::BridgeEvent;
use crate::protocol::decode_line;
use crate::{AppError, Result};

/// Reader task — decodes stdout lines and emits [`BridgeEvent::Message`]s.
///
/// Messages decoded from a single receive event are dispatched in the
/// order their newlines appeared. Whitespace-only lines are skipped.
///
/// # Cancellation
///
/// Respects `cancel`: when the token fires the reader exits cleanly.
///
/// # Errors
///
/// Returns `Ok(())` on clean EOF, I/O error, or cancellation; framing
/// errors never terminate the task.
pub async fn run_reader<R>(
    stdout: R,
    event_tx: mpsc::Sender<BridgeEvent>,
    cancel: CancellationToken,
) -> Result<()>
where
    R: AsyncRead + Unpin + Send,
{
    let mut framed = FramedRead::new(stdout, BridgeCodec::new());

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                debug!("bridge reader: cancellation received, stopping");
                break;
            }

            item = framed.next() => {
                match item {
                    None => {
                        debug!("bridge reader: EOF on agent stdout");
                        break;
                    }

                    Some(Err(AppError::Protocol(ref msg))) => {
                        // Oversized line — skip it, keep the stream alive.
                        warn!(error = msg.as_str(), "bridge reader: framing error, skipping line");
                    }

                    Some(Err(e)) => {
                        warn!(error = %e, "bridge reader: IO error, stopping");
                        break;
                    }

                    Some(Ok(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }

                        let message = decode_line(&line);
                        if event_tx.send(BridgeEvent::Message(message)).await.is_err() {
                            debug!("bridge reader: event channel closed, stopping");
                            break;
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
