//! NDJSON codec for the agent's stdio streams.
//!
//! Wraps [`tokio_util::codec::LinesCodec`] with a fixed maximum line
//! length so an agent that never emits a newline cannot grow the pending
//! buffer without bound.
//!
//! Use [`BridgeCodec`] as the codec parameter for
//! [`tokio_util::codec::FramedRead`] over the child's stdout. Both
//! directions enforce UTF-8 line framing delimited by `\n`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

use crate::{AppError, Result};

/// Maximum accepted line length: 1 MiB.
///
/// Inbound lines exceeding this limit cause [`BridgeCodec::decode`] to
/// return [`AppError::Protocol`] with `"line too long"` instead of
/// allocating unbounded memory for a single message.
pub const MAX_LINE_BYTES: usize = 1_048_576;

/// NDJSON codec for the bidirectional agent stream.
///
/// Delegates line-framing to [`LinesCodec`] with the fixed
/// [`MAX_LINE_BYTES`] limit. Each newline-terminated UTF-8 string is one
/// complete wire message.
#[derive(Debug)]
pub struct BridgeCodec(LinesCodec);

impl BridgeCodec {
    /// Create a new `BridgeCodec` with the default [`MAX_LINE_BYTES`] limit.
    #[must_use]
    pub fn new() -> Self {
        Self(LinesCodec::new_with_max_length(MAX_LINE_BYTES))
    }
}

impl Default for BridgeCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for BridgeCodec {
    type Item = String;
    type Error = AppError;

    /// Decode the next newline-terminated line from `src`.
    ///
    /// Returns `Ok(None)` when `src` contains no complete line yet
    /// (buffering). Returns `Err(AppError::Protocol("line too long: …"))`
    /// when the line exceeds [`MAX_LINE_BYTES`].
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.0.decode(src).map_err(map_codec_error)
    }

    /// Decode the final line when the stream reaches EOF.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.0.decode_eof(src).map_err(map_codec_error)
    }
}

impl Encoder<String> for BridgeCodec {
    type Error = AppError;

    /// Encode `item` as a `\n`-terminated line into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] on underlying I/O failures. The
    /// max-length limit is a decoder-side concern only.
    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<()> {
        self.0.encode(item, dst).map_err(map_codec_error)
    }
}

// ── Private helper ────────────────────────────────────────────────────────────

/// Map a [`LinesCodecError`] to an [`AppError`].
fn map_codec_error(e: LinesCodecError) -> AppError {
    match e {
        LinesCodecError::MaxLineLengthExceeded => {
            AppError::Protocol(format!("line too long: exceeded {MAX_LINE_BYTES} bytes"))
        }
        LinesCodecError::Io(io_err) => AppError::Io(io_err.to_string()),
    }
}
