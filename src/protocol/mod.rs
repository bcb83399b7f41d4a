//! Wire-protocol types for the host ↔ agent NDJSON exchange.
//!
//! Every message is one line of UTF-8 JSON. Host → agent lines carry a
//! `command` discriminant; agent → host lines carry a `type` discriminant.
//! Agent lines that are not JSON objects are preserved verbatim as raw
//! diagnostic output rather than dropped.

pub mod inbound;
pub mod outbound;

pub use inbound::{decode_line, FileEntry, FileStatus, InboundMessage};
pub use outbound::OutboundCommand;
