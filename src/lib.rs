#![forbid(unsafe_code)]

//! Host-side bridge to a long-lived coding-agent process.
//!
//! The crate supervises one external agent process, exchanges
//! newline-delimited JSON with it over stdin/stdout, and dispatches each
//! decoded message to exactly one UI-subsystem state owner. Rendering
//! front-ends consume this library; nothing here draws anything.

pub mod bridge;
pub mod config;
pub mod errors;
pub mod host;
pub mod protocol;
pub mod router;
pub mod supervisor;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
