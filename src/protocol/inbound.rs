//! Inbound messages (agent → host) and the line decoder.
//!
//! Each stdout line is decoded with [`decode_line`]. Lines that are not
//! JSON objects become [`InboundMessage::RawOutput`]; JSON objects whose
//! `type` is unknown (or whose payload does not match the known shape)
//! become [`InboundMessage::Unrecognized`] with the payload preserved.
//! Nothing the agent prints is ever discarded.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Git working-tree status of a listed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Tracked file with uncommitted changes.
    Modified,
    /// File not yet tracked by version control.
    Untracked,
}

/// One entry of a `file_tree` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the project root. Separator may be `/` or `\`
    /// depending on the agent's platform.
    pub path: String,
    /// Version-control status, when the agent ran a git scan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<FileStatus>,
}

/// A message received from the agent process, tagged by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// The agent accepted a project directory.
    ProjectLoaded {
        /// Absolute project path as the agent resolved it.
        path: String,
    },
    /// Recursive file listing of the project.
    FileTree {
        /// Flat list of files; the host builds the tree.
        files: Vec<FileEntry>,
    },
    /// Content of a requested file.
    FileContent {
        /// Path relative to the project root.
        file: String,
        /// Full file content.
        content: String,
    },
    /// A save request completed.
    SaveSuccess {
        /// Path of the saved file.
        file: String,
    },
    /// A create request completed.
    CreateSuccess {
        /// Path of the created file.
        file: String,
        /// Optional human-readable confirmation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Conversational reply.
    ChatResponse {
        /// Reply text.
        text: String,
    },
    /// Result of an `analyze_code` request.
    AnalysisResult {
        /// Analysis text.
        analysis: String,
    },
    /// Progress update for a running mission.
    MissionUpdate {
        /// Mission phase identifier.
        status: String,
        /// Optional progress detail.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Final mission report.
    MissionResult {
        /// Agent-defined report payload.
        report: Value,
    },
    /// Log line from the night-shift run.
    NightShiftLog {
        /// Log text.
        message: String,
    },
    /// The night-shift run finished.
    NightShiftComplete,
    /// Log line from the self-analysis cycle.
    AscensionLog {
        /// Log text.
        message: String,
    },
    /// A self-analysis cycle finished.
    AscensionComplete {
        /// Specialist that completed, when reported.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        agent: Option<String>,
    },
    /// Deployment progress.
    DeployStatus {
        /// Deployment stage identifier.
        status: String,
        /// Optional stage detail.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Deployment finished.
    DeployComplete {
        /// Public URL of the deployed project, when available.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    /// Captured output of a `shell_exec` command.
    ShellOutput {
        /// Combined stdout + stderr of the command.
        output: String,
    },
    /// A database connection was established.
    DbConnected {
        /// Optional confirmation detail.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Schema of the connected database.
    DbSchema {
        /// Driver-defined schema description.
        schema: Value,
    },
    /// Result rows of a database query.
    DbResult {
        /// Driver-defined result payload.
        data: Value,
    },
    /// A database operation failed.
    DbError {
        /// Error text.
        message: String,
    },
    /// The agent reported a failure for some command.
    Error {
        /// Error text, shown verbatim.
        message: String,
    },
    /// A stdout line that was not a JSON object — the agent's own
    /// free-text logging, tracebacks, and the like.
    RawOutput {
        /// Original line content, without the terminating newline.
        line: String,
    },
    /// A JSON object whose `type` the host does not know, or whose
    /// payload did not match the known shape. Kept for visibility.
    Unrecognized {
        /// The full original object.
        payload: Value,
    },
}

/// Decode one stdout line into an [`InboundMessage`].
///
/// Never fails: malformed JSON and non-object JSON become
/// [`InboundMessage::RawOutput`]; unknown or shape-mismatched objects
/// become [`InboundMessage::Unrecognized`] with the payload preserved.
/// A trailing `\r` (CRLF agents) is stripped before parsing.
#[must_use]
pub fn decode_line(line: &str) -> InboundMessage {
    let trimmed = line.strip_suffix('\r').unwrap_or(line);

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value @ Value::Object(_)) => match serde_json::from_value::<InboundMessage>(value.clone())
        {
            Ok(message) => message,
            Err(err) => {
                debug!(%err, "inbound object did not match a known message shape");
                InboundMessage::Unrecognized { payload: value }
            }
        },
        _ => InboundMessage::RawOutput {
            line: trimmed.to_owned(),
        },
    }
}
