//! Outbound commands (host → agent).
//!
//! Serialised with a `command` tag field, matching the agent's stdin
//! contract. Optional fields are omitted from the wire entirely rather
//! than sent as `null`.

use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

/// A command sent to the agent process, tagged by its `command` field.
///
/// Commands are fire-and-forget: the wire format has no correlation IDs,
/// so no reply can be attributed to a particular command. See
/// [`Bridge::send`](crate::bridge::Bridge::send).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum OutboundCommand {
    /// Connectivity probe.
    Ping,
    /// Select the active project directory.
    SetProject {
        /// Absolute project directory path.
        path: String,
    },
    /// Request a recursive file listing of the project.
    GetFileTree {
        /// Project directory to list.
        path: String,
    },
    /// Read one file's content.
    ReadFile {
        /// Path relative to the project root.
        file: String,
        /// Project root the path is relative to.
        project_path: String,
    },
    /// Persist editor content to disk.
    SaveFile {
        /// Path relative to the project root.
        file: String,
        /// Full file content to write.
        content: String,
        /// Project root the path is relative to.
        project_path: String,
    },
    /// Create an empty file (parent directories included).
    CreateFile {
        /// Path relative to the project root.
        file: String,
        /// Project root the path is relative to.
        project_path: String,
    },
    /// Free-form chat message for the agent.
    AgentMessage {
        /// Message text.
        message: String,
        /// Optional task classification hint.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        task_type: Option<String>,
        /// Optional base64-encoded image attachment.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
    /// One-shot static analysis of a code snippet.
    AnalyzeCode {
        /// Source code to analyse.
        code: String,
    },
    /// Launch a mission with a stated objective.
    StartMission {
        /// Mission objective text.
        mission: String,
        /// Project directory the mission operates on.
        path: String,
    },
    /// Start the unattended night-shift run.
    StartNightShift {
        /// Project directory to work on.
        path: String,
    },
    /// Trigger the agent's self-analysis cycle.
    TriggerAscension,
    /// Sync with the agent's shared knowledge network.
    SyncNetwork,
    /// Activate the agent's file-system watchdog.
    ActivateImmunity,
    /// Run the product-manager specialist.
    StartProductManager {
        /// Optional project directory override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    /// Run the founder specialist.
    StartFounder {
        /// Optional project directory override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    /// Execute a shell command in the agent's environment.
    ShellExec {
        /// Command line to run.
        cmd: String,
        /// Working directory; the agent falls back to the project root.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cwd: Option<String>,
    },
    /// Deploy the current project. Older agents send the short `deploy` tag.
    #[serde(alias = "deploy")]
    DeployProject {
        /// Optional project directory override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    /// Open a database connection from a connection-config object.
    DbConnect {
        /// Driver-specific connection settings.
        config: serde_json::Value,
    },
    /// Request the connected database's schema.
    DbGetSchema,
    /// Run a query against the connected database.
    DbQuery {
        /// Query text.
        query: String,
    },
}

impl OutboundCommand {
    /// Serialise the command to a single JSON line (no trailing newline).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Encode`] if the payload cannot be serialised;
    /// the caller stays usable and should drop the command.
    pub fn to_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|err| AppError::Encode(format!("failed to serialise command: {err}")))
    }
}
