//! Subsystem panel states.
//!
//! Each panel owns its own slice of UI state; the router mutates exactly
//! one panel per inbound message. These types hold data only — rendering
//! belongs to the front-end consuming this crate.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Timestamped line in a panel log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Time the host recorded the line.
    pub at: DateTime<Utc>,
    /// Line text.
    pub text: String,
}

impl LogEntry {
    /// Stamp `text` with the current time.
    #[must_use]
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            text: text.into(),
        }
    }
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The human operator.
    User,
    /// The agent.
    Agent,
}

/// One chat transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author.
    pub role: ChatRole,
    /// Message text.
    pub text: String,
    /// Time the host recorded the message.
    pub at: DateTime<Utc>,
}

/// Chat panel transcript.
#[derive(Debug, Default)]
pub struct ChatLog {
    /// Transcript in arrival order.
    pub messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// Append an agent-authored message.
    pub fn push_agent(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::Agent,
            text: text.into(),
            at: Utc::now(),
        });
    }

    /// Append an operator-authored message (called by the front-end
    /// alongside its `agent_message` command).
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.into(),
            at: Utc::now(),
        });
    }
}

/// Editor buffer state.
#[derive(Debug, Default)]
pub struct EditorBuffer {
    /// Path of the open file, relative to the project root.
    pub file: Option<String>,
    /// Buffer content as last received from the agent.
    pub content: String,
    /// Path most recently confirmed saved by the agent.
    pub last_saved: Option<String>,
}

impl EditorBuffer {
    /// Load a file into the buffer.
    pub fn open(&mut self, file: String, content: String) {
        self.file = Some(file);
        self.content = content;
    }

    /// Record a save confirmation.
    pub fn note_saved(&mut self, file: String) {
        self.last_saved = Some(file);
    }
}

/// Missions panel state.
#[derive(Debug, Default)]
pub struct MissionPanel {
    /// Progress lines, `[status] message` style.
    pub log: Vec<LogEntry>,
    /// Most recent mission phase.
    pub last_status: Option<String>,
    /// Final report of the last completed mission.
    pub report: Option<Value>,
}

impl MissionPanel {
    /// Record a progress update.
    pub fn update(&mut self, status: String, message: Option<&str>) {
        let text = message.map_or_else(
            || format!("[{status}]"),
            |detail| format!("[{status}] {detail}"),
        );
        self.log.push(LogEntry::now(text));
        self.last_status = Some(status);
    }

    /// Record the final report.
    pub fn complete(&mut self, report: Value) {
        self.log.push(LogEntry::now("mission complete"));
        self.report = Some(report);
    }
}

/// Night-shift panel state.
#[derive(Debug, Default)]
pub struct NightShiftPanel {
    /// Run log in arrival order.
    pub log: Vec<LogEntry>,
    /// Whether the current run has finished.
    pub complete: bool,
}

impl NightShiftPanel {
    /// Record a log line; a new line re-opens a completed run.
    pub fn push(&mut self, message: impl Into<String>) {
        self.complete = false;
        self.log.push(LogEntry::now(message));
    }

    /// Mark the run finished.
    pub fn finish(&mut self) {
        self.complete = true;
        self.log.push(LogEntry::now("night shift cycle complete"));
    }
}

/// Ascension (self-analysis) panel state.
#[derive(Debug, Default)]
pub struct AscensionPanel {
    /// Cycle log in arrival order.
    pub log: Vec<LogEntry>,
    /// Specialists that reported completion.
    pub completed_agents: Vec<String>,
}

impl AscensionPanel {
    /// Record a log line.
    pub fn push(&mut self, message: impl Into<String>) {
        self.log.push(LogEntry::now(message));
    }

    /// Record a completed cycle.
    pub fn finish(&mut self, agent: Option<String>) {
        let name = agent.unwrap_or_else(|| "ascension".to_owned());
        self.log.push(LogEntry::now(format!("{name} complete")));
        self.completed_agents.push(name);
    }
}

/// Deployment panel state.
#[derive(Debug, Default)]
pub struct DeployPanel {
    /// Stage log in arrival order.
    pub log: Vec<LogEntry>,
    /// Current stage; `None` when no deployment is in flight.
    pub stage: Option<String>,
    /// URL of the last successful deployment.
    pub url: Option<String>,
}

impl DeployPanel {
    /// Record a stage change.
    pub fn update(&mut self, status: String, message: Option<&str>) {
        let text = message.map_or_else(|| status.clone(), ToOwned::to_owned);
        self.log.push(LogEntry::now(format!("[deploy] {text}")));
        self.stage = Some(status);
    }

    /// Record a finished deployment.
    pub fn complete(&mut self, url: Option<String>) {
        let text = url.as_deref().map_or_else(
            || "deployment complete".to_owned(),
            |u| format!("deployment complete: {u}"),
        );
        self.log.push(LogEntry::now(text));
        self.stage = None;
        self.url = url;
    }
}

/// Database panel state.
#[derive(Debug, Default)]
pub struct DatabasePanel {
    /// Whether a connection is currently established.
    pub connected: bool,
    /// Schema of the connected database, once fetched.
    pub schema: Option<Value>,
    /// Result payload of the most recent query.
    pub last_result: Option<Value>,
    /// Connection and error log.
    pub log: Vec<LogEntry>,
}

impl DatabasePanel {
    /// Record an established connection.
    pub fn connect(&mut self, message: Option<&str>) {
        self.connected = true;
        self.log
            .push(LogEntry::now(message.unwrap_or("connected")));
    }

    /// Store the fetched schema.
    pub fn set_schema(&mut self, schema: Value) {
        self.schema = Some(schema);
    }

    /// Store a query result.
    pub fn set_result(&mut self, data: Value) {
        self.last_result = Some(data);
    }

    /// Record a database-side failure.
    pub fn fail(&mut self, message: &str) {
        self.connected = false;
        self.log.push(LogEntry::now(format!("error: {message}")));
    }
}

/// Generic output log: shell output, agent errors, raw diagnostic lines,
/// and any message the host does not recognise. Nothing routed here is
/// ever dropped.
#[derive(Debug, Default)]
pub struct OutputLog {
    /// Entries in arrival order.
    pub entries: Vec<LogEntry>,
}

impl OutputLog {
    /// Append one line.
    pub fn push(&mut self, text: impl Into<String>) {
        self.entries.push(LogEntry::now(text));
    }
}
