//! Dispatch router: one inbound message, one subsystem owner.
//!
//! Each decoded message's discriminant selects exactly one panel whose
//! state it updates; no message ever mutates two panels. Unrecognised
//! discriminants and raw text land in the generic output log, favouring
//! visibility over strict schema enforcement.
//!
//! Some updates require a follow-up request (a confirmed project load
//! triggers a file-tree fetch); [`Router::dispatch`] returns that
//! command for the caller to send rather than reaching into the
//! transport itself.

pub mod file_explorer;
pub mod panels;

use tracing::debug;

pub use file_explorer::{build_tree, FileExplorer, NodeKind, TreeNode};
pub use panels::{
    AscensionPanel, ChatLog, ChatMessage, ChatRole, DatabasePanel, DeployPanel, EditorBuffer,
    LogEntry, MissionPanel, NightShiftPanel, OutputLog,
};

use crate::protocol::{InboundMessage, OutboundCommand};

/// Holder of all subsystem states plus the agent connectivity flag.
#[derive(Debug, Default)]
pub struct Router {
    /// File explorer (project path + tree).
    pub explorer: FileExplorer,
    /// Editor buffer.
    pub editor: EditorBuffer,
    /// Chat transcript.
    pub chat: ChatLog,
    /// Missions panel.
    pub missions: MissionPanel,
    /// Night-shift panel.
    pub night_shift: NightShiftPanel,
    /// Ascension panel.
    pub ascension: AscensionPanel,
    /// Deployment panel.
    pub deploy: DeployPanel,
    /// Database panel.
    pub database: DatabasePanel,
    /// Generic output log (shell output, errors, raw lines, unknowns).
    pub output: OutputLog,
    /// Set once the agent process has exited.
    pub disconnected: bool,
}

impl Router {
    /// Create a router with empty panel states.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one message to its owning subsystem.
    ///
    /// Returns a follow-up command when the update calls for one
    /// (project load and file creation both trigger a listing refresh).
    pub fn dispatch(&mut self, message: InboundMessage) -> Option<OutboundCommand> {
        match message {
            InboundMessage::ProjectLoaded { path } => {
                self.explorer.project_loaded(path.clone());
                return Some(OutboundCommand::GetFileTree { path });
            }
            InboundMessage::FileTree { files } => self.explorer.set_listing(&files),
            InboundMessage::CreateSuccess { file, .. } => {
                self.explorer.file_created(&file);
                if let Some(path) = self.explorer.project_path.clone() {
                    return Some(OutboundCommand::GetFileTree { path });
                }
            }
            InboundMessage::FileContent { file, content } => self.editor.open(file, content),
            InboundMessage::SaveSuccess { file } => self.editor.note_saved(file),
            InboundMessage::ChatResponse { text } => self.chat.push_agent(text),
            InboundMessage::AnalysisResult { analysis } => self.chat.push_agent(analysis),
            InboundMessage::MissionUpdate { status, message } => {
                self.missions.update(status, message.as_deref());
            }
            InboundMessage::MissionResult { report } => self.missions.complete(report),
            InboundMessage::NightShiftLog { message } => self.night_shift.push(message),
            InboundMessage::NightShiftComplete => self.night_shift.finish(),
            InboundMessage::AscensionLog { message } => self.ascension.push(message),
            InboundMessage::AscensionComplete { agent } => self.ascension.finish(agent),
            InboundMessage::DeployStatus { status, message } => {
                self.deploy.update(status, message.as_deref());
            }
            InboundMessage::DeployComplete { url } => self.deploy.complete(url),
            InboundMessage::ShellOutput { output } => self.output.push(output),
            InboundMessage::DbConnected { message } => self.database.connect(message.as_deref()),
            InboundMessage::DbSchema { schema } => self.database.set_schema(schema),
            InboundMessage::DbResult { data } => self.database.set_result(data),
            InboundMessage::DbError { message } => self.database.fail(&message),
            InboundMessage::Error { message } => self.output.push(format!("[error] {message}")),
            InboundMessage::RawOutput { line } => self.output.push(line),
            InboundMessage::Unrecognized { payload } => {
                debug!(%payload, "unrecognised message type, keeping in output log");
                self.output.push(payload.to_string());
            }
        }

        None
    }

    /// Record the agent's unexpected exit as a connectivity-lost state.
    pub fn on_disconnect(&mut self, code: Option<i32>) {
        self.disconnected = true;
        let text = code.map_or_else(
            || "[agent] process exited (terminated by signal)".to_owned(),
            |c| format!("[agent] process exited with code {c}"),
        );
        self.output.push(text);
    }
}
