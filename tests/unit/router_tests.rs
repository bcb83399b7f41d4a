//! Unit tests for the dispatch router.
//!
//! One discriminant, one owner: each test checks that a message updated
//! its subsystem and nothing else it could plausibly have leaked into.

use serde_json::json;

use agent_bridge::protocol::{decode_line, FileEntry, InboundMessage, OutboundCommand};
use agent_bridge::router::Router;

// ── Project / explorer ───────────────────────────────────────────────────────

/// `project_loaded` records the path on the explorer and asks the caller
/// to refresh the listing.
#[test]
fn project_loaded_sets_path_and_requests_listing() {
    let mut router = Router::new();

    let follow_up = router.dispatch(InboundMessage::ProjectLoaded {
        path: "/work/demo".to_owned(),
    });

    assert_eq!(router.explorer.project_path.as_deref(), Some("/work/demo"));
    assert_eq!(
        follow_up,
        Some(OutboundCommand::GetFileTree {
            path: "/work/demo".to_owned()
        })
    );
    assert!(
        router.chat.messages.is_empty(),
        "project load must not write chat state"
    );
}

/// `file_tree` replaces the explorer tree.
#[test]
fn file_tree_builds_explorer_tree() {
    let mut router = Router::new();

    let follow_up = router.dispatch(InboundMessage::FileTree {
        files: vec![
            FileEntry {
                path: "src/app.py".to_owned(),
                status: None,
            },
            FileEntry {
                path: "src/utils/helper.py".to_owned(),
                status: None,
            },
        ],
    });

    assert!(follow_up.is_none());
    let tree = router.explorer.tree.as_ref().expect("tree must be set");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].name, "src");
}

/// `create_success` logs on the explorer and refreshes the listing when
/// a project is loaded.
#[test]
fn create_success_requests_refresh_when_project_loaded() {
    let mut router = Router::new();
    router.dispatch(InboundMessage::ProjectLoaded {
        path: "/work/demo".to_owned(),
    });

    let follow_up = router.dispatch(InboundMessage::CreateSuccess {
        file: "new.py".to_owned(),
        message: None,
    });

    assert_eq!(
        follow_up,
        Some(OutboundCommand::GetFileTree {
            path: "/work/demo".to_owned()
        })
    );
}

/// `create_success` with no project loaded has nothing to refresh.
#[test]
fn create_success_without_project_has_no_follow_up() {
    let mut router = Router::new();

    let follow_up = router.dispatch(InboundMessage::CreateSuccess {
        file: "new.py".to_owned(),
        message: None,
    });

    assert!(follow_up.is_none());
}

// ── Editor ───────────────────────────────────────────────────────────────────

/// `file_content` loads the editor buffer.
#[test]
fn file_content_opens_editor_buffer() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::FileContent {
        file: "src/app.py".to_owned(),
        content: "print('hi')\n".to_owned(),
    });

    assert_eq!(router.editor.file.as_deref(), Some("src/app.py"));
    assert_eq!(router.editor.content, "print('hi')\n");
}

/// `save_success` records the saved path on the editor.
#[test]
fn save_success_notes_saved_file() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::SaveSuccess {
        file: "src/app.py".to_owned(),
    });

    assert_eq!(router.editor.last_saved.as_deref(), Some("src/app.py"));
}

// ── Chat ─────────────────────────────────────────────────────────────────────

/// `chat_response` appends an agent message to the transcript.
#[test]
fn chat_response_appends_to_transcript() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::ChatResponse {
        text: "hello".to_owned(),
    });

    assert_eq!(router.chat.messages.len(), 1);
    assert_eq!(router.chat.messages[0].text, "hello");
}

/// Operator messages and agent replies interleave in arrival order.
#[test]
fn transcript_interleaves_user_and_agent() {
    use agent_bridge::router::ChatRole;

    let mut router = Router::new();
    router.chat.push_user("rename this function");
    router.dispatch(InboundMessage::ChatResponse {
        text: "done".to_owned(),
    });

    let roles: Vec<ChatRole> = router.chat.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![ChatRole::User, ChatRole::Agent]);
}

// ── Missions / night shift / ascension ───────────────────────────────────────

/// Mission updates accumulate; the result stores the report.
#[test]
fn mission_updates_and_result_stay_on_missions_panel() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::MissionUpdate {
        status: "planning".to_owned(),
        message: Some("reading the codebase".to_owned()),
    });
    router.dispatch(InboundMessage::MissionResult {
        report: json!({"changed_files": 3}),
    });

    assert_eq!(router.missions.last_status.as_deref(), Some("planning"));
    assert_eq!(router.missions.report, Some(json!({"changed_files": 3})));
    assert!(
        router.output.entries.is_empty(),
        "mission traffic must not leak into the output log"
    );
}

/// Night-shift completion flips the panel's flag.
#[test]
fn night_shift_complete_marks_run_finished() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::NightShiftLog {
        message: "patching tests".to_owned(),
    });
    assert!(!router.night_shift.complete);

    router.dispatch(InboundMessage::NightShiftComplete);
    assert!(router.night_shift.complete);
}

/// Ascension completion records the specialist.
#[test]
fn ascension_complete_records_agent() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::AscensionComplete {
        agent: Some("Product Manager".to_owned()),
    });

    assert_eq!(router.ascension.completed_agents, vec!["Product Manager"]);
}

// ── Deploy / database ────────────────────────────────────────────────────────

/// Deploy stages track, then completion clears the stage and keeps the URL.
#[test]
fn deploy_flow_tracks_stage_and_url() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::DeployStatus {
        status: "building".to_owned(),
        message: Some("Building container".to_owned()),
    });
    assert_eq!(router.deploy.stage.as_deref(), Some("building"));

    router.dispatch(InboundMessage::DeployComplete {
        url: Some("https://demo.example".to_owned()),
    });
    assert_eq!(router.deploy.stage, None);
    assert_eq!(router.deploy.url.as_deref(), Some("https://demo.example"));
}

/// Database lifecycle: connect, schema, result, error.
#[test]
fn database_flow_updates_panel() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::DbConnected { message: None });
    assert!(router.database.connected);

    router.dispatch(InboundMessage::DbSchema {
        schema: json!({"tables": ["users"]}),
    });
    assert!(router.database.schema.is_some());

    router.dispatch(InboundMessage::DbResult {
        data: json!([[1, "ada"]]),
    });
    assert_eq!(router.database.last_result, Some(json!([[1, "ada"]])));

    router.dispatch(InboundMessage::DbError {
        message: "syntax error".to_owned(),
    });
    assert!(!router.database.connected);
}

// ── Output log: errors, raw text, unknowns ───────────────────────────────────

/// Agent `error` messages land verbatim in the generic output log and
/// nowhere else.
#[test]
fn error_goes_to_output_log_only() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::Error {
        message: "Mission failed: boom".to_owned(),
    });

    assert_eq!(router.output.entries.len(), 1);
    assert!(router.output.entries[0].text.contains("Mission failed: boom"));
    assert!(
        router.missions.log.is_empty(),
        "errors must not be double-written into panel logs"
    );
}

/// A decoded raw diagnostic line is preserved in the output log.
#[test]
fn raw_output_is_preserved_in_output_log() {
    let mut router = Router::new();

    let message = decode_line("Traceback (most recent call last):");
    router.dispatch(message);

    assert_eq!(
        router.output.entries[0].text,
        "Traceback (most recent call last):"
    );
}

/// Unknown discriminants keep their payload visible in the output log.
#[test]
fn unrecognized_message_lands_in_output_log() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::Unrecognized {
        payload: json!({"type": "telemetry", "cpu": 0.5}),
    });

    assert_eq!(router.output.entries.len(), 1);
    assert!(router.output.entries[0].text.contains("telemetry"));
}

/// `shell_output` is owned by the output log.
#[test]
fn shell_output_goes_to_output_log() {
    let mut router = Router::new();

    router.dispatch(InboundMessage::ShellOutput {
        output: "total 0\n".to_owned(),
    });

    assert_eq!(router.output.entries.len(), 1);
}

// ── Disconnect ───────────────────────────────────────────────────────────────

/// An unexpected exit flips the connectivity flag and logs the code.
#[test]
fn disconnect_sets_flag_and_logs_exit_code() {
    let mut router = Router::new();

    router.on_disconnect(Some(1));

    assert!(router.disconnected);
    assert!(router.output.entries[0].text.contains("code 1"));
}
