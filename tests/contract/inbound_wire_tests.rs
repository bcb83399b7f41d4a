//! Wire-format conformance for inbound messages.
//!
//! Every `type` tag from the agent's stdout contract decodes to its
//! typed variant with the documented fields.

use serde_json::json;

use agent_bridge::protocol::{decode_line, FileStatus, InboundMessage};

#[test]
fn project_loaded() {
    assert_eq!(
        decode_line(r#"{"type":"project_loaded","path":"/work/demo"}"#),
        InboundMessage::ProjectLoaded {
            path: "/work/demo".to_owned()
        }
    );
}

#[test]
fn file_tree_with_statuses() {
    let line = r#"{"type":"file_tree","files":[
        {"path":"src/app.py","status":"modified"},
        {"path":"notes.md","status":"untracked"},
        {"path":"Cargo.toml"}
    ]}"#
    .replace('\n', " ");

    match decode_line(&line) {
        InboundMessage::FileTree { files } => {
            assert_eq!(files[0].status, Some(FileStatus::Modified));
            assert_eq!(files[1].status, Some(FileStatus::Untracked));
            assert_eq!(files[2].status, None);
        }
        other => panic!("expected FileTree, got: {other:?}"),
    }
}

#[test]
fn file_content() {
    assert_eq!(
        decode_line(r#"{"type":"file_content","file":"a.py","content":"pass"}"#),
        InboundMessage::FileContent {
            file: "a.py".to_owned(),
            content: "pass".to_owned()
        }
    );
}

#[test]
fn save_and_create_success() {
    assert_eq!(
        decode_line(r#"{"type":"save_success","file":"a.py"}"#),
        InboundMessage::SaveSuccess {
            file: "a.py".to_owned()
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"create_success","file":"b.py","message":"File created: b.py"}"#),
        InboundMessage::CreateSuccess {
            file: "b.py".to_owned(),
            message: Some("File created: b.py".to_owned())
        }
    );
}

#[test]
fn chat_and_analysis() {
    assert_eq!(
        decode_line(r#"{"type":"chat_response","text":"done"}"#),
        InboundMessage::ChatResponse {
            text: "done".to_owned()
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"analysis_result","analysis":"looks fine"}"#),
        InboundMessage::AnalysisResult {
            analysis: "looks fine".to_owned()
        }
    );
}

#[test]
fn mission_lifecycle() {
    assert_eq!(
        decode_line(r#"{"type":"mission_update","status":"executing","message":"step 2"}"#),
        InboundMessage::MissionUpdate {
            status: "executing".to_owned(),
            message: Some("step 2".to_owned())
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"mission_result","report":{"ok":true}}"#),
        InboundMessage::MissionResult {
            report: json!({"ok": true})
        }
    );
}

#[test]
fn night_shift_lifecycle() {
    assert_eq!(
        decode_line(r#"{"type":"night_shift_log","message":"fixing lint"}"#),
        InboundMessage::NightShiftLog {
            message: "fixing lint".to_owned()
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"night_shift_complete"}"#),
        InboundMessage::NightShiftComplete
    );
}

#[test]
fn ascension_lifecycle() {
    assert_eq!(
        decode_line(r#"{"type":"ascension_log","message":"[ARCHITECT] analysing"}"#),
        InboundMessage::AscensionLog {
            message: "[ARCHITECT] analysing".to_owned()
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"ascension_complete","agent":"Founder"}"#),
        InboundMessage::AscensionComplete {
            agent: Some("Founder".to_owned())
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"ascension_complete"}"#),
        InboundMessage::AscensionComplete { agent: None }
    );
}

#[test]
fn deploy_lifecycle() {
    assert_eq!(
        decode_line(r#"{"type":"deploy_status","status":"building","message":"Building"}"#),
        InboundMessage::DeployStatus {
            status: "building".to_owned(),
            message: Some("Building".to_owned())
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"deploy_complete","url":"https://demo.example"}"#),
        InboundMessage::DeployComplete {
            url: Some("https://demo.example".to_owned())
        }
    );
}

#[test]
fn shell_output() {
    assert_eq!(
        decode_line(r#"{"type":"shell_output","output":"total 0\n"}"#),
        InboundMessage::ShellOutput {
            output: "total 0\n".to_owned()
        }
    );
}

#[test]
fn database_lifecycle() {
    assert_eq!(
        decode_line(r#"{"type":"db_connected"}"#),
        InboundMessage::DbConnected { message: None }
    );
    assert_eq!(
        decode_line(r#"{"type":"db_schema","schema":{"tables":[]}}"#),
        InboundMessage::DbSchema {
            schema: json!({"tables": []})
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"db_result","data":[[1]]}"#),
        InboundMessage::DbResult {
            data: json!([[1]])
        }
    );
    assert_eq!(
        decode_line(r#"{"type":"db_error","message":"bad query"}"#),
        InboundMessage::DbError {
            message: "bad query".to_owned()
        }
    );
}

#[test]
fn error_message_is_verbatim() {
    assert_eq!(
        decode_line(r#"{"type":"error","message":"Failed to read file: gone.py"}"#),
        InboundMessage::Error {
            message: "Failed to read file: gone.py".to_owned()
        }
    );
}
