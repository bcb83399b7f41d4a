//! Read-only editor settings lookup.
//!
//! Desktop editors keep their preferences in a `settings.json` that is
//! JSON-with-comments. The host mirrors a few of those preferences
//! (font, tab width) into its own editor widget at startup. The lookup
//! is strictly best-effort: absent file, unreadable file, or unparsable
//! content all yield `None`.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// Comment syntax accepted in settings files: `// line` and `/* block */`.
const COMMENT_PATTERN: &str = r"//[^\n]*|/\*[\s\S]*?\*/";

/// Default location of the editor's `settings.json` under the user
/// config directory (`Code/User/settings.json`).
#[must_use]
pub fn default_editor_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("Code").join("User").join("settings.json"))
}

/// Load and parse an editor settings file.
///
/// Returns the top-level object, or `None` when the file is absent,
/// unreadable, or not a JSON object after comment stripping. Failures
/// are logged at debug level and never surfaced as errors.
#[must_use]
pub fn load_editor_settings(path: &Path) -> Option<Map<String, Value>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(path = %path.display(), %err, "editor settings not readable");
            return None;
        }
    };

    let stripped = strip_jsonc_comments(&raw);

    match serde_json::from_str::<Value>(&stripped) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            debug!(path = %path.display(), "editor settings are not a JSON object");
            None
        }
        Err(err) => {
            debug!(path = %path.display(), %err, "editor settings failed to parse");
            None
        }
    }
}

/// Remove `//` and `/* */` comments from JSONC text.
fn strip_jsonc_comments(raw: &str) -> String {
    match Regex::new(COMMENT_PATTERN) {
        Ok(re) => re.replace_all(raw, "").into_owned(),
        // The pattern is a constant; if it ever fails to compile, fall
        // through and let the JSON parser reject the raw text.
        Err(_) => raw.to_owned(),
    }
}
