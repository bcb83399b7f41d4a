//! Global configuration parsing and validation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::supervisor::SpawnConfig;
use crate::{AppError, Result};

/// Agent process settings: what to launch and where.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AgentConfig {
    /// Interpreter or binary used to launch the agent (e.g. `python`).
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Script path passed as the first argument, if the agent is a script.
    #[serde(default)]
    pub script: Option<PathBuf>,
    /// Additional arguments appended after the script path.
    #[serde(default)]
    pub args: Vec<String>,
    /// Directory the agent process starts in; also the default project root.
    pub workspace_root: PathBuf,
    /// Environment variables injected on top of the inherited environment.
    #[serde(default = "default_env")]
    pub env: HashMap<String, String>,
}

fn default_executable() -> String {
    "python".into()
}

/// Agents are commonly Python processes; without this their stdout can
/// fall back to a non-UTF-8 codepage on some platforms and break framing.
fn default_env() -> HashMap<String, String> {
    HashMap::from([("PYTHONIOENCODING".to_owned(), "utf-8".to_owned())])
}

/// Bridge channel sizing.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BridgeConfig {
    /// Capacity of the command and event channels.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    64
}

/// Host-environment integration settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct HostConfig {
    /// Path to an editor `settings.json` (JSON with comments) to mirror
    /// editor preferences from. Absent or unreadable files are ignored.
    #[serde(default)]
    pub editor_settings: Option<PathBuf>,
}

/// Global configuration parsed from `bridge.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Agent launch settings.
    pub agent: AgentConfig,
    /// Bridge channel settings.
    #[serde(default)]
    pub bridge: BridgeConfig,
    /// Host-environment integration settings.
    #[serde(default)]
    pub host: HostConfig,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and normalize paths.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Absolute path to the workspace root.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.agent.workspace_root
    }

    /// Build the spawn configuration for the supervisor.
    #[must_use]
    pub fn spawn_config(&self) -> SpawnConfig {
        SpawnConfig {
            executable: self.agent.executable.clone(),
            script: self.agent.script.clone(),
            args: self.agent.args.clone(),
            working_dir: self.agent.workspace_root.clone(),
            env: self.agent.env.clone(),
        }
    }

    fn validate(&mut self) -> Result<()> {
        if self.agent.executable.trim().is_empty() {
            return Err(AppError::Config(
                "agent.executable must not be empty".into(),
            ));
        }

        if self.bridge.channel_capacity == 0 {
            return Err(AppError::Config(
                "bridge.channel_capacity must be greater than zero".into(),
            ));
        }

        let canonical_root = self
            .agent
            .workspace_root
            .canonicalize()
            .map_err(|err| AppError::Config(format!("agent.workspace_root invalid: {err}")))?;
        self.agent.workspace_root = canonical_root;

        Ok(())
    }
}
