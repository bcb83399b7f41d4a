#![forbid(unsafe_code)]

//! `agent-bridge` — headless host shell binary.
//!
//! Bootstraps configuration, launches the agent process through the
//! supervisor, and runs the dispatch loop: bridge events feed the
//! router, router follow-ups feed the bridge. Terminates the agent's
//! whole process tree on ctrl-c / SIGTERM.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use agent_bridge::bridge::{Bridge, BridgeEvent};
use agent_bridge::config::GlobalConfig;
use agent_bridge::host::load_editor_settings;
use agent_bridge::router::Router;
use agent_bridge::supervisor::Supervisor;
use agent_bridge::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "agent-bridge", about = "Host/agent stdio bridge", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Override the configured workspace root.
    #[arg(long)]
    workspace: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("agent-bridge bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = GlobalConfig::load_from_path(&args.config)?;

    // Override workspace root from CLI if provided.
    if let Some(ws) = args.workspace {
        let canonical = ws
            .canonicalize()
            .map_err(|err| AppError::Config(format!("invalid workspace override: {err}")))?;
        config.agent.workspace_root = canonical;
    }
    info!(workspace = %config.workspace_root().display(), "configuration loaded");

    // ── Mirror editor settings, best-effort ─────────────
    if let Some(ref settings_path) = config.host.editor_settings {
        match load_editor_settings(settings_path) {
            Some(map) => debug!(keys = map.len(), "editor settings loaded"),
            None => debug!("no usable editor settings found"),
        }
    }

    // ── Launch the agent ────────────────────────────────
    let supervisor = Supervisor::new(config.spawn_config());
    let (bridge, mut events) = Bridge::launch(supervisor, config.bridge.channel_capacity)
        .map_err(|err| {
            error!(%err, "agent startup failed; fix the configuration and restart");
            err
        })?;
    info!("agent bridge ready");

    // ── Dispatch loop ───────────────────────────────────
    let mut router = Router::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => {
                info!("shutdown signal received");
                break;
            }

            event = events.recv() => {
                match event {
                    None => {
                        debug!("event channel closed");
                        break;
                    }
                    Some(BridgeEvent::Message(message)) => {
                        if let Some(follow_up) = router.dispatch(message) {
                            bridge.send(follow_up);
                        }
                    }
                    Some(BridgeEvent::AgentExited { code }) => {
                        router.on_disconnect(code);
                        warn!(?code, "agent exited unexpectedly; restart the host to reconnect");
                        break;
                    }
                }
            }
        }
    }

    // ── Tear down the agent process tree ────────────────
    bridge.shutdown().await;
    info!("agent-bridge shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
