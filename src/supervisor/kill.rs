//! Platform-specific forced process-tree termination.
//!
//! A child agent may itself spawn helper processes that must not be
//! orphaned when the host shuts down. On POSIX the agent is spawned into
//! its own process group and the whole group is killed; on Windows
//! `taskkill /T /F` walks the tree for us.

use tracing::{debug, warn};

/// Forcefully terminate `pid` and its descendants.
///
/// Idempotent: signalling an already-exited process is a logged no-op.
pub(crate) fn kill_process_tree(pid: u32) {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        let Ok(raw) = i32::try_from(pid) else {
            warn!(pid, "pid out of range for signal delivery");
            return;
        };

        match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
            Ok(()) => debug!(pid, "agent process group killed"),
            Err(Errno::ESRCH) => debug!(pid, "agent process group already gone"),
            Err(err) => warn!(pid, %err, "failed to kill agent process group"),
        }
    }

    #[cfg(not(unix))]
    {
        match std::process::Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/T", "/F"])
            .status()
        {
            Ok(status) if status.success() => debug!(pid, "agent process tree killed"),
            Ok(status) => debug!(pid, %status, "taskkill reported non-zero status"),
            Err(err) => warn!(pid, %err, "failed to run taskkill"),
        }
    }
}
