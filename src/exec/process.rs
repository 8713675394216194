// src/exec/process.rs

//! Child process handling for a single script run.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::errors::{ExecFailure, Result};
use crate::store::LogAppender;
use crate::types::ScriptEntry;

/// Run `interpreter <script path>` with both output streams appended to
/// `log`, waiting at most `timeout`.
///
/// The interpreter leads its own process group. On timeout the whole group
/// is killed and the interpreter reaped before the error is returned, so
/// nothing the script started keeps writing once the log lock is released.
/// If the returned future is dropped early the interpreter is killed as well
/// (`kill_on_drop`).
pub async fn run_captured(
    interpreter: &str,
    script: &ScriptEntry,
    log: &LogAppender,
    timeout: Duration,
) -> Result<ExitStatus> {
    let io_failure = |source| ExecFailure::Io {
        script: script.name.clone(),
        source,
    };

    let stdout = log.stdio().await.map_err(io_failure)?;
    let stderr = log.stdio().await.map_err(io_failure)?;

    let mut cmd = Command::new(interpreter);
    cmd.arg(&script.path)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .kill_on_drop(true);
    #[cfg(unix)]
    cmd.process_group(0);

    let mut child = cmd.spawn().map_err(|source| ExecFailure::Spawn {
        script: script.name.clone(),
        source,
    })?;

    info!(
        script = %script.name,
        interpreter,
        pid = child.id(),
        log = %log.name(),
        "script process started"
    );

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(status) => Ok(status.map_err(io_failure)?),
        Err(_elapsed) => {
            warn!(
                script = %script.name,
                timeout = ?timeout,
                "script timed out; killing process"
            );
            kill_process_group(&child);
            if let Err(e) = child.kill().await {
                warn!(
                    script = %script.name,
                    error = %e,
                    "failed to kill timed-out process"
                );
            }
            Err(ExecFailure::Timeout {
                script: script.name.clone(),
                after: timeout,
            }
            .into())
        }
    }
}

/// Send `SIGKILL` to the process group led by `child`.
///
/// The child must have been spawned with `process_group(0)` and not yet been
/// reaped, so its pid is still the group id.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    if let Some(pid) = child.id()
        && let Ok(pid) = i32::try_from(pid)
    {
        if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
            tracing::debug!(pid, error = %e, "killpg failed");
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}
