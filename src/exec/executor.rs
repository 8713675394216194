// src/exec/executor.rs

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::errors::{ExecFailure, Result, RunnerError};
use crate::exec::process::run_captured;
use crate::store::{LogStore, ScriptStore};
use crate::types::{ExecutionResult, ScriptEntry, log_name_for};

/// Runs allow-listed scripts from the scripts root.
///
/// Each run holds the lock of its log file from before the child is spawned
/// until after it has been reaped, so two runs of the same script append one
/// after the other. Runs of different scripts do not wait on each other.
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    scripts: ScriptStore,
    logs: LogStore,
    config: Arc<ConfigFile>,
}

impl ScriptExecutor {
    pub fn new(config: &ConfigFile, scripts: ScriptStore, logs: LogStore) -> Self {
        Self {
            scripts,
            logs,
            config: Arc::new(config.clone()),
        }
    }

    /// Run a script with the configured timeout.
    pub async fn run(&self, script_name: &str) -> Result<ExecutionResult> {
        self.run_with_timeout(script_name, self.config.timeout()).await
    }

    /// Run a script, killing it if it is still running after `timeout`.
    ///
    /// Nothing is spawned and no log is touched unless the name resolves to
    /// an existing file whose extension is on the allow-list. A script that
    /// exits non-zero is still a successful call.
    pub async fn run_with_timeout(
        &self,
        script_name: &str,
        timeout: Duration,
    ) -> Result<ExecutionResult> {
        let script = self.scripts.locate(script_name).await?;
        let interpreter = self.interpreter_for(&script)?;

        let log_name = log_name_for(script_name);
        let appender = self.logs.begin_append(&log_name).await.map_err(|e| match e {
            RunnerError::IoError(source) => RunnerError::Execution(ExecFailure::Io {
                script: script_name.to_string(),
                source,
            }),
            other => other,
        })?;

        let status = run_captured(interpreter, &script, &appender, timeout).await?;
        let log = appender.finish().await?;

        let exit_code = status.code();
        let success = status.success();
        info!(
            script = %script_name,
            exit_code = ?exit_code,
            success,
            log_bytes = log.len,
            "script process exited"
        );

        let message = match exit_code {
            Some(code) => format!("Script ran: {script_name} (exit code {code})"),
            None => format!("Script ran: {script_name} (terminated by signal)"),
        };

        Ok(ExecutionResult {
            script,
            exit_code,
            success,
            log,
            message,
        })
    }

    fn interpreter_for(&self, script: &ScriptEntry) -> Result<&str> {
        let interpreter = script
            .extension
            .as_deref()
            .and_then(|ext| self.config.interpreter_for(ext));

        match interpreter {
            Some(program) => Ok(program),
            None => {
                debug!(
                    script = %script.name,
                    extension = ?script.extension,
                    "extension not on the allow-list"
                );
                Err(RunnerError::UnsupportedScriptType(script.name.clone()))
            }
        }
    }
}
