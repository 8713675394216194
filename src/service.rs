// src/service.rs

//! Operation boundary for transports.
//!
//! [`Runner`] exposes the six operations a front end offers (run a script,
//! read/tail/clear a log, list scripts and logs). Each call returns a typed
//! [`Result`] and leaves one `tracing` record with the operation name, the
//! caller-facing status code and a message.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::{ConfigFile, parse_duration};
use crate::errors::{Result, RunnerError, Status};
use crate::exec::ScriptExecutor;
use crate::store::{LogLocks, LogStore, ScriptStore};
use crate::types::ExecutionResult;

/// The script runner core, wired from one immutable configuration.
///
/// Cheap to clone; clones share the log lock table.
#[derive(Debug, Clone)]
pub struct Runner {
    executor: ScriptExecutor,
    scripts: ScriptStore,
    logs: LogStore,
}

impl Runner {
    pub fn new(config: &ConfigFile) -> Self {
        let locks = LogLocks::new();
        let scripts = ScriptStore::new(config.scripts_dir());
        let logs = LogStore::new(config.logs_dir(), locks);
        let executor = ScriptExecutor::new(config, scripts.clone(), logs.clone());

        Self {
            executor,
            scripts,
            logs,
        }
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    /// RunScript with the configured timeout.
    pub async fn run_script(&self, name: &str) -> Result<ExecutionResult> {
        let res = self.executor.run(name).await;
        report("run", res, |r| r.message.clone())
    }

    /// RunScript with an explicit timeout.
    pub async fn run_script_with_timeout(
        &self,
        name: &str,
        timeout: Duration,
    ) -> Result<ExecutionResult> {
        let res = self.executor.run_with_timeout(name, timeout).await;
        report("run", res, |r| r.message.clone())
    }

    /// RunScript with a caller-supplied duration string such as `"30s"`.
    ///
    /// A string that does not parse is [`RunnerError::InvalidArgument`] and
    /// nothing is run.
    pub async fn run_script_with_timeout_arg(
        &self,
        name: &str,
        timeout: &str,
    ) -> Result<ExecutionResult> {
        let res = match parse_duration(timeout) {
            Ok(timeout) => self.executor.run_with_timeout(name, timeout).await,
            Err(e) => Err(RunnerError::InvalidArgument(format!("timeout: {e}"))),
        };
        report("run", res, |r| r.message.clone())
    }

    /// ReadLog.
    pub async fn read_log(&self, name: &str) -> Result<Vec<String>> {
        let res = self.logs.read(name).await;
        report("read", res, |_| format!("Reading file {name}"))
    }

    /// TailLog; `lines` defaults to 10.
    pub async fn tail_log(&self, name: &str, lines: Option<i64>) -> Result<Vec<String>> {
        let res = self.logs.tail(name, lines).await;
        report("tail", res, |l| format!("Tailing file {name} ({} lines)", l.len()))
    }

    /// ClearLog; returns the confirmation message.
    pub async fn clear_log(&self, name: &str) -> Result<String> {
        let res = self
            .logs
            .clear(name)
            .await
            .map(|()| format!("Cleared file {name}"));
        report("clear", res, String::clone)
    }

    /// ListScripts.
    pub async fn list_scripts(&self) -> Result<Vec<String>> {
        let res = self.scripts.list().await;
        report("list_scripts", res, |n| format!("{} scripts", n.len()))
    }

    /// ListLogs.
    pub async fn list_logs(&self) -> Result<Vec<String>> {
        let res = self.logs.list().await;
        report("list_logs", res, |n| format!("{} logs", n.len()))
    }
}

/// Log one line for the outcome of `op` and hand the result back unchanged.
fn report<T>(op: &str, res: Result<T>, describe: impl FnOnce(&T) -> String) -> Result<T> {
    match &res {
        Ok(value) => {
            info!(op, status = %Status::Ok, message = %describe(value), "operation finished");
        }
        Err(err) => {
            warn!(
                op,
                status = %err.status(),
                message = %err.public_message(),
                error = %err,
                "operation failed"
            );
        }
    }
    res
}
