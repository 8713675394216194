// src/types.rs

//! Shared value types passed between the stores, the executor and callers.

use std::path::PathBuf;

/// Suffix appended to a script name to get its execution log name.
pub const LOG_SUFFIX: &str = ".log";

/// Number of lines returned by a tail when the caller does not say.
pub const DEFAULT_TAIL_LINES: usize = 10;

/// Name of the log file that collects output of `script_name`.
pub fn log_name_for(script_name: &str) -> String {
    format!("{script_name}{LOG_SUFFIX}")
}

/// A runnable file found in the scripts root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub name: String,
    pub path: PathBuf,
    /// Extension without the dot, if any.
    pub extension: Option<String>,
}

/// A log file in the logs root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub name: String,
    pub path: PathBuf,
    /// Length in bytes when this value was taken.
    pub len: u64,
}

/// Outcome of one completed script run.
///
/// A non-zero exit code is still a completed run; `success` only reflects
/// what the script itself reported.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub script: ScriptEntry,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    pub log: LogFile,
    pub message: String,
}
