// src/errors.rs

//! Crate-wide error type and the caller-facing status mapping.
//!
//! Every operation in the core returns [`Result`]. The [`Runner`] boundary
//! turns a [`RunnerError`] into a [`Status`] plus a message that is safe to
//! show to whoever supplied the name. Path-safety violations never leak past
//! that boundary with their own wording.
//!
//! [`Runner`]: crate::service::Runner

use std::fmt;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    /// Missing or empty identifier parameter.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Resolution would escape the configured root. Internal only.
    #[error("Path escapes its root: {0}")]
    PathTraversal(String),

    #[error("Script not found: {0}")]
    ScriptNotFound(String),

    #[error("Unsupported script type: {0}")]
    UnsupportedScriptType(String),

    #[error("Execution failed: {0}")]
    Execution(#[from] ExecFailure),

    #[error("Log not found: {0}")]
    LogNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a script run did not complete.
#[derive(Error, Debug)]
pub enum ExecFailure {
    #[error("could not spawn '{script}': {source}")]
    Spawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{script}' timed out after {after:?}")]
    Timeout { script: String, after: Duration },

    #[error("I/O while running '{script}': {source}")]
    Io {
        script: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RunnerError>;

/// Caller-facing outcome class of an operation.
///
/// `code()` gives an HTTP-style number for web front ends: 401 missing
/// parameter, 402 unknown name, 403 unsupported type. `exit_code()` is the
/// CLI equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    MissingParameter,
    NotFound,
    Unsupported,
    InvalidArgument,
    ExecutionFailed,
    Internal,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::MissingParameter => 401,
            Status::NotFound => 402,
            Status::Unsupported => 403,
            Status::InvalidArgument => 422,
            Status::ExecutionFailed => 500,
            Status::Internal => 503,
        }
    }

    /// Process exit code used by the CLI front end.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Internal => 1,
            Status::MissingParameter => 2,
            Status::NotFound => 3,
            Status::Unsupported => 4,
            Status::InvalidArgument => 5,
            Status::ExecutionFailed => 6,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl RunnerError {
    pub fn status(&self) -> Status {
        match self {
            RunnerError::InvalidName(_) => Status::MissingParameter,
            RunnerError::PathTraversal(_)
            | RunnerError::ScriptNotFound(_)
            | RunnerError::LogNotFound(_) => Status::NotFound,
            RunnerError::UnsupportedScriptType(_) => Status::Unsupported,
            RunnerError::InvalidArgument(_) => Status::InvalidArgument,
            RunnerError::Execution(_) => Status::ExecutionFailed,
            RunnerError::ConfigError(_)
            | RunnerError::IoError(_)
            | RunnerError::TomlError(_)
            | RunnerError::Other(_) => Status::Internal,
        }
    }

    /// Message safe to hand back to the caller.
    pub fn public_message(&self) -> String {
        match self {
            RunnerError::InvalidName(_) => "Provide a name as a parameter".to_string(),
            RunnerError::PathTraversal(_) => "Name provided is invalid".to_string(),
            RunnerError::ScriptNotFound(_) => "Script name provided is invalid".to_string(),
            RunnerError::LogNotFound(_) => "File name provided is invalid".to_string(),
            RunnerError::UnsupportedScriptType(_) => "Unsupported script type".to_string(),
            RunnerError::InvalidArgument(msg) => format!("Invalid argument: {msg}"),
            RunnerError::Execution(ExecFailure::Timeout { after, .. }) => {
                format!("Script timed out after {after:?}")
            }
            RunnerError::Execution(_) => "Script could not be executed".to_string(),
            RunnerError::ConfigError(_)
            | RunnerError::IoError(_)
            | RunnerError::TomlError(_)
            | RunnerError::Other(_) => "Internal error".to_string(),
        }
    }
}
