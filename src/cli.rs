// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `script-runner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "script-runner",
    version,
    about = "Run allow-listed scripts and inspect their logs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `ScriptRunner.toml` in the current working directory if it
    /// exists, built-in defaults otherwise.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override `[paths].scripts_dir`.
    #[arg(long, value_name = "DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// Override `[paths].logs_dir`.
    #[arg(long, value_name = "DIR")]
    pub logs_dir: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SCRIPT_RUNNER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a script from the scripts directory, appending its output to
    /// `<script>.log`.
    Run {
        script: String,

        /// Kill the script after this long (e.g. "30s", "5m").
        #[arg(long, value_name = "DURATION")]
        timeout: Option<String>,
    },

    /// Print every line of a log file.
    Read { log: String },

    /// Print the last lines of a log file.
    Tail {
        log: String,

        /// Number of lines (default 10).
        #[arg(short = 'n', long, value_name = "LINES", allow_negative_numbers = true)]
        lines: Option<i64>,
    },

    /// Truncate a log file.
    Clear { log: String },

    /// List runnable scripts.
    Scripts,

    /// List log files.
    Logs,

    /// Validate the configuration and print the effective values.
    Check,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
