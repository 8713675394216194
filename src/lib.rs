// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod paths;
pub mod service;
pub mod store;
pub mod types;

use anyhow::Result;
use tracing::debug;

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, load_or_default};
use crate::errors::RunnerError;

pub use crate::service::Runner;

/// What a command prints on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Message(String),
    Lines(Vec<String>),
}

/// High-level entry point used by `main.rs`.
///
/// Loads the configuration, builds the [`Runner`] and executes one command.
/// Returns the process exit code; configuration problems are returned as
/// errors instead.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config = load_or_default(args.config.as_deref())?
        .with_roots(args.scripts_dir, args.logs_dir);
    debug!(?config, "configuration loaded");

    let runner = Runner::new(&config);

    match execute(&runner, &config, &args.command).await {
        Ok(output) => {
            print_output(&output);
            Ok(0)
        }
        Err(err) => {
            eprintln!("{}", err.public_message());
            Ok(err.status().exit_code())
        }
    }
}

/// Execute one command against `runner`.
pub async fn execute(
    runner: &Runner,
    config: &ConfigFile,
    command: &Command,
) -> std::result::Result<Output, RunnerError> {
    match command {
        Command::Run { script, timeout } => {
            let result = match timeout {
                Some(raw) => runner.run_script_with_timeout_arg(script, raw).await?,
                None => runner.run_script(script).await?,
            };
            Ok(Output::Message(result.message))
        }
        Command::Read { log } => runner.read_log(log).await.map(Output::Lines),
        Command::Tail { log, lines } => runner.tail_log(log, *lines).await.map(Output::Lines),
        Command::Clear { log } => runner.clear_log(log).await.map(Output::Message),
        Command::Scripts => runner.list_scripts().await.map(Output::Lines),
        Command::Logs => runner.list_logs().await.map(Output::Lines),
        Command::Check => Ok(Output::Lines(describe_config(config))),
    }
}

fn print_output(output: &Output) {
    match output {
        Output::Message(msg) => println!("{msg}"),
        Output::Lines(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
    }
}

/// Human-readable summary of the effective configuration.
fn describe_config(config: &ConfigFile) -> Vec<String> {
    let mut lines = vec![
        "script-runner configuration".to_string(),
        format!("  paths.scripts_dir = {}", config.scripts_dir().display()),
        format!("  paths.logs_dir = {}", config.logs_dir().display()),
        format!("  exec.timeout = {:?}", config.timeout()),
        format!("interpreters ({}):", config.interpreters().len()),
    ];
    for (ext, program) in config.interpreters() {
        lines.push(format!("  .{ext} -> {program}"));
    }
    lines
}
