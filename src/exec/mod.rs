// src/exec/mod.rs

//! Script execution layer.
//!
//! - [`executor`] holds [`ScriptExecutor`], which checks a script name,
//!   picks its interpreter from the allow-list and hands the run to
//!   [`process`].
//! - [`process`] spawns the interpreter with `tokio::process::Command`,
//!   pointing stdout/stderr at the script's log, and enforces the timeout.
//!
//! No shell is involved: the script path is passed to the interpreter as a
//! single argument.

pub mod executor;
pub mod process;

pub use executor::ScriptExecutor;
