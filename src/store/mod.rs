// src/store/mod.rs

//! Filesystem-backed stores for scripts and their logs.
//!
//! - [`scripts`] lists and locates runnable files in the scripts root.
//! - [`logs`] owns the logs root: list, read, tail, clear and append.
//! - [`locks`] is the per-log advisory lock table shared by appenders and
//!   `clear`.
//! - [`tail`] reads the end of a file without loading the rest of it.

pub mod locks;
pub mod logs;
pub mod scripts;
pub mod tail;

use std::io::ErrorKind;
use std::path::Path;

use crate::errors::Result;

pub use locks::{LogGuard, LogLocks};
pub use logs::{LogAppender, LogStore};
pub use scripts::ScriptStore;

/// Names of the regular files directly inside `root`, sorted.
///
/// Subdirectories and symlinks are skipped. A missing root lists as empty.
pub(crate) async fn list_regular_files(root: &Path) -> Result<Vec<String>> {
    let mut dir = match tokio::fs::read_dir(root).await {
        Ok(dir) => dir,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}
