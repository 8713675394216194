// src/store/scripts.rs

use std::path::PathBuf;

use tracing::debug;

use crate::errors::{Result, RunnerError};
use crate::paths;
use crate::types::ScriptEntry;

/// Read-only view of the scripts root.
#[derive(Debug, Clone)]
pub struct ScriptStore {
    root: PathBuf,
}

impl ScriptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Names of the regular files directly in the scripts root, sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        super::list_regular_files(&self.root).await
    }

    /// Find an existing script file by name.
    ///
    /// Anything that does not resolve to a regular file inside the root,
    /// including traversal attempts, is [`RunnerError::ScriptNotFound`].
    pub async fn locate(&self, name: &str) -> Result<ScriptEntry> {
        let path = paths::resolve_masked(name, &self.root, RunnerError::ScriptNotFound)?;

        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            debug!(script = %name, "no such script file");
            return Err(RunnerError::ScriptNotFound(name.to_string()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_owned);

        Ok(ScriptEntry {
            name: name.to_string(),
            path,
            extension,
        })
    }
}
