// src/store/locks.rs

//! Per-log advisory locks.
//!
//! Every writer of a log file (a running script, `append_log`, `clear`)
//! holds the lock for that file's resolved path for as long as it writes.
//! Readers do not take it. The guard is released on drop, so every exit path
//! of the holder releases it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;

/// Held for the duration of a write to one log file.
pub type LogGuard = OwnedMutexGuard<()>;

/// Lock table keyed by resolved log path. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct LogLocks {
    table: Arc<Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>>,
}

impl LogLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `path`.
    pub async fn acquire(&self, path: &Path) -> LogGuard {
        let lock = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries nobody holds or waits on can go.
            table.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(table.entry(path.to_path_buf()).or_default())
        };

        trace!(path = %path.display(), "waiting for log lock");
        lock.lock_owned().await
    }

    /// Number of paths currently tracked.
    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
