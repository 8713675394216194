// src/store/logs.rs

//! The logs root and the operations on its files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::errors::{Result, RunnerError};
use crate::paths;
use crate::store::locks::{LogGuard, LogLocks};
use crate::store::tail::{split_lines, tail_lines};
use crate::types::{DEFAULT_TAIL_LINES, LogFile};

/// Owns a directory of log files.
///
/// Writers (`append_log`, `begin_append`, `clear`) serialize per file through
/// the shared [`LogLocks`]. Readers (`list`, `read`, `tail`, `stat`) are
/// lock-free and may observe a concurrent append part-way through.
#[derive(Debug, Clone)]
pub struct LogStore {
    root: PathBuf,
    locks: LogLocks,
}

impl LogStore {
    pub fn new(root: impl Into<PathBuf>, locks: LogLocks) -> Self {
        Self {
            root: root.into(),
            locks,
        }
    }

    /// Names of the regular files directly in the logs root, sorted.
    pub async fn list(&self) -> Result<Vec<String>> {
        super::list_regular_files(&self.root).await
    }

    /// Path and current size of an existing log.
    pub async fn stat(&self, name: &str) -> Result<LogFile> {
        let path = self.existing(name).await?;
        let len = fs::metadata(&path).await?.len();
        Ok(LogFile {
            name: name.to_string(),
            path,
            len,
        })
    }

    /// Full contents of a log as lines.
    pub async fn read(&self, name: &str) -> Result<Vec<String>> {
        let path = self.existing(name).await?;
        let bytes = fs::read(&path).await.map_err(|e| self.io_error(name, e))?;
        Ok(split_lines(&bytes))
    }

    /// The last `lines` lines of a log (10 when `None`).
    pub async fn tail(&self, name: &str, lines: Option<i64>) -> Result<Vec<String>> {
        let n = match lines {
            None => DEFAULT_TAIL_LINES,
            Some(n) if n < 0 => {
                return Err(RunnerError::InvalidArgument(format!(
                    "line count must not be negative (got {n})"
                )));
            }
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
        };

        let path = self.existing(name).await?;
        tail_lines(&path, n)
            .await
            .map_err(|e| self.io_error(name, e))
    }

    /// Truncate a log to zero length. Clearing an empty log is a no-op.
    pub async fn clear(&self, name: &str) -> Result<()> {
        let path = self.resolve(name)?;
        let _guard = self.locks.acquire(&path).await;

        if !is_regular_file(&path).await {
            return Err(RunnerError::LogNotFound(name.to_string()));
        }

        // No `create`: a log removed in the meantime stays removed.
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|e| self.io_error(name, e))?;

        info!(log = %name, "log cleared");
        Ok(())
    }

    /// Append `bytes` to a log, creating it if needed.
    pub async fn append_log(&self, name: &str, bytes: &[u8]) -> Result<LogFile> {
        let mut appender = self.begin_append(name).await?;
        appender.write_all(bytes).await?;
        appender.finish().await
    }

    /// Take the write lock for a log and open it for appending.
    ///
    /// The returned [`LogAppender`] keeps the lock until it is dropped.
    pub async fn begin_append(&self, name: &str) -> Result<LogAppender> {
        let path = self.resolve(name)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let guard = self.locks.acquire(&path).await;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        debug!(log = %name, path = %path.display(), "log opened for append");
        Ok(LogAppender {
            name: name.to_string(),
            path,
            file,
            _guard: guard,
        })
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        paths::resolve_masked(name, &self.root, RunnerError::LogNotFound)
    }

    /// Resolve `name` and require it to be an existing regular file.
    async fn existing(&self, name: &str) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        if is_regular_file(&path).await {
            Ok(path)
        } else {
            Err(RunnerError::LogNotFound(name.to_string()))
        }
    }

    fn io_error(&self, name: &str, err: std::io::Error) -> RunnerError {
        if err.kind() == ErrorKind::NotFound {
            RunnerError::LogNotFound(name.to_string())
        } else {
            RunnerError::IoError(err)
        }
    }
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// An open, locked append stream to one log file.
#[derive(Debug)]
pub struct LogAppender {
    name: String,
    path: PathBuf,
    file: File,
    _guard: LogGuard,
}

impl LogAppender {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes).await?;
        Ok(())
    }

    /// A handle onto the same append stream, for a child's stdout/stderr.
    pub async fn stdio(&self) -> std::io::Result<Stdio> {
        let handle = self.file.try_clone().await?;
        Ok(Stdio::from(handle.into_std().await))
    }

    /// Flush, release the lock and report the log's new size.
    pub async fn finish(mut self) -> Result<LogFile> {
        self.file.flush().await?;
        let len = fs::metadata(&self.path).await?.len();
        Ok(LogFile {
            name: self.name,
            path: self.path,
            len,
        })
    }
}
