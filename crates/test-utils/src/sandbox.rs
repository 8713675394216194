#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use script_runner::Runner;
use script_runner::config::{ConfigFile, RawConfigFile};
use tempfile::TempDir;

/// Throwaway scripts and logs roots with a `Runner` wired to them.
///
/// Both directories are removed when the sandbox is dropped.
pub struct Sandbox {
    pub scripts: TempDir,
    pub logs: TempDir,
    pub config: ConfigFile,
    pub runner: Runner,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::with_raw(RawConfigFile::default())
    }

    /// Build from a raw config; its `[paths]` are replaced by the temp dirs.
    pub fn with_raw(raw: RawConfigFile) -> Self {
        let scripts = tempfile::tempdir().expect("creating scripts dir");
        let logs = tempfile::tempdir().expect("creating logs dir");

        let config = ConfigFile::try_from(raw)
            .expect("sandbox config must validate")
            .with_roots(
                Some(scripts.path().to_path_buf()),
                Some(logs.path().to_path_buf()),
            );
        let runner = Runner::new(&config);

        Self {
            scripts,
            logs,
            config,
            runner,
        }
    }

    /// Write a script file (relative to the scripts root).
    pub fn add_script(&self, name: &str, body: &str) -> PathBuf {
        write_under(self.scripts.path().join(name), body.as_bytes())
    }

    /// Write a file into the logs root directly, bypassing the runner.
    pub fn add_log(&self, name: &str, body: &str) -> PathBuf {
        write_under(self.logs.path().join(name), body.as_bytes())
    }

    pub fn log_path(&self, name: &str) -> PathBuf {
        self.logs.path().join(name)
    }

    /// Raw bytes of a log file, or `None` if it does not exist.
    pub fn log_bytes(&self, name: &str) -> Option<Vec<u8>> {
        fs::read(self.log_path(name)).ok()
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

fn write_under(path: PathBuf, contents: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("creating parent dir");
    }
    fs::write(&path, contents).expect("writing fixture file");
    path
}
