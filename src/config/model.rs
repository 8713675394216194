// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [paths]
/// scripts_dir = "scripts"
/// logs_dir = "logs"
///
/// [exec]
/// timeout = "5m"
///
/// [interpreters]
/// sh = "bash"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub exec: ExecSection,

    /// Extension (without the dot) -> interpreter program.
    ///
    /// The key set is the allow-list of runnable script types.
    #[serde(default = "default_interpreters")]
    pub interpreters: BTreeMap<String, String>,
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            paths: PathsSection::default(),
            exec: ExecSection::default(),
            interpreters: default_interpreters(),
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: PathBuf,

    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
}

fn default_scripts_dir() -> PathBuf {
    PathBuf::from("scripts")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            logs_dir: default_logs_dir(),
        }
    }
}

/// `[exec]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecSection {
    /// Duration string (`"300ms"`, `"30s"`, `"5m"`, `"1h"`) after which a
    /// running script is killed.
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

fn default_timeout() -> String {
    "5m".to_string()
}

impl Default for ExecSection {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_interpreters() -> BTreeMap<String, String> {
    BTreeMap::from([("sh".to_string(), "bash".to_string())])
}

/// Validated, immutable configuration.
///
/// Built once at startup (see [`crate::config::load_and_validate`]) and
/// handed to each component's constructor.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    scripts_dir: PathBuf,
    logs_dir: PathBuf,
    timeout: Duration,
    interpreters: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Construct without validation. Callers go through `TryFrom`.
    pub(crate) fn new_unchecked(
        scripts_dir: PathBuf,
        logs_dir: PathBuf,
        timeout: Duration,
        interpreters: BTreeMap<String, String>,
    ) -> Self {
        Self {
            scripts_dir,
            logs_dir,
            timeout,
            interpreters,
        }
    }

    pub fn scripts_dir(&self) -> &Path {
        &self.scripts_dir
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interpreters(&self) -> &BTreeMap<String, String> {
        &self.interpreters
    }

    /// Interpreter for a script extension, if that type is allowed.
    pub fn interpreter_for(&self, extension: &str) -> Option<&str> {
        self.interpreters.get(extension).map(String::as_str)
    }

    /// Return a copy with the roots replaced where an override is given.
    pub fn with_roots(mut self, scripts_dir: Option<PathBuf>, logs_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = scripts_dir {
            self.scripts_dir = dir;
        }
        if let Some(dir) = logs_dir {
            self.logs_dir = dir;
        }
        self
    }
}
