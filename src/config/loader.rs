// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the checked form.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Load `path` if given; otherwise load the default config file when it
/// exists, and fall back to built-in defaults when it does not.
///
/// An explicitly named file that is missing is an error.
pub fn load_or_default(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_and_validate(path),
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                load_and_validate(&default_path)
            } else {
                debug!(path = %default_path.display(), "no config file; using defaults");
                ConfigFile::try_from(RawConfigFile::default())
            }
        }
    }
}

/// `ScriptRunner.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("ScriptRunner.toml")
}
