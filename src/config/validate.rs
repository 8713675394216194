// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, RunnerError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RunnerError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_paths(&raw)?;
        validate_interpreters(&raw)?;
        let timeout = validate_timeout(&raw)?;

        Ok(ConfigFile::new_unchecked(
            raw.paths.scripts_dir,
            raw.paths.logs_dir,
            timeout,
            raw.interpreters,
        ))
    }
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    if cfg.paths.scripts_dir.as_os_str().is_empty() {
        return Err(RunnerError::ConfigError(
            "[paths].scripts_dir must not be empty".to_string(),
        ));
    }
    if cfg.paths.logs_dir.as_os_str().is_empty() {
        return Err(RunnerError::ConfigError(
            "[paths].logs_dir must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_interpreters(cfg: &RawConfigFile) -> Result<()> {
    if cfg.interpreters.is_empty() {
        return Err(RunnerError::ConfigError(
            "[interpreters] must allow at least one script type".to_string(),
        ));
    }

    for (ext, program) in cfg.interpreters.iter() {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(RunnerError::ConfigError(format!(
                "[interpreters] key '{}' must be an extension without the leading dot",
                ext
            )));
        }
        if program.trim().is_empty() {
            return Err(RunnerError::ConfigError(format!(
                "[interpreters].{} has an empty program",
                ext
            )));
        }
    }
    Ok(())
}

fn validate_timeout(cfg: &RawConfigFile) -> Result<Duration> {
    let timeout = parse_duration(&cfg.exec.timeout)
        .map_err(|e| RunnerError::ConfigError(format!("[exec].timeout: {e}")))?;

    if timeout.is_zero() {
        return Err(RunnerError::ConfigError(
            "[exec].timeout must be greater than zero".to_string(),
        ));
    }
    Ok(timeout)
}

/// Parse a duration string like `"250ms"`, `"30s"`, `"5m"` or `"1h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let secs_per_unit = match unit.as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        _ => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    value
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration too large: '{s}'"))
}
