// src/paths.rs

//! Confine caller-supplied names to a configured root directory.
//!
//! [`resolve`] is the only way the rest of the crate turns a name into a
//! filesystem path. It works in two passes:
//!
//! 1. Lexical: the name is normalised component by component. `.` is
//!    dropped, `..` pops the previous component, and anything that would
//!    climb above the root (or replace it, like an absolute path) is
//!    rejected.
//! 2. Symbolic: the deepest part of the candidate that exists on disk is
//!    canonicalised and must still live under the canonical root, so a
//!    symlink inside the root cannot point the caller somewhere else.
//!
//! The target itself does not need to exist.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, RunnerError};

/// Resolve `raw_name` under `root`.
///
/// Fails with [`RunnerError::InvalidName`] for an empty name (or one that
/// normalises to the root itself) and [`RunnerError::PathTraversal`] for
/// anything that would leave the root.
pub fn resolve(raw_name: &str, root: &Path) -> Result<PathBuf> {
    if raw_name.trim().is_empty() {
        return Err(RunnerError::InvalidName("empty name".to_string()));
    }

    let relative = normalize(raw_name)?;
    if relative.as_os_str().is_empty() {
        return Err(RunnerError::InvalidName(raw_name.to_string()));
    }

    let base = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let candidate = base.join(&relative);

    if !is_contained(&base, &candidate) {
        debug!(name = %raw_name, root = %root.display(), "symbolic escape rejected");
        return Err(RunnerError::PathTraversal(raw_name.to_string()));
    }

    Ok(candidate)
}

/// [`resolve`], with every escape reported through `not_found`.
///
/// Only a genuinely empty name keeps its [`RunnerError::InvalidName`]; it is
/// the caller's missing parameter, not a probe of the directory layout.
pub fn resolve_masked<F>(raw_name: &str, root: &Path, not_found: F) -> Result<PathBuf>
where
    F: FnOnce(String) -> RunnerError,
{
    match resolve(raw_name, root) {
        Ok(path) => Ok(path),
        Err(RunnerError::InvalidName(msg)) if raw_name.trim().is_empty() => {
            Err(RunnerError::InvalidName(msg))
        }
        Err(RunnerError::InvalidName(_) | RunnerError::PathTraversal(_)) => {
            Err(not_found(raw_name.to_string()))
        }
        Err(other) => Err(other),
    }
}

/// Lexically normalise a relative name, refusing to climb above its start.
fn normalize(raw_name: &str) -> Result<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(raw_name).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(RunnerError::PathTraversal(raw_name.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(RunnerError::PathTraversal(raw_name.to_string()));
            }
        }
    }

    Ok(parts.iter().collect())
}

/// Walk up from `candidate` to the first path that exists and check that it
/// canonicalises to somewhere under `base`.
fn is_contained(base: &Path, candidate: &Path) -> bool {
    let Ok(canonical_base) = base.canonicalize() else {
        // Root not on disk yet: nothing symbolic can redirect us.
        return true;
    };

    let mut probe = Some(candidate);
    while let Some(path) = probe {
        match path.canonicalize() {
            Ok(real) => return real.starts_with(&canonical_base),
            Err(_) => {
                // A link we cannot follow would be created through on write.
                if path.symlink_metadata().is_ok() {
                    return false;
                }
                probe = path.parent();
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_name_joins_under_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();

        let path = resolve("hello.sh", dir.path()).unwrap();
        assert_eq!(path, root.join("hello.sh"));
    }

    #[test]
    fn missing_target_is_still_resolved() {
        let dir = tempdir().unwrap();
        let path = resolve("nested/later.log", dir.path()).unwrap();
        assert!(path.starts_with(dir.path().canonicalize().unwrap()));
        assert!(!path.exists());
    }

    #[test]
    fn empty_and_blank_names_are_invalid() {
        let dir = tempdir().unwrap();
        for name in ["", "   ", ".", "./", "a/.."] {
            match resolve(name, dir.path()) {
                Err(RunnerError::InvalidName(_)) => {}
                other => panic!("expected InvalidName for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn dot_dot_inside_root_is_allowed() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let path = resolve("a/../b.sh", dir.path()).unwrap();
        assert_eq!(path, root.join("b.sh"));
    }

    #[test]
    fn traversal_and_absolute_names_are_rejected() {
        let dir = tempdir().unwrap();
        for name in ["../../etc/passwd", "..", "a/../../b", "/etc/passwd"] {
            match resolve(name, dir.path()) {
                Err(RunnerError::PathTraversal(_)) => {}
                other => panic!("expected PathTraversal for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn masked_resolution_hides_traversal() {
        let dir = tempdir().unwrap();

        match resolve_masked("../../etc/passwd", dir.path(), RunnerError::LogNotFound) {
            Err(RunnerError::LogNotFound(name)) => assert_eq!(name, "../../etc/passwd"),
            other => panic!("expected LogNotFound, got {other:?}"),
        }
        assert!(matches!(
            resolve_masked(".", dir.path(), RunnerError::ScriptNotFound),
            Err(RunnerError::ScriptNotFound(_))
        ));
        assert!(matches!(
            resolve_masked("", dir.path(), RunnerError::ScriptNotFound),
            Err(RunnerError::InvalidName(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_pointing_outside_is_rejected() {
        let outside = tempdir().unwrap();
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("escape")).unwrap();

        match resolve("escape/secret.log", dir.path()) {
            Err(RunnerError::PathTraversal(_)) => {}
            other => panic!("expected PathTraversal, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_rejected() {
        let dir = tempdir().unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("dangling.log"))
            .unwrap();

        assert!(matches!(
            resolve("dangling.log", dir.path()),
            Err(RunnerError::PathTraversal(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_within_root_is_allowed() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

        assert!(resolve("alias/run.sh", dir.path()).is_ok());
    }
}
