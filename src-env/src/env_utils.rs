//! Environment variable utilities
//!
//! `ONOPT_DIR` points to the project root; generated data goes to
//! `$ONOPT_DIR/data_generated`.

use crate::constants::{DATA_GENERATED, ONOPT_DIR, RECORDS};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Error type for environment variable issues
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "ONOPT_DIR environment variable is not set. Please set it to the project root directory (e.g., export ONOPT_DIR=/path/to/onopt)"
    )]
    OnoptDirNotSet,

    #[error("ONOPT_DIR points to a non-existent directory: {0}")]
    OnoptDirNotFound(PathBuf),

    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validates a raw `ONOPT_DIR` value.
pub fn onopt_dir_from(value: Option<OsString>) -> Result<PathBuf, EnvError> {
    let path = PathBuf::from(value.filter(|v| !v.is_empty()).ok_or(EnvError::OnoptDirNotSet)?);

    if !path.is_dir() {
        return Err(EnvError::OnoptDirNotFound(path));
    }

    Ok(path)
}

/// Get the ONOPT_DIR environment variable and validate it exists
///
/// # Errors
///
/// Returns an error if:
/// - ONOPT_DIR is not set
/// - ONOPT_DIR points to a non-existent directory
///
/// # Example
///
/// ```no_run
/// use onopt_env::get_onopt_dir;
///
/// let onopt_dir = get_onopt_dir()?;
/// println!("onopt directory: {}", onopt_dir.display());
/// # Ok::<(), onopt_env::EnvError>(())
/// ```
pub fn get_onopt_dir() -> Result<PathBuf, EnvError> {
    onopt_dir_from(env::var_os(ONOPT_DIR))
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, EnvError> {
    if !path.exists() {
        log::debug!("creating {}", path.display());
        std::fs::create_dir_all(&path)
            .map_err(|source| EnvError::DirectoryCreationFailed { path: path.clone(), source })?;
    }
    Ok(path)
}

/// `root/data_generated`, created if necessary
pub fn data_generated_dir_in(root: &Path) -> Result<PathBuf, EnvError> {
    ensure_dir(root.join(DATA_GENERATED))
}

/// `root/data_generated/records`, created if necessary
pub fn records_dir_in(root: &Path) -> Result<PathBuf, EnvError> {
    ensure_dir(data_generated_dir_in(root)?.join(RECORDS))
}

/// Get the path to the records subdirectory within data_generated
///
/// This is where the benchmark CLI writes convergence curves and
/// performance profiles when no output directory is given.
pub fn get_records_dir() -> Result<PathBuf, EnvError> {
    records_dir_in(&get_onopt_dir()?)
}

/// Output directory to use: `explicit` if given, otherwise the records directory.
pub fn resolve_output_dir(explicit: Option<&Path>) -> Result<PathBuf, EnvError> {
    match explicit {
        Some(path) => ensure_dir(path.to_path_buf()),
        None => get_records_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onopt_dir_not_set() {
        assert!(matches!(onopt_dir_from(None), Err(EnvError::OnoptDirNotSet)));
        assert!(matches!(onopt_dir_from(Some(OsString::new())), Err(EnvError::OnoptDirNotSet)));
    }

    #[test]
    fn test_onopt_dir_nonexistent() {
        let result = onopt_dir_from(Some(OsString::from("/this/path/should/not/exist")));
        assert!(matches!(result, Err(EnvError::OnoptDirNotFound(_))));
    }

    #[test]
    fn test_records_dir_is_created() {
        let root = tempfile::tempdir().unwrap();
        assert_eq!(onopt_dir_from(Some(root.path().into())).unwrap(), root.path());

        let records = records_dir_in(root.path()).unwrap();
        assert_eq!(records, root.path().join("data_generated").join("records"));
        assert!(records.is_dir());
        assert!(root.path().join("data_generated").is_dir());

        // idempotent
        assert_eq!(records_dir_in(root.path()).unwrap(), records);
    }

    #[test]
    fn test_explicit_output_dir() {
        let root = tempfile::tempdir().unwrap();
        let wanted = root.path().join("curves").join("sphere");
        assert_eq!(resolve_output_dir(Some(&wanted)).unwrap(), wanted);
        assert!(wanted.is_dir());
    }
}
