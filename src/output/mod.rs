//! Output writers for sessions, reports and call graphs.
//!
//! This module handles writing data to disk in various formats:
//! - JSON sessions and reports
//! - DOT call graphs
//! - Text summaries

pub mod dot;
pub mod json;
pub mod summary;

// Re-export main functions
pub use dot::{render_dot, write_dot};
pub use json::{read_report, read_session, write_report, write_session};
pub use summary::render_summary;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Common path validation for output files
///
/// Rejects empty paths and directories, and creates missing parent
/// directories.
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_validate_path_creates_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a/b/out.dot");

        validate_path(&nested).unwrap();
        assert!(nested.parent().unwrap().is_dir());
    }
}
