//! JSON output for sessions and reports.
//!
//! Sessions are the stored form of a trace; reports are what a viewer shows.
//! Both are written pretty-printed.

use super::validate_path;
use crate::report::CallTreeReport;
use crate::session::Session;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a session to a JSON file
///
/// **Public** - main entry point for session storage
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_session(session: &Session, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing session {} to: {}", session.uuid(), output_path.display());
    write_json(session, output_path)
}

/// Read a session back from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error, or a graph with
///   dangling edges
pub fn read_session(input_path: impl AsRef<Path>) -> Result<Session, OutputError> {
    let session: Session = read_json(input_path.as_ref())?;
    debug!(
        "Session loaded: {} ({} nodes)",
        session.uuid(),
        session.graph().node_count()
    );
    Ok(session)
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for report output
pub fn write_report(report: &CallTreeReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing report to: {}", output_path.display());
    write_json(report, output_path)
}

/// Read a report from a JSON file
pub fn read_report(input_path: impl AsRef<Path>) -> Result<CallTreeReport, OutputError> {
    let report: CallTreeReport = read_json(input_path.as_ref())?;
    debug!("Report loaded: version {}", report.version);
    Ok(report)
}

fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    validate_path(output_path)?;

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;

    info!(
        "Written successfully ({} bytes)",
        calculate_file_size(output_path)
    );
    Ok(())
}

fn read_json<T: DeserializeOwned>(input_path: &Path) -> Result<T, OutputError> {
    debug!("Reading JSON from: {}", input_path.display());

    let file = File::open(input_path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{CallRecord, CallStat};
    use crate::parser::symbol::FrameIdentity;
    use crate::report::to_report;
    use tempfile::NamedTempFile;

    fn create_test_session() -> Session {
        let stats = vec![CallStat {
            code: FrameIdentity::code("views.py", "app.views", "index"),
            callcount: 1,
            reccallcount: 0,
            inlinetime: 0.1,
            totaltime: 0.30000000000000004,
            calls: vec![CallRecord {
                code: FrameIdentity::Builtin("<built-in method sleep>".to_string()),
                callcount: 2,
                reccallcount: 0,
                inlinetime: 0.2,
                totaltime: 0.2,
            }],
        }];
        Session::new(&stats, Some("/index".to_string()), None).unwrap()
    }

    #[test]
    fn test_write_and_read_session() {
        let session = create_test_session();
        let temp_file = NamedTempFile::new().unwrap();

        write_session(&session, temp_file.path()).unwrap();
        let loaded = read_session(temp_file.path()).unwrap();

        assert_eq!(loaded, session);
    }

    #[test]
    fn test_write_and_read_report() {
        let session = create_test_session();
        let prepared = session.prepare(0.0, true, 10);
        let report = to_report(&session, &prepared, None, Vec::new());

        let temp_file = NamedTempFile::new().unwrap();
        write_report(&report, temp_file.path()).unwrap();
        let loaded = read_report(temp_file.path()).unwrap();

        assert_eq!(loaded, report);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/session.json");

        write_session(&create_test_session(), &nested_path).unwrap();
        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_session(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(OutputError::WriteFailed(_))));
    }
}
