//! Trace reader.
//!
//! Accepts either a full trace object (`{"path": .., "timestamp": .., "stats": [..]}`)
//! or a bare array of stat records, and turns it into a [`TraceFile`].
//! Metric sanity (negative or non-finite times) is checked by the graph
//! builder, not here.

use super::schema::{CallStat, TraceFile};
use crate::utils::error::ParseError;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parse a raw trace JSON value
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::JsonError` - Records missing a required metric, or metrics
///   of the wrong type (negative counts included)
/// * `ParseError::InvalidFormat` - Neither an object nor an array
pub fn parse_trace(raw_trace: &serde_json::Value) -> Result<TraceFile, ParseError> {
    let trace = match raw_trace {
        serde_json::Value::Object(obj) => {
            if !obj.contains_key("stats") {
                return Err(ParseError::InvalidFormat(
                    "Trace object has no `stats` field".to_string(),
                ));
            }
            serde_json::from_value::<TraceFile>(raw_trace.clone())?
        }

        serde_json::Value::Array(_) => {
            debug!("Trace is a bare array of stat records");
            let stats: Vec<CallStat> = serde_json::from_value(raw_trace.clone())?;
            TraceFile {
                path: None,
                timestamp: None,
                stats,
            }
        }

        _ => {
            return Err(ParseError::InvalidFormat(
                "Trace must be a JSON object or array".to_string(),
            ))
        }
    };

    debug!(
        "Parsed {} stat records ({} calls)",
        trace.stats.len(),
        trace.stats.iter().map(|s| s.calls.len()).sum::<usize>()
    );

    Ok(trace)
}

/// Read and parse a trace JSON file
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<TraceFile, ParseError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path)?;
    let raw: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;

    parse_trace(&raw)
}
