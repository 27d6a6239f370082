//! Trace parsing and symbol resolution.
//!
//! This module handles:
//! - Resolving frame identities into symbol keys
//! - Parsing raw trace JSON into stat records
//! - Defining the input schema

pub mod schema;
pub mod symbol;
pub mod trace;

// Re-export main types
pub use schema::{CallMetrics, CallRecord, CallStat, TraceFile};
pub use symbol::{resolve_key, FrameIdentity};
pub use trace::{parse_trace, read_trace};
