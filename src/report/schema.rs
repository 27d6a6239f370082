//! Output schema for call tree reports.
//!
//! A report is the display-side summary of one session: what was pruned,
//! which edges were cut to draw it as a tree, and where the time went.

use crate::aggregator::categories::CategoryTimes;
use crate::callgraph::cycles::RemovedEdge;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallTreeReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Session the report was derived from
    pub session: SessionInfo,

    /// Time threshold applied while pruning, in seconds
    pub cutoff_time: f64,

    /// Node count of the baseline graph
    pub total_nodes: usize,

    /// Node count after pruning
    pub displayed_nodes: usize,

    /// Entry points of the displayed graph
    pub roots: Vec<String>,

    /// Edges cut to break cycles
    pub removed_edges: Vec<RemovedEdge>,

    /// Whether the displayed graph is cycle free
    pub acyclic: bool,

    /// Cycle enumeration hit its budget
    pub truncated: bool,

    /// Inline time per tracked category (absent when none are tracked)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_times: Option<CategoryTimes>,

    /// Top functions by inline time
    pub hot_functions: Vec<HotFunction>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Session metadata carried into a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub uuid: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Seconds
    pub duration: f64,
}

/// A function ranked by its own (inline) time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotFunction {
    /// Symbol key
    pub key: String,

    pub callcount: u64,

    /// Seconds spent in the function itself
    pub inlinetime: f64,

    /// Seconds spent including callees
    pub totaltime: f64,

    /// Inline time as a percentage of the session duration
    pub percentage: f64,
}
