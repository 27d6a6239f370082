//! Input schema for captured call-time traces.
//!
//! A trace is a flat list of per-function stat records, each listing the
//! calls that function made. Times are seconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::symbol::FrameIdentity;

/// The four metrics recorded for a function or a single call relationship
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CallMetrics {
    /// Number of calls
    pub callcount: u64,

    /// Number of recursive calls
    pub reccallcount: u64,

    /// Time spent in the function itself, excluding callees
    pub inlinetime: f64,

    /// Time spent in the function including callees
    pub totaltime: f64,
}

/// Stats for one function, plus the calls it made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallStat {
    pub code: FrameIdentity,
    pub callcount: u64,
    pub reccallcount: u64,
    pub inlinetime: f64,
    pub totaltime: f64,

    /// Calls made by this function to others
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

/// Stats for calls from one function to one callee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub code: FrameIdentity,
    pub callcount: u64,
    pub reccallcount: u64,
    pub inlinetime: f64,
    pub totaltime: f64,
}

impl CallMetrics {
    /// Add another observation of the same call relationship
    pub fn absorb(&mut self, other: &CallMetrics) {
        self.callcount = self.callcount.saturating_add(other.callcount);
        self.reccallcount = self.reccallcount.saturating_add(other.reccallcount);
        self.inlinetime += other.inlinetime;
        self.totaltime += other.totaltime;
    }
}

impl CallStat {
    pub fn metrics(&self) -> CallMetrics {
        CallMetrics {
            callcount: self.callcount,
            reccallcount: self.reccallcount,
            inlinetime: self.inlinetime,
            totaltime: self.totaltime,
        }
    }
}

impl CallRecord {
    pub fn metrics(&self) -> CallMetrics {
        CallMetrics {
            callcount: self.callcount,
            reccallcount: self.reccallcount,
            inlinetime: self.inlinetime,
            totaltime: self.totaltime,
        }
    }
}

/// A complete captured trace for one unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFile {
    /// Request path that was profiled, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// When profiling started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Per-function stat records
    pub stats: Vec<CallStat>,
}
