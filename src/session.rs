//! A profiled unit of work: one baseline call graph plus its metadata.
//!
//! A session is immutable once built. Display views and category totals are
//! derived from it on request and owned by the caller.

use crate::aggregator::categories::{time_per_category, CategoryTimes};
use crate::callgraph::builder::build_graph;
use crate::callgraph::graph::CallGraph;
use crate::callgraph::prepare::{prepare_graph, PreparedGraph};
use crate::callgraph::roots::find_roots;
use crate::parser::schema::{CallStat, TraceFile};
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::GraphError;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored form of a profiled trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    version: String,
    uuid: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    duration: f64,
    graph: CallGraph,
}

impl Session {
    /// Build a session from stat records
    ///
    /// **Public** - main entry point for session creation
    ///
    /// `duration` is the largest `totaltime` among the records, 0 when there
    /// are none.
    ///
    /// # Errors
    /// * `GraphError::InvalidMetric` - A record carries a negative or
    ///   non-finite time
    pub fn new(
        stats: &[CallStat],
        path: Option<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Self, GraphError> {
        let graph = build_graph(stats)?;
        let duration = stats
            .iter()
            .map(|s| s.totaltime)
            .fold(0.0_f64, f64::max);

        let session = Self {
            version: SCHEMA_VERSION.to_string(),
            uuid: Uuid::new_v4(),
            path,
            timestamp,
            duration,
            graph,
        };

        info!(
            "Created session {} ({} nodes, {:.6}s)",
            session.uuid,
            session.graph.node_count(),
            session.duration
        );

        Ok(session)
    }

    /// Build a session from a parsed trace file
    pub fn from_trace(trace: &TraceFile) -> Result<Self, GraphError> {
        Self::new(&trace.stats, trace.path.clone(), trace.timestamp)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Longest total time of any function, in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// The baseline graph
    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    /// `fraction` of the session duration
    pub fn cutoff_time(&self, fraction: f64) -> f64 {
        self.duration * fraction
    }

    /// Roots of the baseline graph
    pub fn roots(&self) -> Vec<String> {
        find_roots(&self.graph)
    }

    /// Derive a display view pruned at `cutoff_percentage` of the duration
    pub fn prepare(
        &self,
        cutoff_percentage: f64,
        break_cycles: bool,
        max_cycles: usize,
    ) -> PreparedGraph {
        prepare_graph(
            &self.graph,
            self.cutoff_time(cutoff_percentage),
            break_cycles,
            max_cycles,
        )
    }

    /// Inline time per category, walked over the baseline graph from `roots`
    pub fn time_per_category(
        &self,
        roots: &[String],
        categories: &[String],
    ) -> Option<CategoryTimes> {
        time_per_category(&self.graph, roots, categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CallRecord;
    use crate::parser::symbol::FrameIdentity;

    fn stats() -> Vec<CallStat> {
        vec![
            CallStat {
                code: FrameIdentity::code("app.py", "app", "main"),
                callcount: 1,
                reccallcount: 0,
                inlinetime: 0.5,
                totaltime: 2.0,
                calls: vec![CallRecord {
                    code: FrameIdentity::Builtin("len".to_string()),
                    callcount: 3,
                    reccallcount: 0,
                    inlinetime: 1.5,
                    totaltime: 1.5,
                }],
            },
            CallStat {
                code: FrameIdentity::Builtin("len".to_string()),
                callcount: 3,
                reccallcount: 0,
                inlinetime: 1.5,
                totaltime: 1.5,
                calls: vec![],
            },
        ]
    }

    #[test]
    fn test_duration_and_cutoff() {
        let session = Session::new(&stats(), Some("/index".to_string()), None).unwrap();

        assert_eq!(session.duration(), 2.0);
        assert_eq!(session.cutoff_time(0.5), 1.0);
        assert_eq!(session.path(), Some("/index"));
        assert_eq!(session.version(), SCHEMA_VERSION);
        assert_eq!(session.roots(), vec!["app.main"]);
    }

    #[test]
    fn test_empty_trace_has_zero_duration() {
        let session = Session::new(&[], None, None).unwrap();
        assert_eq!(session.duration(), 0.0);
        assert!(session.graph().is_empty());
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = Session::new(&stats(), None, None).unwrap();
        let b = Session::new(&stats(), None, None).unwrap();
        assert_ne!(a.uuid(), b.uuid());
    }

    #[test]
    fn test_prepare_leaves_baseline_alone() {
        let session = Session::new(&stats(), None, None).unwrap();
        let nodes = session.graph().node_count();

        let view = session.prepare(0.9, true, 100);
        assert!(!view.graph.contains("len"));
        assert_eq!(session.graph().node_count(), nodes);
    }

    #[test]
    fn test_serde_round_trip() {
        let session = Session::new(&stats(), Some("/".to_string()), Some(Utc::now())).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, session);
    }
}
