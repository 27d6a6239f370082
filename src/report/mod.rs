//! Call tree reports.
//!
//! Collects a session, one of its display views and the aggregated metrics
//! into a single serializable structure.

pub mod schema;

pub use schema::{CallTreeReport, HotFunction, SessionInfo};

use crate::aggregator::categories::CategoryTimes;
use crate::callgraph::prepare::PreparedGraph;
use crate::session::Session;
use crate::utils::config::SCHEMA_VERSION;

/// Assemble a report from a session and a derived view
///
/// **Public** - main entry point for report creation
pub fn to_report(
    session: &Session,
    prepared: &PreparedGraph,
    category_times: Option<CategoryTimes>,
    hot_functions: Vec<HotFunction>,
) -> CallTreeReport {
    CallTreeReport {
        version: SCHEMA_VERSION.to_string(),
        session: SessionInfo {
            uuid: session.uuid(),
            path: session.path().map(str::to_string),
            timestamp: session.timestamp(),
            duration: session.duration(),
        },
        cutoff_time: prepared.cutoff_time,
        total_nodes: session.graph().node_count(),
        displayed_nodes: prepared.graph.node_count(),
        roots: prepared.roots.clone(),
        removed_edges: prepared.removed_edges.clone(),
        acyclic: prepared.acyclic,
        truncated: prepared.truncated,
        category_times,
        hot_functions,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}
