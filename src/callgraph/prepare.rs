//! Display preparation: prune, optionally break cycles, then find roots.

use super::cycles::{break_cycles as break_graph_cycles, has_cycle, RemovedEdge};
use super::graph::CallGraph;
use super::prune::{display_weight, prune_graph};
use super::roots::find_roots;
use log::info;

/// A display-ready view derived from a baseline graph
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedGraph {
    /// Pruned (and possibly cycle-free) graph
    pub graph: CallGraph,

    /// Nodes nothing calls in `graph`
    pub roots: Vec<String>,

    /// Edges dropped by the cycle breaker, in removal order
    pub removed_edges: Vec<RemovedEdge>,

    /// Normalization factor for display weights
    pub max_totaltime: f64,

    /// Threshold used when pruning
    pub cutoff_time: f64,

    /// Cycle enumeration hit its budget
    pub truncated: bool,

    /// `graph` has no cycles
    pub acyclic: bool,
}

impl PreparedGraph {
    /// Normalized display weight of a node, in [0, 1]
    pub fn display_weight(&self, key: &str) -> Option<f64> {
        self.graph
            .metrics(key)
            .map(|m| display_weight(m.totaltime, self.max_totaltime))
    }

    /// Whether `caller -> callee` was removed to break a cycle
    pub fn is_removed_edge(&self, caller: &str, callee: &str) -> bool {
        self.removed_edges
            .iter()
            .any(|e| e.caller == caller && e.callee == callee)
    }
}

/// Derive a display view from `source`
///
/// **Public** - main entry point for display preparation
///
/// # Arguments
/// * `source` - Baseline graph, left untouched
/// * `cutoff_time` - Nodes with a total time strictly below this are pruned
/// * `break_cycles` - Remove cycle edges after pruning
/// * `max_cycles` - Cycle enumeration budget
pub fn prepare_graph(
    source: &CallGraph,
    cutoff_time: f64,
    break_cycles: bool,
    max_cycles: usize,
) -> PreparedGraph {
    let pruned = prune_graph(source, cutoff_time);

    let (graph, removed_edges, truncated) = if break_cycles {
        let result = break_graph_cycles(&pruned.graph, max_cycles);
        (result.graph, result.removed_edges, result.truncated)
    } else {
        (pruned.graph, Vec::new(), false)
    };

    let roots = find_roots(&graph);
    let acyclic = !has_cycle(&graph);

    info!(
        "Prepared graph: {} nodes, {} edges, {} roots",
        graph.node_count(),
        graph.edge_count(),
        roots.len()
    );

    PreparedGraph {
        graph,
        roots,
        removed_edges,
        max_totaltime: pruned.max_totaltime,
        cutoff_time,
        truncated,
        acyclic,
    }
}
