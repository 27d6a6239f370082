//! Time-based pruning of a call graph copy.

use super::graph::CallGraph;
use log::debug;

/// A pruned copy of a call graph, with the normalization factor for display
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedGraph {
    /// Surviving nodes and the edges between them
    pub graph: CallGraph,

    /// Largest node total time before pruning (1.0 when all were zero)
    pub max_totaltime: f64,

    /// Threshold that was applied
    pub cutoff_time: f64,

    /// Number of nodes removed
    pub removed_nodes: usize,
}

impl PrunedGraph {
    /// Normalized display weight of a surviving node, in [0, 1]
    pub fn display_weight(&self, key: &str) -> Option<f64> {
        self.graph
            .metrics(key)
            .map(|m| display_weight(m.totaltime, self.max_totaltime))
    }
}

/// Scale a total time against the graph maximum, clamped into [0, 1]
pub fn display_weight(totaltime: f64, max_totaltime: f64) -> f64 {
    if max_totaltime <= 0.0 {
        return 1.0;
    }
    (totaltime / max_totaltime).clamp(0.0, 1.0)
}

/// Remove nodes whose total time is below `cutoff_time`
///
/// **Public** - main entry point for pruning
///
/// Works on a copy; `source` is untouched. The comparison is strict, so a
/// cutoff of 0 keeps everything. Survivors are kept even when all their
/// callers were pruned, which can leave disconnected components.
pub fn prune_graph(source: &CallGraph, cutoff_time: f64) -> PrunedGraph {
    let mut graph = source.clone();

    let max_totaltime = match graph.max_totaltime() {
        Some(max) if max > 0.0 => max,
        _ => 1.0,
    };

    let doomed: Vec<String> = graph
        .nodes()
        .filter(|node| node.metrics.totaltime < cutoff_time)
        .map(|node| node.key.clone())
        .collect();

    for key in &doomed {
        graph.remove_node(key);
    }

    debug!(
        "Pruned {} of {} nodes below {:.6}s",
        doomed.len(),
        source.node_count(),
        cutoff_time
    );

    PrunedGraph {
        graph,
        max_totaltime,
        cutoff_time,
        removed_nodes: doomed.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CallMetrics;

    fn at(totaltime: f64) -> CallMetrics {
        CallMetrics {
            totaltime,
            ..Default::default()
        }
    }

    fn sample() -> CallGraph {
        let mut graph = CallGraph::new();
        graph.insert_node("main", at(10.0));
        graph.insert_node("small", at(0.5));
        graph.insert_node("leaf", at(4.0));
        graph.insert_edge("main", "small", at(0.5));
        graph.insert_edge("small", "leaf", at(4.0));
        graph
    }

    #[test]
    fn test_zero_cutoff_keeps_everything() {
        let source = sample();
        let pruned = prune_graph(&source, 0.0);

        assert_eq!(pruned.graph, source);
        assert_eq!(pruned.removed_nodes, 0);
    }

    #[test]
    fn test_cutoff_is_strict_and_keeps_orphans() {
        let pruned = prune_graph(&sample(), 4.0);

        assert!(pruned.graph.contains("main"));
        assert!(pruned.graph.contains("leaf"));
        assert!(!pruned.graph.contains("small"));
        assert_eq!(pruned.graph.edge_count(), 0);
    }

    #[test]
    fn test_cutoff_above_max_removes_all() {
        let pruned = prune_graph(&sample(), 10.5);
        assert!(pruned.graph.is_empty());
        assert_eq!(pruned.max_totaltime, 10.0);
    }

    #[test]
    fn test_display_weights() {
        let pruned = prune_graph(&sample(), 0.0);

        assert_eq!(pruned.display_weight("main"), Some(1.0));
        assert_eq!(pruned.display_weight("leaf"), Some(0.4));
        assert_eq!(pruned.display_weight("missing"), None);
    }

    #[test]
    fn test_all_zero_graph_normalizes_to_one() {
        let mut graph = CallGraph::new();
        graph.insert_edge("a", "b", at(0.0));

        let pruned = prune_graph(&graph, 0.0);
        assert_eq!(pruned.max_totaltime, 1.0);
        assert_eq!(pruned.display_weight("a"), Some(0.0));
        assert_eq!(pruned.display_weight("b"), Some(0.0));
    }
}
