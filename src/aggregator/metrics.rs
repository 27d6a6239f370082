//! Hot function ranking.
//!
//! Hot functions are the symbols with the most inline (self) time. These are
//! the primary targets for optimization.

use crate::callgraph::graph::{CallGraph, CallNode};
use crate::report::schema::HotFunction;
use log::debug;

/// Rank graph nodes by inline time
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `graph` - Baseline graph
/// * `duration` - Session duration in seconds, used for percentages
/// * `top_n` - Number of functions to return
///
/// # Returns
/// Hot functions sorted by inline time (descending), ties broken by key
pub fn calculate_hot_functions(
    graph: &CallGraph,
    duration: f64,
    top_n: usize,
) -> Vec<HotFunction> {
    debug!(
        "Calculating top {} hot functions from {} nodes",
        top_n,
        graph.node_count()
    );

    let mut nodes: Vec<&CallNode> = graph.nodes().collect();
    nodes.sort_by(|a, b| {
        b.metrics
            .inlinetime
            .total_cmp(&a.metrics.inlinetime)
            .then_with(|| a.key.cmp(&b.key))
    });

    nodes
        .into_iter()
        .take(top_n)
        .map(|node| create_hot_function(node, duration))
        .collect()
}

/// **Private** - internal conversion
fn create_hot_function(node: &CallNode, duration: f64) -> HotFunction {
    let percentage = if duration > 0.0 {
        (node.metrics.inlinetime / duration) * 100.0
    } else {
        0.0
    };

    HotFunction {
        key: node.key.clone(),
        callcount: node.metrics.callcount,
        inlinetime: node.metrics.inlinetime,
        totaltime: node.metrics.totaltime,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CallMetrics;

    fn node(graph: &mut CallGraph, key: &str, inlinetime: f64) {
        graph.insert_node(
            key,
            CallMetrics {
                callcount: 1,
                reccallcount: 0,
                inlinetime,
                totaltime: inlinetime,
            },
        );
    }

    #[test]
    fn test_calculate_hot_functions() {
        let mut graph = CallGraph::new();
        node(&mut graph, "main", 1.0);
        node(&mut graph, "parse", 5.0);
        node(&mut graph, "render", 4.0);

        let hot = calculate_hot_functions(&graph, 10.0, 2);

        assert_eq!(hot.len(), 2);
        assert_eq!(hot[0].key, "parse");
        assert_eq!(hot[0].percentage, 50.0);
        assert_eq!(hot[1].key, "render");
    }

    #[test]
    fn test_ties_break_by_key() {
        let mut graph = CallGraph::new();
        node(&mut graph, "b", 1.0);
        node(&mut graph, "a", 1.0);

        let hot = calculate_hot_functions(&graph, 0.0, 10);
        assert_eq!(hot[0].key, "a");
        assert_eq!(hot[0].percentage, 0.0);
    }
}
