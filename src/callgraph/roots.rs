//! Root discovery: nodes nothing calls.

use super::graph::CallGraph;
use petgraph::Direction;

/// Keys of every node with in-degree zero, in node order
///
/// A graph where every node sits on a cycle has no roots; callers get an
/// empty list rather than an error. A self-call counts as an incoming edge.
pub fn find_roots(graph: &CallGraph) -> Vec<String> {
    let inner = graph.inner();
    inner
        .node_indices()
        .filter(|&ix| {
            inner
                .neighbors_directed(ix, Direction::Incoming)
                .next()
                .is_none()
        })
        .map(|ix| inner[ix].key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::CallMetrics;

    #[test]
    fn test_chain_has_one_root() {
        let mut graph = CallGraph::new();
        graph.insert_edge("a", "b", CallMetrics::default());
        graph.insert_edge("b", "c", CallMetrics::default());

        assert_eq!(find_roots(&graph), vec!["a"]);
    }

    #[test]
    fn test_pure_cycle_has_no_roots() {
        let mut graph = CallGraph::new();
        graph.insert_edge("A", "B", CallMetrics::default());
        graph.insert_edge("B", "C", CallMetrics::default());
        graph.insert_edge("C", "A", CallMetrics::default());

        assert!(find_roots(&graph).is_empty());
    }

    #[test]
    fn test_self_recursive_node_is_not_a_root() {
        let mut graph = CallGraph::new();
        graph.insert_edge("fib", "fib", CallMetrics::default());
        graph.insert_node("isolated", CallMetrics::default());

        assert_eq!(find_roots(&graph), vec!["isolated"]);
    }
}
