//! Call graph storage.
//!
//! Nodes live in an index table (`StableDiGraph`) with a side map from symbol
//! key to node index, so derived views are plain deep copies and node indices
//! stay valid while nodes are pruned from a copy.

use super::builder::checked;
use crate::parser::schema::CallMetrics;
use crate::utils::error::GraphError;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// A callable unit in the graph
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    /// Symbol key
    pub key: String,

    /// Own metrics; all zero when the symbol was only seen as a callee
    pub metrics: CallMetrics,
}

/// An observed caller -> callee relationship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallEdge {
    /// Metrics scoped to this call relationship
    pub metrics: CallMetrics,
}

impl CallEdge {
    /// Display weight, the edge's total time
    pub fn weight(&self) -> f64 {
        self.metrics.totaltime
    }

    /// Display label, the edge's total time
    pub fn label(&self) -> String {
        format!("{}", self.metrics.totaltime)
    }
}

/// Directed call graph keyed by symbol
///
/// May contain cycles (recursion, mutual calls). At most one edge per
/// ordered pair of nodes.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: StableDiGraph<CallNode, CallEdge>,
    index: HashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&CallNode> {
        self.index.get(key).map(|&ix| &self.graph[ix])
    }

    pub fn metrics(&self, key: &str) -> Option<&CallMetrics> {
        self.node(key).map(|node| &node.metrics)
    }

    pub fn edge(&self, caller: &str, callee: &str) -> Option<&CallEdge> {
        let a = *self.index.get(caller)?;
        let b = *self.index.get(callee)?;
        self.graph.find_edge(a, b).map(|e| &self.graph[e])
    }

    pub fn has_edge(&self, caller: &str, callee: &str) -> bool {
        self.edge(caller, callee).is_some()
    }

    /// Insert a node or overwrite the metrics of an existing one
    pub fn insert_node(&mut self, key: &str, metrics: CallMetrics) {
        let ix = self.ensure_node(key);
        self.graph[ix].metrics = metrics;
    }

    /// Insert an edge or overwrite the metrics of the existing one.
    /// Missing endpoints are created with zeroed metrics.
    pub fn insert_edge(&mut self, caller: &str, callee: &str, metrics: CallMetrics) {
        let a = self.ensure_node(caller);
        let b = self.ensure_node(callee);
        self.graph.update_edge(a, b, CallEdge { metrics });
    }

    /// Insert an edge, or add `metrics` onto the existing one
    pub fn accumulate_edge(&mut self, caller: &str, callee: &str, metrics: CallMetrics) {
        let a = self.ensure_node(caller);
        let b = self.ensure_node(callee);
        match self.graph.find_edge(a, b) {
            Some(e) => self.graph[e].metrics.absorb(&metrics),
            None => {
                self.graph.add_edge(a, b, CallEdge { metrics });
            }
        }
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(ix) => self.graph.remove_node(ix).is_some(),
            None => false,
        }
    }

    /// Remove the edge between two nodes, if any
    pub fn remove_edge(&mut self, caller: &str, callee: &str) -> bool {
        match (self.index.get(caller), self.index.get(callee)) {
            (Some(&a), Some(&b)) => self.remove_edge_between(a, b),
            _ => false,
        }
    }

    /// Nodes in index order
    pub fn nodes(&self) -> impl Iterator<Item = &CallNode> {
        self.graph.node_indices().map(move |ix| &self.graph[ix])
    }

    /// Edges as `(caller, callee, edge)` in index order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &CallEdge)> {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((
                self.graph[a].key.as_str(),
                self.graph[b].key.as_str(),
                &self.graph[e],
            ))
        })
    }

    /// Keys called by `key`, in the order the calls were recorded
    pub fn callees(&self, key: &str) -> Vec<&str> {
        self.neighbor_keys(key, Direction::Outgoing)
    }

    /// Keys calling `key`, in the order the calls were recorded
    pub fn callers(&self, key: &str) -> Vec<&str> {
        self.neighbor_keys(key, Direction::Incoming)
    }

    pub fn in_degree(&self, key: &str) -> usize {
        self.index
            .get(key)
            .map(|&ix| self.graph.edges_directed(ix, Direction::Incoming).count())
            .unwrap_or(0)
    }

    /// Largest node total time, `None` for an empty graph
    pub fn max_totaltime(&self) -> Option<f64> {
        self.nodes()
            .map(|node| node.metrics.totaltime)
            .max_by(|a, b| a.total_cmp(b))
    }

    pub(crate) fn inner(&self) -> &StableDiGraph<CallNode, CallEdge> {
        &self.graph
    }

    pub(crate) fn node_index(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub(crate) fn node_at(&self, ix: NodeIndex) -> &CallNode {
        &self.graph[ix]
    }

    /// Direct successors of `ix`, in edge insertion order
    pub(crate) fn callee_indices(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(ix, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out.into_iter().map(|(_, target)| target).collect()
    }

    pub(crate) fn remove_edge_between(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        match self.graph.find_edge(a, b) {
            Some(e) => self.graph.remove_edge(e).is_some(),
            None => false,
        }
    }

    fn ensure_node(&mut self, key: &str) -> NodeIndex {
        if let Some(&ix) = self.index.get(key) {
            return ix;
        }
        let ix = self.graph.add_node(CallNode {
            key: key.to_string(),
            metrics: CallMetrics::default(),
        });
        self.index.insert(key.to_string(), ix);
        ix
    }

    fn neighbor_keys(&self, key: &str, direction: Direction) -> Vec<&str> {
        let Some(&ix) = self.index.get(key) else {
            return Vec::new();
        };
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(ix, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        out.sort_by_key(|(id, _)| *id);
        out.into_iter()
            .map(|(_, other)| self.graph[other].key.as_str())
            .collect()
    }
}

/// Two graphs are equal when they hold the same keyed nodes and edges with
/// the same metrics, regardless of internal index layout.
impl PartialEq for CallGraph {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.edge_count() == other.edge_count()
            && self
                .nodes()
                .all(|node| other.metrics(&node.key) == Some(&node.metrics))
            && self
                .edges()
                .all(|(caller, callee, edge)| other.edge(caller, callee) == Some(edge))
    }
}

/// Flat, order-preserving form used for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct GraphRecord {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NodeRecord {
    key: String,
    callcount: u64,
    reccallcount: u64,
    inlinetime: f64,
    totaltime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EdgeRecord {
    caller: String,
    callee: String,
    callcount: u64,
    reccallcount: u64,
    inlinetime: f64,
    totaltime: f64,
}

impl From<&CallGraph> for GraphRecord {
    fn from(graph: &CallGraph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeRecord {
                key: node.key.clone(),
                callcount: node.metrics.callcount,
                reccallcount: node.metrics.reccallcount,
                inlinetime: node.metrics.inlinetime,
                totaltime: node.metrics.totaltime,
            })
            .collect();

        let edges = graph
            .edges()
            .map(|(caller, callee, edge)| EdgeRecord {
                caller: caller.to_string(),
                callee: callee.to_string(),
                callcount: edge.metrics.callcount,
                reccallcount: edge.metrics.reccallcount,
                inlinetime: edge.metrics.inlinetime,
                totaltime: edge.metrics.totaltime,
            })
            .collect();

        Self { nodes, edges }
    }
}

impl TryFrom<GraphRecord> for CallGraph {
    type Error = GraphError;

    fn try_from(record: GraphRecord) -> Result<Self, Self::Error> {
        let mut graph = CallGraph::new();

        for node in record.nodes {
            if graph.contains(&node.key) {
                return Err(GraphError::DuplicateNode(node.key));
            }
            let metrics = checked(
                &node.key,
                CallMetrics {
                    callcount: node.callcount,
                    reccallcount: node.reccallcount,
                    inlinetime: node.inlinetime,
                    totaltime: node.totaltime,
                },
            )?;
            graph.insert_node(&node.key, metrics);
        }

        for edge in record.edges {
            if !graph.contains(&edge.caller) || !graph.contains(&edge.callee) {
                return Err(GraphError::DanglingEdge {
                    caller: edge.caller,
                    callee: edge.callee,
                });
            }
            let metrics = checked(
                &format!("{} -> {}", edge.caller, edge.callee),
                CallMetrics {
                    callcount: edge.callcount,
                    reccallcount: edge.reccallcount,
                    inlinetime: edge.inlinetime,
                    totaltime: edge.totaltime,
                },
            )?;
            graph.insert_edge(&edge.caller, &edge.callee, metrics);
        }

        Ok(graph)
    }
}

impl Serialize for CallGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CallGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = GraphRecord::deserialize(deserializer)?;
        CallGraph::try_from(record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metrics(totaltime: f64) -> CallMetrics {
        CallMetrics {
            callcount: 1,
            reccallcount: 0,
            inlinetime: totaltime / 2.0,
            totaltime,
        }
    }

    #[test]
    fn test_insert_edge_creates_zeroed_endpoints() {
        let mut graph = CallGraph::new();
        graph.insert_edge("a", "b", metrics(1.0));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.metrics("b"), Some(&CallMetrics::default()));
        assert_eq!(graph.edge("a", "b").unwrap().weight(), 1.0);
    }

    #[test]
    fn test_repeated_edge_is_not_a_multi_edge() {
        let mut graph = CallGraph::new();
        graph.insert_edge("a", "b", metrics(1.0));
        graph.insert_edge("a", "b", metrics(3.0));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge("a", "b").unwrap().label(), "3");
    }

    #[test]
    fn test_callees_keep_recorded_order() {
        let mut graph = CallGraph::new();
        graph.insert_edge("root", "first", metrics(1.0));
        graph.insert_edge("root", "second", metrics(1.0));
        graph.insert_edge("root", "third", metrics(1.0));

        assert_eq!(graph.callees("root"), vec!["first", "second", "third"]);
        assert_eq!(graph.callers("second"), vec!["root"]);
        assert_eq!(graph.in_degree("root"), 0);
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = CallGraph::new();
        graph.insert_edge("a", "b", metrics(1.0));
        graph.insert_edge("b", "c", metrics(1.0));

        assert!(graph.remove_node("b"));
        assert!(!graph.contains("b"));
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.remove_node("b"));
    }

    #[test]
    fn test_max_totaltime() {
        let mut graph = CallGraph::new();
        assert_eq!(graph.max_totaltime(), None);

        graph.insert_node("a", metrics(2.0));
        graph.insert_node("b", metrics(5.0));
        assert_eq!(graph.max_totaltime(), Some(5.0));
    }

    #[test]
    fn test_dangling_edge_rejected_on_load() {
        let raw = json!({
            "nodes": [{"key": "a", "callcount": 1, "reccallcount": 0, "inlinetime": 0.0, "totaltime": 0.0}],
            "edges": [{"caller": "a", "callee": "ghost", "callcount": 1, "reccallcount": 0, "inlinetime": 0.0, "totaltime": 0.0}]
        });

        assert!(serde_json::from_value::<CallGraph>(raw).is_err());
    }

    #[test]
    fn test_invalid_metric_rejected_on_load() {
        let raw = json!({
            "nodes": [
                {"key": "a", "callcount": 1, "reccallcount": 0, "inlinetime": -5.0, "totaltime": 1.0}
            ],
            "edges": []
        });
        let record: GraphRecord = serde_json::from_value(raw).unwrap();

        assert_eq!(
            CallGraph::try_from(record).unwrap_err(),
            GraphError::InvalidMetric {
                key: "a".to_string(),
                metric: "inlinetime",
                value: -5.0,
            }
        );
    }

    #[test]
    fn test_accumulate_edge_sums_observations() {
        let mut graph = CallGraph::new();
        graph.accumulate_edge("a", "b", metrics(1.0));
        graph.accumulate_edge("a", "b", metrics(3.0));

        let edge = graph.edge("a", "b").unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(edge.metrics.callcount, 2);
        assert_eq!(edge.metrics.inlinetime, 2.0);
        assert_eq!(edge.weight(), 4.0);
    }

    #[test]
    fn test_serialized_form_round_trips() {
        let mut graph = CallGraph::new();
        graph.insert_node("a", metrics(0.1 + 0.2));
        graph.insert_edge("a", "b", metrics(0.3));
        graph.insert_edge("b", "a", metrics(0.7));

        let text = serde_json::to_string(&graph).unwrap();
        let loaded: CallGraph = serde_json::from_str(&text).unwrap();

        assert_eq!(loaded, graph);
        assert_eq!(loaded.metrics("a").unwrap().totaltime, 0.1 + 0.2);
    }
}
