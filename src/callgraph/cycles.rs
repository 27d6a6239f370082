//! Cycle breaking for tree display.
//!
//! Simple cycles are enumerated with Johnson's algorithm (iterative, self
//! loops first). For each cycle the edge from its first to its second node is
//! removed if it is still there. This is a greedy, order-dependent pass and
//! not a minimum feedback edge set: an earlier removal can already have
//! broken a cycle found later, which is then skipped.
//!
//! Enumeration is capped because densely recursive graphs can hold a
//! combinatorial number of simple cycles. When the cap is hit the result is
//! flagged as truncated and may still contain cycles.

use super::graph::CallGraph;
use log::{debug, warn};
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::DiGraph;
use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::ControlFlow;

/// An edge dropped to break a cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemovedEdge {
    pub caller: String,
    pub callee: String,
}

/// Result of a cycle-breaking pass
#[derive(Debug, Clone, PartialEq)]
pub struct CycleBreak {
    /// Copy of the input with cycle edges removed
    pub graph: CallGraph,

    /// Removed edges, in removal order
    pub removed_edges: Vec<RemovedEdge>,

    /// Number of simple cycles examined
    pub cycles_seen: usize,

    /// Enumeration stopped at the cycle budget
    pub truncated: bool,
}

impl CycleBreak {
    /// Whether the output graph is free of cycles
    pub fn is_acyclic(&self) -> bool {
        !has_cycle(&self.graph)
    }
}

/// Whether the graph contains any cycle, self-calls included
pub fn has_cycle(graph: &CallGraph) -> bool {
    is_cyclic_directed(graph.inner())
}

/// Break cycles in a copy of `source`
///
/// **Public** - main entry point for cycle breaking
///
/// Examines at most `max_cycles` simple cycles.
pub fn break_cycles(source: &CallGraph, max_cycles: usize) -> CycleBreak {
    let mut graph = source.clone();
    let (order, adjacency) = compact_adjacency(source);

    let mut removed_edges = Vec::new();
    let mut cycles_seen = 0usize;

    let complete = for_each_simple_cycle(&adjacency, |cycle| {
        if cycles_seen >= max_cycles {
            return ControlFlow::Break(());
        }
        cycles_seen += 1;

        let u = order[cycle[0]];
        let v = order[cycle.get(1).copied().unwrap_or(cycle[0])];
        if graph.remove_edge_between(u, v) {
            removed_edges.push(RemovedEdge {
                caller: source.node_at(u).key.clone(),
                callee: source.node_at(v).key.clone(),
            });
        }
        ControlFlow::Continue(())
    });

    if complete {
        debug!(
            "Examined {} cycles, removed {} edges",
            cycles_seen,
            removed_edges.len()
        );
    } else {
        warn!(
            "Cycle budget of {} reached; graph is only partially acyclic ({} edges removed)",
            max_cycles,
            removed_edges.len()
        );
    }

    CycleBreak {
        graph,
        removed_edges,
        cycles_seen,
        truncated: !complete,
    }
}

/// Enumerate simple cycles of `graph` as key sequences, up to `limit`
///
/// Each cycle starts at an arbitrary member and lists every node once.
/// Returns the cycles found and whether enumeration finished.
pub fn simple_cycles(graph: &CallGraph, limit: usize) -> (Vec<Vec<String>>, bool) {
    let (order, adjacency) = compact_adjacency(graph);
    let mut cycles = Vec::new();

    let complete = for_each_simple_cycle(&adjacency, |cycle| {
        if cycles.len() >= limit {
            return ControlFlow::Break(());
        }
        cycles.push(
            cycle
                .iter()
                .map(|&i| graph.node_at(order[i]).key.clone())
                .collect(),
        );
        ControlFlow::Continue(())
    });

    (cycles, complete)
}

/// Dense `0..n` view of the graph: position -> node index, and successor lists
fn compact_adjacency(graph: &CallGraph) -> (Vec<NodeIndex>, Vec<Vec<usize>>) {
    let order: Vec<NodeIndex> = graph.inner().node_indices().collect();
    let position: HashMap<NodeIndex, usize> =
        order.iter().enumerate().map(|(i, &ix)| (ix, i)).collect();

    let adjacency = order
        .iter()
        .map(|&ix| {
            graph
                .callee_indices(ix)
                .into_iter()
                .map(|callee| position[&callee])
                .collect()
        })
        .collect();

    (order, adjacency)
}

/// Johnson's algorithm over a dense adjacency list
///
/// `visit` sees each simple cycle once and may stop the walk. Returns true
/// when every cycle was visited.
fn for_each_simple_cycle<F>(adjacency: &[Vec<usize>], mut visit: F) -> bool
where
    F: FnMut(&[usize]) -> ControlFlow<()>,
{
    let n = adjacency.len();

    for (v, successors) in adjacency.iter().enumerate() {
        if successors.contains(&v) && visit(&[v]).is_break() {
            return false;
        }
    }

    let everything: Vec<usize> = (0..n).collect();
    let mut pending = cyclic_components(adjacency, &everything);

    while let Some(mut component) = pending.pop() {
        let Some(start) = component.pop() else {
            continue;
        };

        let mut member = vec![false; n];
        member[start] = true;
        for &v in &component {
            member[v] = true;
        }
        // Successors inside the component, reversed so `pop` walks them in order
        let successors = |v: usize| -> Vec<usize> {
            adjacency[v]
                .iter()
                .rev()
                .copied()
                .filter(|&w| w != v && member[w])
                .collect()
        };

        let mut path = vec![start];
        let mut blocked = vec![false; n];
        let mut closed = vec![false; n];
        let mut block_map: HashMap<usize, HashSet<usize>> = HashMap::new();
        let mut stack: Vec<(usize, Vec<usize>)> = vec![(start, successors(start))];
        blocked[start] = true;

        while let Some((node, remaining)) = stack.last_mut() {
            let this = *node;
            let next = remaining.pop();
            let exhausted = remaining.is_empty();

            if let Some(next) = next {
                if next == start {
                    if visit(&path).is_break() {
                        return false;
                    }
                    for &v in &path {
                        closed[v] = true;
                    }
                } else if !blocked[next] {
                    path.push(next);
                    stack.push((next, successors(next)));
                    closed[next] = false;
                    blocked[next] = true;
                    continue;
                }
            }

            if exhausted {
                if closed[this] {
                    unblock(this, &mut blocked, &mut block_map);
                } else {
                    for w in successors(this) {
                        block_map.entry(w).or_default().insert(this);
                    }
                }
                stack.pop();
                path.pop();
            }
        }

        pending.extend(cyclic_components(adjacency, &component));
    }

    true
}

fn unblock(node: usize, blocked: &mut [bool], block_map: &mut HashMap<usize, HashSet<usize>>) {
    let mut stack = vec![node];
    while let Some(v) = stack.pop() {
        if blocked[v] {
            blocked[v] = false;
            if let Some(waiting) = block_map.get_mut(&v) {
                stack.extend(waiting.drain());
            }
        }
    }
}

/// Strongly connected components (size > 1) of the subgraph induced by `members`
fn cyclic_components(adjacency: &[Vec<usize>], members: &[usize]) -> Vec<Vec<usize>> {
    let mut sub: DiGraph<usize, ()> = DiGraph::with_capacity(members.len(), 0);
    let local: HashMap<usize, _> = members.iter().map(|&v| (v, sub.add_node(v))).collect();

    for &v in members {
        for &w in &adjacency[v] {
            if v == w {
                continue;
            }
            if let Some(&target) = local.get(&w) {
                sub.add_edge(local[&v], target, ());
            }
        }
    }

    tarjan_scc(&sub)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| scc.into_iter().map(|ix| sub[ix]).collect())
        .collect()
}
