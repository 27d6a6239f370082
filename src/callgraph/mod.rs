//! Call graph construction and derived display views.
//!
//! This module handles:
//! - Building the baseline graph from stat records
//! - Pruning copies below a time threshold
//! - Breaking cycles so a graph can be drawn as a tree
//! - Finding roots

pub mod builder;
pub mod cycles;
pub mod graph;
pub mod prepare;
pub mod prune;
pub mod roots;

// Re-export main types
pub use builder::build_graph;
pub use cycles::{break_cycles, has_cycle, simple_cycles, CycleBreak, RemovedEdge};
pub use graph::{CallEdge, CallGraph, CallNode};
pub use prepare::{prepare_graph, PreparedGraph};
pub use prune::{display_weight, prune_graph, PrunedGraph};
pub use roots::find_roots;
