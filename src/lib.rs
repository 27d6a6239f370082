//! Call Trace Studio
//!
//! Call graph construction and analysis for captured call-time traces.
//!
//! A trace (per-function stat records plus the calls each function made) is
//! turned into a baseline call graph held by a [`session::Session`]. From the
//! baseline, display views are derived on demand: pruned by a time cutoff,
//! with cycles broken so the graph can be drawn as a tree, and with the
//! roots found. Inline time can be broken down per tracked key prefix.
//!
//! This crate provides the core implementation for the `calltrace` CLI tool.
//!
//! ```bash
//! calltrace analyze --trace trace.json --dot graph.dot --summary
//! ```

pub mod aggregator;
pub mod callgraph;
pub mod commands;
pub mod output;
pub mod parser;
pub mod report;
pub mod session;
pub mod utils;
