//! DOT rendering of a prepared call graph.
//!
//! Nodes are filled on an HSV scale from red (hottest) to green (coldest):
//! hue = (1 - weight) / 3, where weight is the node's normalized total time.
//! Edges are labelled with their total time. Edges removed to break cycles
//! are drawn dashed and do not constrain the layout.

use super::validate_path;
use crate::callgraph::prepare::PreparedGraph;
use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

/// Render a prepared graph as DOT text
///
/// **Public** - main entry point for graph rendering
pub fn render_dot(prepared: &PreparedGraph) -> String {
    let mut out = String::new();
    out.push_str("digraph \"G\" {\n");

    for node in prepared.graph.nodes() {
        let weight = prepared.display_weight(&node.key).unwrap_or(0.0);
        out.push_str(&format!(
            "  \"{}\" [color=\"{}\", style=filled, callcount={}, inlinetime={}, totaltime={}];\n",
            escape(&node.key),
            node_color(weight),
            node.metrics.callcount,
            node.metrics.inlinetime,
            node.metrics.totaltime,
        ));
    }

    for (caller, callee, edge) in prepared.graph.edges() {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [label=\"{}\", callcount={}];\n",
            escape(caller),
            escape(callee),
            edge.label(),
            edge.metrics.callcount,
        ));
    }

    for removed in &prepared.removed_edges {
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [style=dashed, constraint=false];\n",
            escape(&removed.caller),
            escape(&removed.callee),
        ));
    }

    out.push_str("}\n");
    out
}

/// Render and write a prepared graph to a `.dot` file
pub fn write_dot(prepared: &PreparedGraph, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_path(output_path)?;

    std::fs::write(output_path, render_dot(prepared))?;

    info!("Call graph written to: {}", output_path.display());
    Ok(())
}

/// HSV fill color for a display weight in [0, 1]
pub fn node_color(weight: f64) -> String {
    format!("{:.6} 1.0 1.0", (1.0 - weight) / 3.0)
}

fn escape(key: &str) -> String {
    key.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callgraph::graph::CallGraph;
    use crate::callgraph::prepare::prepare_graph;
    use crate::parser::schema::CallMetrics;

    fn at(totaltime: f64) -> CallMetrics {
        CallMetrics {
            callcount: 1,
            totaltime,
            ..Default::default()
        }
    }

    #[test]
    fn test_node_color_scale() {
        assert_eq!(node_color(1.0), "0.000000 1.0 1.0");
        assert_eq!(node_color(0.0), "0.333333 1.0 1.0");
    }

    #[test]
    fn test_render_marks_removed_edges() {
        let mut graph = CallGraph::new();
        graph.insert_node("main", at(2.0));
        graph.insert_node("rec", at(1.0));
        graph.insert_edge("main", "rec", at(1.0));
        graph.insert_edge("rec", "rec", at(0.5));

        let prepared = prepare_graph(&graph, 0.0, true, 10);
        let dot = render_dot(&prepared);

        assert!(dot.starts_with("digraph \"G\" {"));
        assert!(dot.contains("\"main\" [color=\"0.000000 1.0 1.0\", style=filled"));
        assert!(dot.contains("\"rec\" [color=\"0.166667 1.0 1.0\""));
        assert!(dot.contains("\"main\" -> \"rec\" [label=\"1\""));
        assert!(dot.contains("\"rec\" -> \"rec\" [style=dashed, constraint=false];"));

        // header, two nodes, one kept edge, one removed edge, closing brace
        assert_eq!(dot.lines().count(), 6);
        assert!(dot.ends_with("];\n}\n"));
    }

    #[test]
    fn test_keys_are_escaped() {
        let mut graph = CallGraph::new();
        graph.insert_node("<built-in \"x\">", at(1.0));

        let dot = render_dot(&prepare_graph(&graph, 0.0, false, 10));
        assert!(dot.contains("\"<built-in \\\"x\\\">\""));
    }

    #[test]
    fn test_write_dot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("graphs/call.dot");

        let mut graph = CallGraph::new();
        graph.insert_node("main", at(1.0));
        write_dot(&prepare_graph(&graph, 0.0, true, 10), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"main\""));
    }
}
