//! Terminal summary of a call tree report.

use crate::report::CallTreeReport;
use colored::*;

/// Render a human-readable summary of a report for the terminal
pub fn render_summary(report: &CallTreeReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    out.push_str(&render_hot_functions(report));
    out.push_str(&render_categories(report));
    out.push_str(&render_cycles(report));

    out
}

fn render_header(report: &CallTreeReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Call Tree Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Session:  {}\n", report.session.uuid));
    if let Some(path) = &report.session.path {
        out.push_str(&format!("Path:     {}\n", path));
    }
    out.push_str(&format!("Duration: {:.6}s\n", report.session.duration));
    out.push_str(&format!(
        "Nodes:    {} shown of {} (cutoff {:.6}s)\n",
        report.displayed_nodes, report.total_nodes, report.cutoff_time
    ));
    out.push_str(&format!("Roots:    {}\n", report.roots.join(", ")));
    out.push_str("---------------------------------------------------\n");
    out
}

fn render_hot_functions(report: &CallTreeReport) -> String {
    let mut out = String::new();
    if report.hot_functions.is_empty() {
        return out;
    }

    out.push_str("\nHot Functions (inline time):\n");
    for (i, hot) in report.hot_functions.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:<50} {:>12.6}s {:>6.1}%  x{}\n",
            i + 1,
            shorten_key(&hot.key),
            hot.inlinetime,
            hot.percentage,
            hot.callcount
        ));
    }
    out
}

fn render_categories(report: &CallTreeReport) -> String {
    let mut out = String::new();
    let Some(times) = &report.category_times else {
        return out;
    };

    let total: f64 = times.values().sum();
    out.push_str("\nTime per Category:\n");
    for (category, time) in times {
        let share = if total > 0.0 { time / total * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "  {:<30} {:>12.6}s {:>6.1}%\n",
            category, time, share
        ));
    }
    out
}

fn render_cycles(report: &CallTreeReport) -> String {
    let mut out = String::new();

    if !report.removed_edges.is_empty() {
        out.push_str(&format!(
            "\nCycle edges removed ({}):\n",
            report.removed_edges.len()
        ));
        for edge in &report.removed_edges {
            out.push_str(&format!("  {} -> {}\n", edge.caller, edge.callee));
        }
    }

    out.push('\n');
    let status = if report.truncated {
        "⚠️  Cycle budget reached: graph is only partially acyclic"
            .yellow()
            .bold()
    } else if report.acyclic {
        "✅ Graph is acyclic".green().bold()
    } else {
        "🔁 Graph contains cycles".yellow()
    };
    out.push_str(&status.to_string());
    out.push('\n');
    out
}

/// Keep the tail of long keys, where the function name is
fn shorten_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 50 {
        let tail: String = chars[chars.len() - 47..].iter().collect();
        format!("...{}", tail)
    } else {
        key.to_string()
    }
}
