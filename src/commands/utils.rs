use crate::output::read_session;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a stored session JSON file
pub fn validate_session_file(file_path: PathBuf) -> Result<()> {
    println!("Validating session: {}", file_path.display());

    let session = read_session(&file_path)?;

    println!("✓ Valid session JSON");
    println!("  Version: {}", session.version());
    println!("  Session: {}", session.uuid());
    if let Some(path) = session.path() {
        println!("  Path: {}", path);
    }
    println!("  Duration: {:.6}s", session.duration());
    println!("  Nodes: {}", session.graph().node_count());
    println!("  Edges: {}", session.graph().edge_count());
    println!("  Roots: {}", session.roots().join(", "));

    if session.version() != SCHEMA_VERSION {
        println!(
            "  Note: written with schema v{}, current is v{}",
            session.version(),
            SCHEMA_VERSION
        );
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Call Trace Studio Session Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  uuid: string             - Session identifier");
        println!("  path: string?            - Profiled request path");
        println!("  timestamp: string?       - ISO 8601 capture time");
        println!("  duration: number         - Longest total time, in seconds");
        println!("  graph: object            - Baseline call graph");
        println!("    nodes: array           - One entry per symbol");
        println!("      key: string          - Symbol key");
        println!("      callcount: number    - Calls made to the symbol");
        println!("      reccallcount: number - Recursive calls");
        println!("      inlinetime: number   - Seconds excluding callees");
        println!("      totaltime: number    - Seconds including callees");
        println!("    edges: array           - One entry per caller -> callee pair");
        println!("      caller: string       - Calling symbol key");
        println!("      callee: string       - Called symbol key");
        println!("      (same four metrics, scoped to the call)");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Call Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Session Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Call graph analysis for captured call-time traces.");
}
