//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Reads the trace file
//! 2. Builds the session (baseline call graph)
//! 3. Stores the session
//! 4. Derives the display view and metrics
//! 5. Writes report and DOT outputs

use super::models::AnalyzeArgs;
use crate::aggregator::{calculate_hot_functions, time_per_category};
use crate::callgraph::PreparedGraph;
use crate::output::{render_summary, write_dot, write_report, write_session};
use crate::parser::read_trace;
use crate::report::{to_report, CallTreeReport};
use crate::session::Session;
use crate::utils::config::AnalysisConfig;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace read or parse errors
/// * Invalid metrics in the trace
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.trace.display());

    info!("Step 1/3: Reading trace...");
    let trace = read_trace(&args.trace)
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?;

    info!("Step 2/3: Building call graph...");
    let session = Session::from_trace(&trace).context("Failed to build call graph")?;

    if let Some(session_path) = &args.output_session {
        write_session(&session, session_path).context("Failed to write session JSON")?;
        info!("✓ Session written to: {}", session_path.display());
    }

    info!("Step 3/3: Deriving views...");
    emit_views(
        &session,
        &args.config,
        args.output_report.as_ref(),
        args.output_dot.as_ref(),
        args.print_summary,
    )?;

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Derive the display view, category times and hot functions of a session
///
/// **Public** - shared by analyze and show
pub fn build_report(session: &Session, config: &AnalysisConfig) -> (CallTreeReport, PreparedGraph) {
    let prepared = session.prepare(
        config.cutoff_percentage,
        config.break_cycles,
        config.max_cycles,
    );

    // Seeded from the displayed roots, but walked over the full baseline
    let category_times =
        time_per_category(session.graph(), &prepared.roots, &config.categories);

    let hot_functions =
        calculate_hot_functions(session.graph(), session.duration(), config.top_functions);

    debug!("Top 3 hot functions:");
    for (i, hot) in hot_functions.iter().take(3).enumerate() {
        debug!(
            "  {}. {:.6}s ({:.1}%): {}",
            i + 1,
            hot.inlinetime,
            hot.percentage,
            hot.key
        );
    }

    let report = to_report(session, &prepared, category_times, hot_functions);
    (report, prepared)
}

/// Write the requested outputs for a session
pub(crate) fn emit_views(
    session: &Session,
    config: &AnalysisConfig,
    report_path: Option<&PathBuf>,
    dot_path: Option<&PathBuf>,
    print_summary: bool,
) -> Result<()> {
    let (report, prepared) = build_report(session, config);

    if let Some(path) = report_path {
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    if let Some(path) = dot_path {
        write_dot(&prepared, path).context("Failed to write DOT graph")?;
        info!("✓ Call graph written to: {}", path.display());
    }

    if print_summary {
        println!("{}", render_summary(&report));
    }

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - should be called before execute_analyze
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.trace.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    validate_config(&args.config)
}

/// Check view settings shared by analyze and show
pub fn validate_config(config: &AnalysisConfig) -> Result<()> {
    config.validate().context("Invalid analysis settings")?;

    if config.top_functions == 0 {
        anyhow::bail!("top_functions must be greater than 0");
    }

    if config.top_functions > 1000 {
        anyhow::bail!("top_functions is too large (max 1000)");
    }

    Ok(())
}
