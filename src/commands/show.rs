//! Show command implementation.
//!
//! Re-derives display views from a stored session, so the same capture can
//! be viewed with different cutoffs and categories.

use super::analyze::emit_views;
use super::models::ShowArgs;
use crate::output::read_session;
use anyhow::{Context, Result};
use log::info;

/// Execute the show command
///
/// **Public** - main entry point called from main.rs
pub fn execute_show(args: ShowArgs) -> Result<()> {
    info!("Loading session: {}", args.session.display());

    let session = read_session(&args.session)
        .with_context(|| format!("Failed to read session {}", args.session.display()))?;

    emit_views(
        &session,
        &args.config,
        args.output_report.as_ref(),
        args.output_dot.as_ref(),
        args.print_summary,
    )
}
