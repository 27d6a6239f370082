//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod show;
pub mod utils;

// Re-export main command functions
pub use analyze::{build_report, execute_analyze, validate_args, validate_config};
pub use models::{AnalyzeArgs, ShowArgs};
pub use show::execute_show;
pub use utils::{display_schema, display_version, validate_session_file};
