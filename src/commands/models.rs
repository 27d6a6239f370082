use crate::utils::config::AnalysisConfig;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace JSON to build the session from
    pub trace: PathBuf,

    /// Where to store the session JSON (optional)
    pub output_session: Option<PathBuf>,

    /// Output path for the report JSON (optional)
    pub output_report: Option<PathBuf>,

    /// Output path for the DOT call graph (optional)
    pub output_dot: Option<PathBuf>,

    /// How views are derived from the session
    pub config: AnalysisConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::from("trace.json"),
            output_session: Some(PathBuf::from("session.json")),
            output_report: None,
            output_dot: None,
            config: AnalysisConfig::default(),
            print_summary: false,
        }
    }
}

/// Arguments for the show command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ShowArgs {
    /// Stored session JSON
    pub session: PathBuf,

    /// Output path for the report JSON (optional)
    pub output_report: Option<PathBuf>,

    /// Output path for the DOT call graph (optional)
    pub output_dot: Option<PathBuf>,

    /// How views are derived from the session
    pub config: AnalysisConfig,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            session: PathBuf::from("session.json"),
            output_report: None,
            output_dot: None,
            config: AnalysisConfig::default(),
            print_summary: true,
        }
    }
}
