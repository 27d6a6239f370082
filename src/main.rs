//! Call Trace Studio CLI
//!
//! Builds call graphs from captured call-time traces, stores them as
//! sessions, and renders pruned, cycle-free views with time breakdowns.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use calltrace_studio::aggregator::normalize_categories;
use calltrace_studio::commands::{
    display_schema, display_version, execute_analyze, execute_show, validate_args,
    validate_config, validate_session_file, AnalyzeArgs, ShowArgs,
};
use calltrace_studio::utils::config::{load_config, AnalysisConfig};

/// Call Trace Studio - call graph analysis for profiled code
#[derive(Parser, Debug)]
#[command(name = "calltrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a session from a trace and render its views
    Analyze {
        /// Trace JSON file
        #[arg(short, long)]
        trace: PathBuf,

        /// Output path for the session JSON
        #[arg(short, long, default_value = "session.json")]
        output: PathBuf,

        #[command(flatten)]
        view: ViewFlags,
    },

    /// Render views from a stored session
    Show {
        /// Session JSON file
        #[arg(short, long)]
        session: PathBuf,

        #[command(flatten)]
        view: ViewFlags,
    },

    /// Validate a session JSON file
    Validate {
        /// Path to session JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

/// Flags shared by every command that derives views
#[derive(Args, Debug)]
struct ViewFlags {
    /// Output path for the report JSON
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Output path for the DOT call graph
    #[arg(short, long)]
    dot: Option<PathBuf>,

    /// Analysis settings file (TOML)
    #[arg(short, long, env = "CALLTRACE_CONFIG")]
    config: Option<PathBuf>,

    /// Prune functions below this percentage of the session duration
    #[arg(long)]
    cutoff_percent: Option<f64>,

    /// Key prefix to track in the time breakdown (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Keep cycles in the displayed graph
    #[arg(long)]
    no_break_cycles: bool,

    /// Maximum number of cycles to examine while breaking cycles
    #[arg(long)]
    max_cycles: Option<usize>,

    /// Number of hot functions to include
    #[arg(long)]
    top: Option<usize>,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            trace,
            output,
            view,
        } => {
            let config = resolve_config(&view)?;

            let args = AnalyzeArgs {
                trace,
                output_session: Some(output),
                output_report: view.report,
                output_dot: view.dot,
                config,
                print_summary: view.summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Show { session, view } => {
            let config = resolve_config(&view)?;
            validate_config(&config)?;

            let args = ShowArgs {
                session,
                output_report: view.report,
                output_dot: view.dot,
                config,
                print_summary: view.summary,
            };

            execute_show(args)?;
        }

        Commands::Validate { file } => {
            validate_session_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Merge the config file (if any) with command-line overrides
///
/// **Private** - flags win over the file, the file wins over defaults
fn resolve_config(view: &ViewFlags) -> Result<AnalysisConfig> {
    let mut config = match &view.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(percent) = view.cutoff_percent {
        config.cutoff_percentage = percent / 100.0;
    }
    if !view.categories.is_empty() {
        config.categories = view.categories.clone();
    }
    if view.no_break_cycles {
        config.break_cycles = false;
    }
    if let Some(max_cycles) = view.max_cycles {
        config.max_cycles = max_cycles;
    }
    if let Some(top) = view.top {
        config.top_functions = top;
    }

    config.categories = normalize_categories(&config.categories);
    Ok(config)
}
