//! Tick Profiler CLI
//!
//! Runs an instrumented demo loop and inspects saved profile documents.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use tick_profiler::commands::{
    display_schema, display_version, execute_demo, validate_profile_file, DemoArgs,
};
use tick_profiler::utils::config::{DEFAULT_TIME_UNIT, OUTPUT_DIR_ENV};

/// Tick Profiler - hierarchical execution time profiling
#[derive(Parser, Debug)]
#[command(name = "tick-profiler")]
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
    /// Profile a synthetic periodic loop and save the result
    Demo {
        /// Number of ticks to run
        #[arg(short, long, default_value = "250")]
        ticks: usize,

        /// Directory the profile is written to
        #[arg(short, long, env = OUTPUT_DIR_ENV, default_value = "profiles")]
        output_dir: PathBuf,

        /// Fixed base name (defaults to the log file naming scheme)
        #[arg(short, long)]
        name: Option<String>,

        /// Match text appended to log-derived names
        #[arg(long)]
        match_text: Option<String>,

        /// Multiplier on the simulated work per region
        #[arg(long, default_value = "1")]
        work_scale: u32,

        /// Print text report to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a profile JSON file and print its report
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Levels below root shown in the report
        #[arg(short, long, default_value = "4")]
        depth: usize,

        /// Label for the document's time unit
        #[arg(short, long, default_value = DEFAULT_TIME_UNIT)]
        unit: String,
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

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Demo {
            ticks,
            output_dir,
            name,
            match_text,
            work_scale,
            summary,
        } => {
            let args = DemoArgs {
                ticks,
                output_dir,
                name,
                match_text,
                work_scale,
                print_summary: summary,
            };

            execute_demo(args)?;
        }

        Commands::Validate { file, depth, unit } => {
            validate_profile_file(file, depth, &unit)?;
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
