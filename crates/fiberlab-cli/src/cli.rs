use clap::{Args, Parser, Subcommand, ValueEnum};
use fiberlab::core::reference::table::Standard;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The FiberLab Developers",
    version,
    about = "FiberLab CLI - Compute the fiber composition of textile samples from manual separation, chemical separation and garment breakdown measurements.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze the samples of a run file and write the composition report.
    Analyze(AnalyzeArgs),
    /// Manage the fiber moisture-regain reference table.
    Fibers(FibersArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the run file in TOML format.
    #[arg(required = true, value_name = "RUN_FILE")]
    pub run_file: PathBuf,

    /// Write the report to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Override the moisture-regain standard used for fibers without a moisture value
    /// (iso, aatcc, eu, canada).
    #[arg(long, value_name = "STANDARD")]
    pub standard: Option<Standard>,

    /// Override the tolerance, in percentage points, for garment breakdowns summing to 100.
    #[arg(short, long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,

    /// Set a specific configuration value, overriding the run file.
    /// Can be used multiple times. Example: -S settings.standard=aatcc
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `fibers` subcommand.
#[derive(Args, Debug)]
pub struct FibersArgs {
    #[command(subcommand)]
    pub command: FibersCommands,
}

/// Available commands for reference table management.
#[derive(Subcommand, Debug)]
pub enum FibersCommands {
    /// Print every fiber and its moisture regain under each standard.
    List,
    /// Add a fiber. Regains not given are left blank.
    Add {
        #[arg(required = true)]
        name: String,
        #[arg(long, value_name = "PERCENT")]
        iso: Option<f64>,
        #[arg(long, value_name = "PERCENT")]
        aatcc: Option<f64>,
        #[arg(long, value_name = "PERCENT")]
        eu: Option<f64>,
        #[arg(long, value_name = "PERCENT")]
        canada: Option<f64>,
    },
    /// Set one moisture regain of a fiber. Omit the value to blank the cell.
    Set {
        #[arg(required = true)]
        id: u32,
        #[arg(required = true)]
        standard: Standard,
        value: Option<f64>,
    },
    /// Rename a fiber.
    Rename {
        #[arg(required = true)]
        id: u32,
        #[arg(required = true)]
        name: String,
    },
    /// Remove a fiber.
    Remove {
        #[arg(required = true)]
        id: u32,
    },
    /// Replace the table with the built-in defaults.
    Reset,
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing the reference table.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}
