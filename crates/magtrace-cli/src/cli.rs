use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "magtrace - Extract per-ion magnetization or charge time series from VASP OUTCAR logs.",
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

    /// Set the number of threads used when several logs are extracted at once.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a per-ion scalar time series from one or more OUTCAR-style logs.
    Extract(ExtractArgs),
    /// List the built-in block presets.
    Presets,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    // --- Core Arguments ---
    /// Path(s) to the input log file(s) (e.g., OUTCAR). Several logs are scanned in parallel.
    #[arg(short, long = "input", required = true, num_args = 1.., value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Number of ions (entities) per block. Required here or in the config file.
    #[arg(short = 'n', long, value_name = "INT")]
    pub entity_count: Option<usize>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Block Layout Overrides ---
    /// Block preset to extract (see `magtrace presets`).
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the block marker text (case-sensitive substring).
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Override the number of lines between the marker and the first data line.
    #[arg(long, value_name = "INT")]
    pub header_skip: Option<usize>,

    /// Override the minimum number of whitespace-separated fields on a data line.
    #[arg(long, value_name = "INT")]
    pub min_fields: Option<usize>,

    /// Override the zero-based index of the value field on a data line.
    #[arg(long, value_name = "INT")]
    pub value_field_index: Option<usize>,

    // --- Output ---
    /// Directory for the generated CSV files. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print per-ion statistics and write a `<name>_summary.csv` next to each series.
    #[arg(long)]
    pub summary: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scan.header-skip=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}
