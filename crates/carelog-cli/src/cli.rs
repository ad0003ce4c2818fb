//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "carelog",
    version,
    about = "Normalize care-facility shift and incident emails into canonical records",
    long_about = "Classify pre-parsed shift-note and incident emails against the template\n\
                  catalogue, extract labelled fields into the canonical data dictionary and\n\
                  emit one JSON record per email. Unmapped labels are never dropped; they are\n\
                  carried in each record's additional_fields overflow."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract canonical records from a folder of envelope JSON files.
    Extract(ExtractArgs),

    /// List the loaded template catalogue and data dictionary.
    Templates,
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Folder containing envelope JSON files (one pre-parsed email each).
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory for record files (default: <INPUT_DIR>/records).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Worker threads for the batch (default: available parallelism).
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Process at most N envelopes.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Classify and extract without writing record files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
