//! CLI argument definitions for csvjoin.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "csvjoin",
    version,
    about = "Join CSV files that share a header into a single CSV",
    long_about = "Join CSV files that share a header into a single CSV.\n\n\
                  The header of the first file is kept and the first row of every\n\
                  other file is dropped. Numbers can optionally be rewritten from\n\
                  decimal point (3.55) to decimal comma (3,55)."
)]
pub struct Cli {
    /// Directory whose *.csv files are joined in filename order.
    #[arg(
        long = "inputdir",
        value_name = "DIR",
        required_unless_present = "input_files",
        conflicts_with = "input_files"
    )]
    pub input_dir: Option<PathBuf>,

    /// Explicit input file, joined in the order given (repeatable).
    #[arg(long = "inputfile", value_name = "PATH")]
    pub input_files: Vec<PathBuf>,

    /// Output CSV file. Must not exist yet.
    #[arg(long = "outputfile", value_name = "PATH")]
    pub output_file: PathBuf,

    /// Field delimiter for reading and writing (a single ASCII character, or `\t`).
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Rewrite decimal numbers from 3.55 to 3,55.
    #[arg(
        long = "commadecimal",
        value_name = "BOOL",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub comma_decimal: bool,

    /// Column to hold the source filename. Accepted but not applied.
    #[arg(long = "dump_file_column", value_name = "NAME")]
    pub dump_file_column: Option<String>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps")]
    pub log_timestamps: bool,

    /// Include the module path in log lines.
    #[arg(long = "log-target")]
    pub log_target: bool,
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

/// Parses a delimiter argument into the single byte the CSV reader expects.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    if matches!(value, "\\t" | "tab" | "\t") {
        return Ok(b'\t');
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii() && ch != '"' && ch != '\n' && ch != '\r' => Ok(ch as u8),
        (Some(ch), None) => Err(format!("delimiter '{ch}' is not supported")),
        _ => Err(format!("delimiter must be a single character, got {value:?}")),
    }
}
