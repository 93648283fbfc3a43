//! CLI argument definitions for the address normalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "addrnorm",
    version,
    about = "Normalize free-text postal addresses into structured records",
    long_about = "Parse raw address strings into structured, validated records.\n\n\
                  Validates ZIP codes and states against a reference table and\n\
                  reports every silent normalization in an audit log."
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

    /// ZIP reference table (CSV: zip,city,state_id,state_name,county_name).
    /// Defaults to the bundled sample table.
    #[arg(long = "zip-data", value_name = "PATH", global = true)]
    pub zip_data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a single address string.
    Parse(ParseArgs),

    /// Parse an address column of a CSV file.
    Batch(BatchArgs),

    /// Look up city/state/county for a ZIP code.
    Zip(ZipArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// The raw address string.
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Skip ZIP/state validation against the reference table.
    #[arg(long = "no-validate")]
    pub no_validate: bool,

    /// Strip an invalid ZIP+4 extension instead of failing the parse.
    #[arg(long)]
    pub partial: bool,

    /// Also verify that the ZIP code belongs to the stated state.
    #[arg(long = "state-match")]
    pub state_match: bool,

    /// Skip the US/international routing pre-check and force the domestic
    /// parser.
    #[arg(long = "no-route", conflicts_with = "international")]
    pub no_route: bool,

    /// Force the international backend instead of routing.
    #[arg(long)]
    pub international: bool,

    /// Emit the result as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Show the audit log of silent normalizations.
    #[arg(long)]
    pub audit: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Input CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Name of the column holding raw addresses.
    #[arg(long, default_value = "address")]
    pub column: String,

    /// Output CSV path (default: <INPUT> with a `.parsed.csv` suffix).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How to handle rows that fail to parse.
    #[arg(long = "on-error", value_enum, default_value = "coerce")]
    pub on_error: OnErrorArg,

    /// Strip invalid ZIP+4 extensions instead of failing rows.
    #[arg(long)]
    pub partial: bool,

    /// Skip ZIP/state validation against the reference table.
    #[arg(long = "no-validate")]
    pub no_validate: bool,
}

#[derive(Parser)]
pub struct ZipArgs {
    /// ZIP code (5-digit or ZIP+4).
    #[arg(value_name = "CODE")]
    pub code: String,
}

/// Failure policy choices for batch parsing.
#[derive(Clone, Copy, ValueEnum)]
pub enum OnErrorArg {
    /// Abort the batch on the first bad row.
    Raise,
    /// Leave component columns empty for bad rows.
    Coerce,
    /// Keep the raw text in the `full` column for bad rows.
    Passthrough,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
