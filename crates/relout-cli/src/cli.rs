//! CLI argument definitions for the relation output decoder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "relout",
    version,
    about = "Decode path-encoded relation output",
    long_about = "Decode a relation dump into application-level structures.\n\n\
                  A dump is a JSON object mapping relation paths to column-major\n\
                  arrays, e.g. {\"/:[]/Int64/Int64\": [[1,2],[10,20]]}."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconstruct the JSON value encoded by the relations.
    Json(DumpArgs),

    /// Assemble the ordered diagnostic records.
    Diagnostics(DumpArgs),

    /// Assemble the integrity-constraint violations.
    Violations(DumpArgs),

    /// Rebuild the row/column pivot table.
    Table(DumpArgs),

    /// Partition relations into named display buckets.
    Partition(DumpArgs),
}

#[derive(Parser)]
pub struct DumpArgs {
    /// Path to the relation dump (JSON).
    #[arg(value_name = "DUMP")]
    pub dump: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
