//! CLI argument definitions for the issue auditor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use jira_cli::pipeline::DEFAULT_OUTPUT_FILE;
use jira_config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(
    name = "jira-audit",
    version,
    about = "Validate JIRA issue exports against configurable business rules",
    long_about = "Validate a JIRA issue export (CSV) against configurable business rules.\n\n\
                  Every record is annotated with the errors found and written to an \n\
                  output sheet with an appended `error` column."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file; created with defaults when absent.
    #[arg(
        long = "config",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_FILE,
        global = true
    )]
    pub config: PathBuf,

    /// Adjust log verbosity (-v for info, -vv for debug, -vvv for trace, -q for errors only).
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
    /// Validate an issue export and write the annotated sheet.
    Validate(ValidateArgs),

    /// Print the rule set built from the configuration.
    Rules(RulesArgs),

    /// Write the default configuration file.
    InitConfig(InitConfigArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Issue export to read (default: `jira.filename` from the config).
    #[arg(long = "input", short = 'i', value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Annotated sheet to write.
    #[arg(long = "output", short = 'o', value_name = "CSV", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Records per batch (default: `jira.chunk_size` from the config).
    #[arg(long = "chunk-size", value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Append the SLA rule for this run.
    #[arg(long = "enable-sla")]
    pub enable_sla: bool,

    /// Exit with status 1 when any record has an error.
    #[arg(long = "fail-on-errors")]
    pub fail_on_errors: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Include the SLA rule in the listing.
    #[arg(long = "enable-sla")]
    pub enable_sla: bool,
}

#[derive(Parser)]
pub struct InitConfigArgs {
    /// Overwrite an existing file.
    #[arg(long = "force")]
    pub force: bool,
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
