use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ldiff_parser::{DuplicateEntryPolicy, MissingDnPolicy};
use ldiff_types::AttributeCase;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "ldiff",
    about = "Generate an ldapmodify script that moves a directory from its current to a new configuration",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with [parser] and [diff] settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        let debug = match &self.command {
            Command::Diff(args) => args.debug,
            Command::Check(_) => false,
        };
        if self.verbose || debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two snapshots and print the change script
    Diff(DiffArgs),
    /// Parse snapshots and report errors without diffing
    Check(CheckArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot of the configuration currently applied
    #[arg(long)]
    pub current: PathBuf,
    /// Snapshot of the configuration to apply
    #[arg(long)]
    pub new: PathBuf,
    /// Write the script here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Print a change summary to stderr
    #[arg(long)]
    pub stat: bool,
    /// Log both parsed snapshots
    #[arg(long)]
    pub debug: bool,
    #[command(flatten)]
    pub policy: PolicyArgs,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    #[command(flatten)]
    pub policy: PolicyArgs,
}

/// Command-line overrides for the configuration file.
#[derive(Args, Clone, Debug, Default)]
pub struct PolicyArgs {
    #[arg(long)]
    pub attribute_case: Option<CaseArg>,
    #[arg(long)]
    pub missing_dn: Option<MissingDnArg>,
    #[arg(long)]
    pub duplicate_entry: Option<DuplicateEntryArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CaseArg {
    Sensitive,
    Insensitive,
}

impl From<CaseArg> for AttributeCase {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::Sensitive => AttributeCase::Sensitive,
            CaseArg::Insensitive => AttributeCase::Insensitive,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MissingDnArg {
    Reject,
    Skip,
}

impl From<MissingDnArg> for MissingDnPolicy {
    fn from(arg: MissingDnArg) -> Self {
        match arg {
            MissingDnArg::Reject => MissingDnPolicy::Reject,
            MissingDnArg::Skip => MissingDnPolicy::Skip,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DuplicateEntryArg {
    Reject,
    Merge,
}

impl From<DuplicateEntryArg> for DuplicateEntryPolicy {
    fn from(arg: DuplicateEntryArg) -> Self {
        match arg {
            DuplicateEntryArg::Reject => DuplicateEntryPolicy::Reject,
            DuplicateEntryArg::Merge => DuplicateEntryPolicy::Merge,
        }
    }
}
