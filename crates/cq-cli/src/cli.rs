//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cqlflow - a schema migration tool for Cassandra-style keyspaces
#[derive(Parser, Debug)]
#[command(name = "cqf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the configured execution profile
    #[arg(long, global = true, value_enum)]
    pub profile: Option<ProfileArg>,
}

/// Execution profile override
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    /// cqlsh on the local host
    Direct,
    /// cqlsh inside a docker container
    Container,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending migrations to the keyspace
    Migrate,

    /// Show ledger and catalog state without writing to the store
    Status(StatusArgs),

    /// Scaffold a new Cqlflow project
    Init(InitArgs),
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create
    pub name: String,

    /// Keyspace the new project manages (defaults to the project name)
    #[arg(short, long)]
    pub keyspace: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
