//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// gql-harvest CLI
#[derive(Parser, Debug)]
#[command(name = "gql-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a query and print the fully merged, cursor-free result
    Run {
        /// GraphQL endpoint URL
        #[arg(short, long)]
        endpoint: String,

        /// Credential token value
        #[arg(long, conflicts_with = "token_env")]
        token: Option<String>,

        /// Name of an environment variable holding the credential token
        #[arg(long)]
        token_env: Option<String>,

        /// Authorization scheme placed before the token
        #[arg(long, default_value = "Bearer")]
        auth_prefix: String,

        /// File containing the GraphQL query
        #[arg(short, long)]
        query: PathBuf,

        /// Cursor table file (JSON or YAML); omit to pass the query through
        #[arg(short, long)]
        cursors: Option<PathBuf>,

        /// Initial variables as inline JSON
        #[arg(long, default_value = "{}")]
        variables: String,

        /// Extra header in `Name: value` form (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Write the merged tree to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Parse a cursor table file and print its canonical form
    Validate {
        /// Cursor table file (JSON or YAML)
        #[arg(short, long)]
        cursors: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Pretty-printed JSON
    Pretty,
}
