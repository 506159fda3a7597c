use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Query Summary - Literal-free labels for SQL statements
#[derive(Parser, Debug)]
#[command(name = "sql-query-summary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize every statement of a SQL script
    Summarize {
        /// Path to SQL queries file (use - for stdin)
        #[arg(short, long)]
        queries: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Maximum number of cached summaries
        #[arg(long)]
        cache_size: Option<NonZeroUsize>,

        /// Log cache activity to stderr
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
