//! # SQL Query Summary
//!
//! Prints the literal-free summary of every statement in a SQL script.
//!
//! ```bash
//! sql-query-summary summarize -q queries.sql
//! echo "SELECT * FROM users" | sql-query-summary summarize -q - -f json
//! ```
//!
//! # Configuration
//!
//! Loaded from (in order of precedence):
//!
//! 1. Command-line arguments (`--cache-size`)
//! 2. Environment variables (`SQL_SUMMARY_CACHE_SIZE`)
//! 3. `.sql-query-summary.toml` in current directory
//! 4. `~/.config/sql-query-summary/config.toml`
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - Input or configuration error

use std::process;

use clap::Parser;
use sql_query_summary::{app::run, cli::Cli};

fn main() {
    match run(Cli::parse()) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
