//! Command execution for the `sql-query-summary` binary.

use std::{
    fs::read_to_string,
    io::{self, Read},
    path::Path
};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{
    QuerySummarizer,
    cli::{Cli, Commands, Format},
    config::Config,
    error::{AppResult, file_read_error},
    lexer::split_statements,
    output::{OutputFormat, OutputOptions, SummaryRecord, format_summaries}
};

/// Run the parsed command line, returning the process exit code
pub fn run(cli: Cli) -> AppResult<i32> {
    match cli.command {
        Commands::Summarize {
            queries,
            output_format,
            cache_size,
            verbose,
            no_color
        } => {
            init_tracing(verbose);

            let mut config = Config::load()?;
            if let Some(size) = cache_size {
                config.cache.max_entries = size;
            }

            let sql = read_queries(&queries)?;
            let statements = split_statements(&sql);
            debug!(statements = statements.len(), "summarizing script");

            let summarizer = QuerySummarizer::from_config(&config);
            let records = SummaryRecord::from_summaries(summarizer.summarize_batch(&statements));
            debug!(cached = summarizer.cache().len(), "summaries computed");

            let output_opts = OutputOptions {
                format:  match output_format {
                    Format::Text => OutputFormat::Text,
                    Format::Json => OutputFormat::Json,
                    Format::Yaml => OutputFormat::Yaml
                },
                colored: !no_color
            };
            println!("{}", format_summaries(&records, &output_opts)?);
            Ok(0)
        }
    }
}

/// Read queries from a file, or stdin for "-"
fn read_queries(path: &Path) -> AppResult<String> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(&path.display().to_string(), e))
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sql_query_summary=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed by an embedding process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
