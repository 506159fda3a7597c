use colored::Colorize;
use compact_str::CompactString;
use serde::Serialize;

use crate::error::{AppResult, output_error};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Summary of one statement, by zero-based position in the script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub index:   usize,
    pub summary: CompactString
}

impl SummaryRecord {
    /// Pair summaries with their statement index
    pub fn from_summaries(summaries: Vec<CompactString>) -> Vec<Self> {
        summaries
            .into_iter()
            .enumerate()
            .map(|(index, summary)| Self {
                index,
                summary
            })
            .collect()
    }
}

/// Format summaries based on output options
pub fn format_summaries(records: &[SummaryRecord], opts: &OutputOptions) -> AppResult<String> {
    match opts.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).map_err(|e| output_error("JSON", e))
        }
        OutputFormat::Yaml => serde_yaml::to_string(records).map_err(|e| output_error("YAML", e)),
        OutputFormat::Text => Ok(format_text(records, opts))
    }
}

fn format_text(records: &[SummaryRecord], opts: &OutputOptions) -> String {
    if records.is_empty() {
        return String::from("No statements found");
    }
    let mut output = String::new();
    for record in records {
        let number = format!("{:>4}.", record.index + 1);
        let line = match (record.summary.is_empty(), opts.colored) {
            (true, true) => format!("{} {}", number.dimmed(), "(no summary)".dimmed()),
            (true, false) => format!("{} (no summary)", number),
            (false, true) => format!("{} {}", number.dimmed(), record.summary.as_str().bold()),
            (false, false) => format!("{} {}", number, record.summary)
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}
