//! # SQL Query Summary Library
//!
//! Literal-free summaries of SQL statements, for span names and metric
//! labels.
//!
//! ```
//! use sql_query_summary::QuerySummarizer;
//!
//! let summarizer = QuerySummarizer::default();
//! let summary = summarizer.summarize_query("SELECT * FROM users WHERE ssn = '123-45-6789'");
//! assert_eq!(summary, "SELECT users");
//! ```

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod lexer;
pub mod output;
pub mod summary;

use std::num::NonZeroUsize;

pub use compact_str::CompactString;
pub use masterror::{AppError, AppResult};
use rayon::prelude::*;

use crate::{cache::QueryCache, config::Config, lexer::Lexer};

/// Summarize a statement without caching.
#[must_use]
pub fn summarize_query(sql: &str) -> CompactString {
    summary::summarize(Lexer::new(sql))
}

/// Cached summarizer owning one [`QueryCache`].
///
/// Shared by reference between threads; lexing and summarizing run inside
/// the cache lock only on a miss.
#[derive(Debug, Default)]
pub struct QuerySummarizer {
    cache: QueryCache<CompactString>
}

impl QuerySummarizer {
    #[must_use]
    pub fn new(max_entries: NonZeroUsize) -> Self {
        Self {
            cache: QueryCache::new(max_entries)
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache.max_entries)
    }

    /// Summary of `sql`, served from the cache when the exact text was seen.
    pub fn summarize_query(&self, sql: &str) -> CompactString {
        self.cache.fetch(sql, || summarize_query(sql))
    }

    /// Summaries of many statements, computed in parallel, in input order.
    pub fn summarize_batch(&self, statements: &[&str]) -> Vec<CompactString> {
        statements
            .par_iter()
            .map(|sql| self.summarize_query(sql))
            .collect()
    }

    pub fn configure(&self, max_entries: NonZeroUsize) {
        self.cache.configure(max_entries);
    }

    pub fn cache(&self) -> &QueryCache<CompactString> {
        &self.cache
    }
}
