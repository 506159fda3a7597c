//! SQL lexer for query summarization.
//!
//! Turns raw statement text into a stream of typed [`Token`]s. The lexer is
//! deliberately forgiving: it never fails, and any character that no rule
//! recognizes is dropped so that scanning always makes progress.
//!
//! # Rules
//!
//! At every position the rules below are tried in order and the first one
//! matching a non-empty prefix wins:
//!
//! | # | Rule | Output |
//! |---|------|--------|
//! | 1 | whitespace | discarded |
//! | 2 | `-- line` and `/* block */` comments | discarded |
//! | 3 | numeric (`-1`, `0xFF`, `1.5e3`, `.5`) | [`TokenKind::Numeric`] |
//! | 4 | single-quoted string, `''` escape | [`TokenKind::String`] |
//! | 5 | `"a"`, `` `a` ``, `[a]` | [`TokenKind::QuotedIdentifier`] |
//! | 6 | reserved word, case-insensitive | [`TokenKind::Keyword`] |
//! | 7 | identifier, `schema.table`, `@var` | [`TokenKind::Identifier`] |
//! | 8 | `<=` `>=` `<>` `!=` then single characters | [`TokenKind::Operator`] |
//!
//! # Example
//!
//! ```
//! use sql_query_summary::lexer::{TokenKind, tokenize};
//!
//! let tokens = tokenize("SELECT * FROM users");
//! assert_eq!(tokens[0].kind, TokenKind::Keyword);
//! assert_eq!(tokens[3].text, "users");
//! ```

mod token;

use std::{iter::FusedIterator, ops::Range, sync::LazyLock};

use regex::Regex;
pub use token::{Token, TokenKind};

/// Reserved words recognized as [`TokenKind::Keyword`].
pub const KEYWORDS: &[&str] = &[
    "SELECT",
    "INSERT",
    "UPDATE",
    "DELETE",
    "FROM",
    "INTO",
    "JOIN",
    "CREATE",
    "ALTER",
    "DROP",
    "TRUNCATE",
    "WITH",
    "UNION",
    "TABLE",
    "INDEX",
    "PROCEDURE",
    "VIEW",
    "DATABASE",
    "AS",
    "ALL",
    "IN"
];

/// What a lexical rule yields once it matches.
#[derive(Debug, Clone, Copy)]
enum Lexeme {
    Discard,
    Emit(TokenKind)
}

/// Ordered lexical rules, each anchored at the current position.
static RULES: LazyLock<Vec<(Lexeme, Regex)>> = LazyLock::new(|| {
    vec![
        (Lexeme::Discard, anchored(r"\s+")),
        (Lexeme::Discard, anchored(r"--[^\r\n]*|/\*(?s:.*?)\*/")),
        (
            Lexeme::Emit(TokenKind::Numeric),
            anchored(
                r"[+-]?(?:0[xX][0-9a-fA-F]+|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)"
            )
        ),
        (Lexeme::Emit(TokenKind::String), anchored(r"'(?:''|[^'])*'?")),
        (
            Lexeme::Emit(TokenKind::QuotedIdentifier),
            anchored(r#""(?:""|[^"])*"|`(?:``|[^`])*`|\[[^\]]*\]"#)
        ),
        (
            Lexeme::Emit(TokenKind::Keyword),
            anchored(&format!(r"(?i:{})\b", KEYWORDS.join("|")))
        ),
        (
            Lexeme::Emit(TokenKind::Identifier),
            anchored(r"@{0,2}[\p{L}_][\p{L}\p{Nd}_.]*")
        ),
        (
            Lexeme::Emit(TokenKind::Operator),
            anchored(r"<=|>=|<>|!=|[=<>+\-*/%,;()!]")
        ),
    ]
});

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!(r"\A(?:{})", pattern)).expect("valid regex")
}

/// Scan one lexeme at the start of `rest`.
///
/// Returns the number of bytes consumed, which is never zero for non-empty
/// input, together with the token kind when the lexeme is emitted.
fn scan(rest: &str) -> (usize, Option<TokenKind>) {
    let matched = RULES.iter().find_map(|(lexeme, regex)| {
        regex
            .find(rest)
            .filter(|m| !m.is_empty())
            .map(|m| (m.end(), *lexeme))
    });
    match matched {
        Some((len, Lexeme::Emit(kind))) => (len, Some(kind)),
        Some((len, Lexeme::Discard)) => (len, None),
        None => (rest.chars().next().map_or(1, char::len_utf8), None)
    }
}

/// Lazy token iterator over a SQL string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source:   &'a str,
    position: usize
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0
        }
    }

    /// Yield byte ranges of the source alongside each token.
    #[must_use]
    pub fn spanned(self) -> Spanned<'a> {
        Spanned(self)
    }

    fn next_spanned(&mut self) -> Option<(Range<usize>, Token<'a>)> {
        let source = self.source;
        while self.position < source.len() {
            let start = self.position;
            let rest = &source[start..];
            let (len, kind) = scan(rest);
            self.position += len;
            if let Some(kind) = kind {
                return Some((start..self.position, Token::new(kind, &rest[..len])));
            }
        }
        None
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_spanned().map(|(_, token)| token)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Iterator adapter returned by [`Lexer::spanned`].
#[derive(Debug, Clone)]
pub struct Spanned<'a>(Lexer<'a>);

impl<'a> Iterator for Spanned<'a> {
    type Item = (Range<usize>, Token<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_spanned()
    }
}

impl FusedIterator for Spanned<'_> {}

/// Tokenize a whole string.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Lexer::new(text).collect()
}

/// Split a script into statements at top-level `;` tokens.
///
/// Semicolons inside strings, quoted identifiers and comments do not split.
/// Segments without any token (blank or comment-only) are dropped.
#[must_use]
pub fn split_statements(sql: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut start = 0;
    let mut has_tokens = false;
    for (span, token) in Lexer::new(sql).spanned() {
        if token.is_operator(";") {
            if has_tokens {
                statements.push(sql[start..span.start].trim());
            }
            start = span.end;
            has_tokens = false;
        } else {
            has_tokens = true;
        }
    }
    if has_tokens {
        statements.push(sql[start..].trim());
    }
    statements
}
