//! Token-stream summarizer.
//!
//! Walks the tokens produced by [`crate::lexer`] once, left to right, with a
//! single token of lookahead, and emits a short label made of operation
//! keywords and collection names:
//!
//! | Statement | Summary |
//! |-----------|---------|
//! | `SELECT * FROM users` | `SELECT users` |
//! | `INSERT INTO orders (id) VALUES (1)` | `INSERT orders` |
//! | `CREATE TABLE users (id INT)` | `CREATE TABLE users` |
//! | `SELECT a FROM t1, t2` | `SELECT t1 t2` |
//! | `SELECT 1` | `SELECT` |
//!
//! String and numeric literals are never emitted, so the label is safe to use
//! as a span name or metric label.

use std::iter::Peekable;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::lexer::{Token, TokenKind};

/// Keywords naming an object type after `CREATE`/`ALTER`/`DROP`/`TRUNCATE`.
///
/// They may also appear as collection names.
const OBJECT_TYPES: &[&str] = &["TABLE", "INDEX", "PROCEDURE", "VIEW", "DATABASE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ParserState {
    #[default]
    Default,
    ExpectCollection
}

/// Operation keyword classes, recognized in every state.
#[derive(Debug, Clone, Copy)]
enum Operation {
    /// `SELECT`, `INSERT`, `DELETE`
    Main,
    /// `WITH`, `UPDATE`
    Collection,
    /// `FROM`, `INTO`, `JOIN`, `IN`
    Trigger,
    /// `CREATE`, `ALTER`, `DROP`, `TRUNCATE`
    Ddl,
    Union
}

impl Operation {
    fn classify(token: &Token<'_>) -> Option<Self> {
        if token.kind != TokenKind::Keyword {
            return None;
        }
        if token.is_any_keyword(&["SELECT", "INSERT", "DELETE"]) {
            Some(Self::Main)
        } else if token.is_any_keyword(&["WITH", "UPDATE"]) {
            Some(Self::Collection)
        } else if token.is_any_keyword(&["FROM", "INTO", "JOIN", "IN"]) {
            Some(Self::Trigger)
        } else if token.is_any_keyword(&["CREATE", "ALTER", "DROP", "TRUNCATE"]) {
            Some(Self::Ddl)
        } else if token.is_keyword("UNION") {
            Some(Self::Union)
        } else {
            None
        }
    }
}

type Parts<'a> = SmallVec<[&'a str; 8]>;

/// Summarize a token stream.
///
/// Returns an empty string when nothing worth emitting was found.
#[must_use]
pub fn summarize<'a, I>(tokens: I) -> CompactString
where
    I: IntoIterator<Item = Token<'a>>
{
    let mut tokens = tokens.into_iter().peekable();
    let mut parts = Parts::new();
    let mut state = ParserState::Default;

    while let Some(token) = tokens.next() {
        state = match Operation::classify(&token) {
            Some(operation) => apply_operation(operation, token, &mut tokens, &mut parts),
            None => match state {
                ParserState::Default => ParserState::Default,
                ParserState::ExpectCollection => collect(token, &mut tokens, &mut parts)
            }
        };
    }

    join(&parts)
}

fn apply_operation<'a, I>(
    operation: Operation,
    token: Token<'a>,
    tokens: &mut Peekable<I>,
    parts: &mut Parts<'a>
) -> ParserState
where
    I: Iterator<Item = Token<'a>>
{
    match operation {
        Operation::Main => {
            parts.push(token.text);
            ParserState::Default
        }
        Operation::Collection => {
            parts.push(token.text);
            ParserState::ExpectCollection
        }
        Operation::Trigger => ParserState::ExpectCollection,
        Operation::Ddl => {
            parts.push(token.text);
            match tokens.next_if(|next| next.is_any_keyword(OBJECT_TYPES)) {
                Some(object_type) => {
                    parts.push(object_type.text);
                    ParserState::ExpectCollection
                }
                None => ParserState::Default
            }
        }
        Operation::Union => {
            parts.push(token.text);
            if let Some(all) = tokens.next_if(|next| next.is_keyword("ALL")) {
                parts.push(all.text);
            }
            ParserState::Default
        }
    }
}

/// Handle a non-operation token while a collection name is expected.
fn collect<'a, I>(token: Token<'a>, tokens: &mut Peekable<I>, parts: &mut Parts<'a>) -> ParserState
where
    I: Iterator<Item = Token<'a>>
{
    if is_collection_name(&token) {
        parts.push(token.text);
        skip_alias(tokens);
        if tokens.next_if(|next| next.is_operator(",")).is_some() {
            ParserState::ExpectCollection
        } else {
            ParserState::Default
        }
    } else if token.kind == TokenKind::Operator {
        // `(` of a subquery or an expression in collection position
        ParserState::ExpectCollection
    } else {
        ParserState::Default
    }
}

fn is_collection_name(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::Identifier | TokenKind::QuotedIdentifier => true,
        TokenKind::Keyword => token.is_any_keyword(OBJECT_TYPES),
        TokenKind::String | TokenKind::Numeric | TokenKind::Operator => false
    }
}

/// Skip `AS alias` (two tokens) or a bare identifier alias (one token).
fn skip_alias<'a, I>(tokens: &mut Peekable<I>)
where
    I: Iterator<Item = Token<'a>>
{
    if tokens.next_if(|next| next.is_keyword("AS")).is_some() {
        tokens.next();
    } else {
        tokens.next_if(|next| next.kind == TokenKind::Identifier);
    }
}

fn join(parts: &[&str]) -> CompactString {
    let len = parts.iter().map(|p| p.len()).sum::<usize>() + parts.len().saturating_sub(1);
    let mut summary = CompactString::with_capacity(len);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            summary.push(' ');
        }
        summary.push_str(part);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn summary(sql: &str) -> CompactString {
        summarize(Lexer::new(sql))
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(summary(""), "");
        assert_eq!(summary("   -- nothing here"), "");
    }

    #[test]
    fn test_ddl_without_object_type_stays_default() {
        assert_eq!(summary("DROP users"), "DROP");
    }

    #[test]
    fn test_union_all_consumes_both_tokens() {
        assert_eq!(
            summary("SELECT a FROM t1 UNION ALL SELECT a FROM t2"),
            "SELECT t1 UNION ALL SELECT t2"
        );
        assert_eq!(summary("SELECT 1 union SELECT 2"), "SELECT union SELECT");
    }

    #[test]
    fn test_as_alias_skips_two_tokens() {
        assert_eq!(summary("SELECT * FROM users AS u, roles r"), "SELECT users roles");
    }

    #[test]
    fn test_literal_in_collection_position_is_not_emitted() {
        assert_eq!(summary("SELECT * FROM t WHERE name IN ('alice', 'bob')"), "SELECT t");
        assert_eq!(summary("SELECT * FROM t WHERE id IN (1, 2)"), "SELECT t");
    }
}
