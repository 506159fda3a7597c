use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    QuotedIdentifier,
    String,
    Numeric,
    Operator
}

/// Minimal lexical unit borrowed from the source text.
///
/// `text` keeps the original casing; keyword recognition is the only
/// case-insensitive step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str
}

impl<'a> Token<'a> {
    pub const fn new(kind: TokenKind, text: &'a str) -> Self {
        Self {
            kind,
            text
        }
    }

    /// Keyword token whose text equals `word`, ignoring ASCII case.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(word)
    }

    /// Keyword token matching any of `words`.
    pub fn is_any_keyword(&self, words: &[&str]) -> bool {
        self.kind == TokenKind::Keyword
            && words.iter().any(|word| self.text.eq_ignore_ascii_case(word))
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// String or numeric literal.
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::String | TokenKind::Numeric)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword => write!(f, "keyword"),
            Self::Identifier => write!(f, "identifier"),
            Self::QuotedIdentifier => write!(f, "quoted_identifier"),
            Self::String => write!(f, "string"),
            Self::Numeric => write!(f, "numeric"),
            Self::Operator => write!(f, "operator")
        }
    }
}
