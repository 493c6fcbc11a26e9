//! Error types shared by every stage
//!
//!     Errors come in three families:
//!
//!     Configuration errors: a broken dialect definition (unknown fragment or dialect,
//!     a fragment whose provider built nothing, a nonterminal naming no rule). They do
//!     not depend on the input text and abort the call.
//!
//!     Syntax errors: the input could not be consumed by the start rule. Because ordered
//!     choice backtracks, the reported position is the furthest token any explored branch
//!     reached (the high-water mark), not the position of the last failing alternative.
//!
//!     Protocol errors: a tree handed to traversal holds something that is neither an
//!     array, a primitive, nor an object whose `type` is registered in the dialect.

use crate::lingo::lexing::Token;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A dialect definition that cannot be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown fragment '{0}'")]
    UnknownFragment(String),

    #[error("unknown dialect '{0}'")]
    UnknownDialect(String),

    #[error("fragment '{0}' did not provide a syntax")]
    EmptyFragment(String),

    #[error("no rule named '{name}'")]
    UnresolvedNonterm { name: String },

    #[error("dialect '{dialect}' starts at '{rule}', which has no productions")]
    MissingStartRule { dialect: String, rule: String },

    #[error("dialect '{0}' inherits from itself")]
    CyclicDialect(String),

    #[error("settings: {0}")]
    Settings(#[from] config::ConfigError),
}

/// Input that the grammar could not consume.
///
/// Carries the whole token list so callers can render their own diagnostics around
/// `index`, the furthest token reached while parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxError {
    origin: Option<String>,
    tokens: Vec<Token>,
    index: usize,
}

impl SyntaxError {
    pub fn new(origin: Option<&str>, tokens: Vec<Token>, index: usize) -> Self {
        SyntaxError {
            origin: origin.map(str::to_string),
            tokens,
            index,
        }
    }

    /// The file name (or any caller label) the source came from.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Text of the offending token, or `end of input` when the failure is past the last token.
    pub fn token_text(&self) -> &str {
        self.tokens
            .get(self.index)
            .map(Token::text)
            .unwrap_or("end of input")
    }

    /// 1-based line of the offending token.
    pub fn line(&self) -> usize {
        let end = self.index.min(self.tokens.len());
        1 + self.tokens[..end]
            .iter()
            .map(|token| token.text().matches('\n').count())
            .sum::<usize>()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: unexpected {}",
            self.origin().unwrap_or("input"),
            self.line(),
            self.token_text()
        )
    }
}

impl std::error::Error for SyntaxError {}

/// A tree that does not follow the tagged-node protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("object without a 'type' member cannot be traversed")]
    UntypedObject,

    #[error("node type '{0}' is not registered in this dialect")]
    UnknownNodeType(String),

    #[error("node '{node}' is missing field '{field}'")]
    MissingField { node: String, field: String },

    #[error("field '{field}' of node '{node}' should be {expected}")]
    UnexpectedValue {
        node: String,
        field: String,
        expected: &'static str,
    },
}

/// Umbrella error returned by the public entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tokens() -> Vec<Token> {
        vec![
            Token::hard("Identifier", "a"),
            Token::soft("\n  "),
            Token::hard("=", "="),
            Token::soft("\n"),
            Token::hard("NumericLiteral", "10"),
        ]
    }

    #[test]
    fn test_line_counts_newlines_before_index() {
        let err = SyntaxError::new(None, sample_tokens(), 4);
        assert_eq!(err.line(), 3);
        assert_eq!(err.token_text(), "10");
    }

    #[test]
    fn test_line_at_start_is_one() {
        let err = SyntaxError::new(None, sample_tokens(), 0);
        assert_eq!(err.line(), 1);
    }

    #[test]
    fn test_past_end_reports_end_of_input() {
        let err = SyntaxError::new(Some("main.js"), sample_tokens(), 5);
        assert_eq!(err.token_text(), "end of input");
        assert_eq!(err.to_string(), "main.js:3: unexpected end of input");
    }

    #[test]
    fn test_display_without_origin() {
        let err = SyntaxError::new(None, sample_tokens(), 2);
        assert_eq!(err.to_string(), "input:2: unexpected =");
    }

    #[test]
    fn test_umbrella_is_transparent() {
        let err: Error = ConfigError::UnknownDialect("nope".into()).into();
        assert_eq!(err.to_string(), "unknown dialect 'nope'");
    }
}
