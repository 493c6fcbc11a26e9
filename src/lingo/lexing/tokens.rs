//! Token types
//!
//!     RawToken is what the logos scanner recognises on its own, independent of any
//!     dialect. Token is what the grammar sees after the tokenizer has classified words
//!     and punctuation against a dialect's settings.
//!
//!     A hard token carries a `kind` that the grammar matches on. For keywords and
//!     punctuators the kind is the literal text itself ("if", "=="); for the open
//!     classes it is the class name ([IDENTIFIER], [NUMERIC_LITERAL], [STRING_LITERAL]).

use logos::{Lexer, Logos};
use serde::Serialize;

pub const IDENTIFIER: &str = "Identifier";
pub const NUMERIC_LITERAL: &str = "NumericLiteral";
pub const STRING_LITERAL: &str = "StringLiteral";

/// Lexical classes shared by every dialect.
///
/// Punctuation is deliberately absent: it depends on the dialect and is scanned with
/// the punctuator trie whenever logos reports an unrecognised span.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r#"'([^'\\\n]|\\(.|\n))*'"#)]
    String,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Word,
}

/// Extend a `/*` match past the closing `*/`. An unterminated comment runs to the end of
/// the input.
fn block_comment(lex: &mut Lexer<RawToken>) {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
}

impl RawToken {
    /// Whitespace and comments never reach the grammar.
    pub fn is_ether(self) -> bool {
        matches!(
            self,
            RawToken::Whitespace | RawToken::LineComment | RawToken::BlockComment
        )
    }
}

/// A classified token. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "token", rename_all = "snake_case")]
pub enum Token {
    /// Significant to the grammar.
    Hard { kind: String, text: String },
    /// Ether: whitespace, comments, unrecognised characters.
    Soft { text: String },
}

impl Token {
    pub fn hard(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Token::Hard {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// A keyword or punctuator, whose kind is its own text.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Token::Hard {
            kind: text.clone(),
            text,
        }
    }

    pub fn soft(text: impl Into<String>) -> Self {
        Token::Soft { text: text.into() }
    }

    /// Original source text of the token.
    pub fn text(&self) -> &str {
        match self {
            Token::Hard { text, .. } | Token::Soft { text } => text,
        }
    }

    /// The kind the grammar matches on; soft tokens have none.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Token::Hard { kind, .. } => Some(kind),
            Token::Soft { .. } => None,
        }
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, Token::Hard { .. })
    }

    pub fn is_soft(&self) -> bool {
        !self.is_hard()
    }
}
