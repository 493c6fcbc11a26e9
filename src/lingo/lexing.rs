//! Lexing
//!
//!     Turns source text into a flat, fully materialized list of tokens. Two layers:
//!
//!     1. A logos scanner recognises the fixed lexical classes every dialect shares:
//!        whitespace, comments, numeric literals, quoted strings and words.
//!     2. The tokenizer applies the dialect's derived settings on top: words become
//!        keywords or identifiers, and anything logos does not recognise is scanned
//!        against the dialect's punctuator trie with maximal munch.
//!
//!     Tokens are either hard (seen by the grammar) or soft, the "ether" of whitespace,
//!     comments and stray characters. Soft tokens are kept so that concatenating every
//!     token's text reproduces the source exactly (see [detokenizer]).

pub mod detokenizer;
pub mod tokenizer;
pub mod tokens;
pub mod trie;

pub use detokenizer::detokenize;
pub use tokenizer::{tokenize, TokenizerSettings};
pub use tokens::{RawToken, Token};
pub use trie::Trie;
