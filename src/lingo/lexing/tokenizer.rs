//! Dialect-aware tokenizer
//!
//! Runs the logos scanner and classifies its output using a dialect's [TokenizerSettings]:
//!
//! - words in the keyword set become hard tokens whose kind is the word itself, any other
//!   word is an `Identifier`
//! - numbers and strings are hard tokens of their class
//! - whitespace and comments are soft tokens
//! - an unrecognised span is scanned against the punctuator trie with maximal munch; if no
//!   punctuator starts there, a single character is emitted as a soft token
//!
//! The tokenizer never fails. Every byte of the source ends up in exactly one token.

use super::tokens::{RawToken, Token, IDENTIFIER, NUMERIC_LITERAL, STRING_LITERAL};
use super::trie::Trie;
use logos::Logos;
use std::collections::BTreeSet;

/// Keyword set and punctuator trie derived from a dialect's grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerSettings {
    keywords: BTreeSet<String>,
    punctuators: BTreeSet<String>,
    trie: Trie,
}

impl TokenizerSettings {
    pub fn new<K, P>(keywords: K, punctuators: P) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let keywords: BTreeSet<String> = keywords.into_iter().map(Into::into).collect();
        let punctuators: BTreeSet<String> = punctuators.into_iter().map(Into::into).collect();
        let list: Vec<&str> = punctuators.iter().map(String::as_str).collect();
        let trie = Trie::new(list.as_slice());
        TokenizerSettings {
            keywords,
            punctuators,
            trie,
        }
    }

    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn punctuators(&self) -> &BTreeSet<String> {
        &self.punctuators
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }
}

/// Tokenize `source` into hard and soft tokens.
pub fn tokenize(source: &str, settings: &TokenizerSettings) -> Vec<Token> {
    let mut tokens = Vec::new();
    // Offset of the slice the current logos lexer runs over.
    let mut base = 0;
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let start = base + span.start;
        let end = base + span.end;

        match result {
            Ok(raw) => tokens.push(classify(raw, &source[start..end], settings)),
            Err(()) => {
                let rest = &source[start..];
                let consumed = match settings.trie.munch(rest) {
                    0 => {
                        let width = rest.chars().next().map_or(1, char::len_utf8);
                        tokens.push(Token::soft(&rest[..width]));
                        width
                    }
                    width => {
                        tokens.push(Token::literal(&rest[..width]));
                        width
                    }
                };
                // The error span and what we consumed can disagree in both directions;
                // restart logos right after the consumed text.
                if start + consumed != end {
                    base = start + consumed;
                    lexer = RawToken::lexer(&source[base..]);
                }
            }
        }
    }

    tokens
}

fn classify(raw: RawToken, text: &str, settings: &TokenizerSettings) -> Token {
    match raw {
        RawToken::Whitespace | RawToken::LineComment | RawToken::BlockComment => Token::soft(text),
        RawToken::Number => Token::hard(NUMERIC_LITERAL, text),
        RawToken::String => Token::hard(STRING_LITERAL, text),
        RawToken::Word if settings.is_keyword(text) || settings.punctuators.contains(text) => {
            Token::literal(text)
        }
        RawToken::Word => Token::hard(IDENTIFIER, text),
    }
}
