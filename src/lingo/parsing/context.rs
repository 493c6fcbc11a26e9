//! Parse context
//!
//! Everything one parse call needs: the compiled grammar, the token stream, and a
//! nonterminal depth counter. Created per call and discarded afterwards.

use super::stream::TokenStream;
use crate::lingo::error::ConfigError;
use crate::lingo::grammar::Grammar;
use crate::lingo::lexing::Token;
use serde_json::Value;

/// Why a parse attempt produced no value.
#[derive(Debug)]
pub enum Failure {
    /// The input does not match here. Choices and repeats recover from this by rewinding.
    Mismatch,
    /// The grammar itself is broken. Nothing recovers from this.
    Config(ConfigError),
}

impl From<ConfigError> for Failure {
    fn from(err: ConfigError) -> Self {
        Failure::Config(err)
    }
}

pub type Outcome = Result<Value, Failure>;

pub struct ParseContext<'g, 't> {
    grammar: &'g Grammar,
    stream: TokenStream<'t>,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'g, 't> ParseContext<'g, 't> {
    pub fn new(grammar: &'g Grammar, stream: TokenStream<'t>) -> Self {
        ParseContext {
            grammar,
            stream,
            depth: 0,
            max_depth: None,
        }
    }

    /// Fail nonterminals nested deeper than `max_depth` as mismatches.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn stream(&self) -> &TokenStream<'t> {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut TokenStream<'t> {
        &mut self.stream
    }

    pub fn into_stream(self) -> TokenStream<'t> {
        self.stream
    }

    pub fn peek(&self) -> Option<&'t Token> {
        self.stream.peek()
    }

    pub fn advance(&mut self) {
        self.stream.advance()
    }

    pub fn cursor(&self) -> usize {
        self.stream.cursor()
    }

    pub fn rewind(&mut self, mark: usize) {
        self.stream.rewind(mark)
    }

    pub fn is_at_end(&self) -> bool {
        self.stream.is_at_end()
    }

    /// Soft tokens between the previous hard token and the current one.
    pub fn ether_before_current(&self) -> &'t [Token] {
        self.stream.ether_before_cursor()
    }

    /// Consume the current token if its kind is `kind`, yielding its text.
    pub fn match_token(&mut self, kind: &str) -> Outcome {
        match self.peek() {
            Some(token) if token.kind() == Some(kind) => {
                self.advance();
                Ok(Value::String(token.text().to_string()))
            }
            _ => Err(Failure::Mismatch),
        }
    }

    /// Parse the grammar's rule `name` at the current position.
    pub fn parse_nonterm(&mut self, name: &str) -> Outcome {
        let expr = self.grammar.resolve(name)?;
        if self.max_depth.is_some_and(|max| self.depth >= max) {
            return Err(Failure::Mismatch);
        }
        self.depth += 1;
        let outcome = expr.parse(self);
        self.depth -= 1;
        outcome
    }
}
