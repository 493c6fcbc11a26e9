//! Token stream cursor
//!
//! Rewinding is a pure cursor reset. The high-water mark only ever grows and is used for
//! diagnostics, never for parse decisions.

use crate::lingo::lexing::Token;

#[derive(Debug)]
pub struct TokenStream<'t> {
    tokens: &'t [Token],
    cursor: usize,
    high_water: usize,
    trace: Option<Vec<usize>>,
}

impl<'t> TokenStream<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::build(tokens, None)
    }

    /// A stream that logs the cursor after every ether skip.
    pub fn traced(tokens: &'t [Token]) -> Self {
        Self::build(tokens, Some(Vec::new()))
    }

    fn build(tokens: &'t [Token], trace: Option<Vec<usize>>) -> Self {
        let mut stream = TokenStream {
            tokens,
            cursor: 0,
            high_water: 0,
            trace,
        };
        stream.skip_ether();
        stream
    }

    fn skip_ether(&mut self) {
        while self.tokens.get(self.cursor).is_some_and(Token::is_soft) {
            self.cursor += 1;
        }
        self.high_water = self.high_water.max(self.cursor);
        if let Some(log) = &mut self.trace {
            log.push(self.cursor);
        }
    }

    /// The hard token under the cursor, `None` at end of input.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.cursor)
    }

    pub fn advance(&mut self) {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        self.skip_ether();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn rewind(&mut self, mark: usize) {
        self.cursor = mark;
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Furthest cursor position reached, across abandoned branches too.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    pub fn tokens(&self) -> &'t [Token] {
        self.tokens
    }

    /// The soft tokens between the previous hard token and the cursor.
    pub fn ether_before_cursor(&self) -> &'t [Token] {
        let end = self.cursor.min(self.tokens.len());
        let start = self.tokens[..end]
            .iter()
            .rposition(Token::is_hard)
            .map_or(0, |i| i + 1);
        &self.tokens[start..end]
    }

    pub fn take_trace(&mut self) -> Option<Vec<usize>> {
        self.trace.take()
    }
}
