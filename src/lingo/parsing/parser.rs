//! Parser entry point
//!
//! Runs a start rule over a token list. The call fails if the rule does not match, or if it
//! matches without consuming every hard token. The failure is reported at the high-water
//! mark, the furthest token any branch reached, since ordered choice discards the branch that
//! actually got closest.

use super::context::{Failure, ParseContext};
use super::stream::TokenStream;
use crate::lingo::error::{ConfigError, Error, SyntaxError};
use crate::lingo::grammar::Grammar;
use crate::lingo::lexing::Token;
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;

/// The result of a traced parse, for external visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    /// Cursor position after every ether skip, in order.
    pub log: Vec<usize>,
    pub tokens: Vec<Token>,
    pub outcome: Result<Value, SyntaxError>,
}

#[derive(Debug, Clone)]
pub struct Parser {
    grammar: Rc<Grammar>,
    max_depth: Option<usize>,
}

impl Parser {
    pub fn new(grammar: Rc<Grammar>) -> Self {
        Parser {
            grammar,
            max_depth: None,
        }
    }

    /// Bound nonterminal nesting; deeper attempts fail as mismatches.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn grammar(&self) -> &Rc<Grammar> {
        &self.grammar
    }

    pub fn parse(
        &self,
        start: &str,
        tokens: &[Token],
        origin: Option<&str>,
    ) -> Result<Value, Error> {
        let (outcome, _) = self.run(start, TokenStream::new(tokens), origin)?;
        Ok(outcome?)
    }

    /// Parse with tracing. Syntax errors are returned inside the record instead of raised.
    pub fn trace(
        &self,
        start: &str,
        tokens: &[Token],
        origin: Option<&str>,
    ) -> Result<TraceRecord, ConfigError> {
        let (outcome, log) = self.run(start, TokenStream::traced(tokens), origin)?;
        Ok(TraceRecord {
            log,
            tokens: tokens.to_vec(),
            outcome,
        })
    }

    fn run(
        &self,
        start: &str,
        stream: TokenStream<'_>,
        origin: Option<&str>,
    ) -> Result<(Result<Value, SyntaxError>, Vec<usize>), ConfigError> {
        let tokens = stream.tokens();
        let mut ctx = ParseContext::new(&self.grammar, stream).with_max_depth(self.max_depth);

        let result = match ctx.parse_nonterm(start) {
            Ok(value) if ctx.is_at_end() => Some(value),
            Ok(_) | Err(Failure::Mismatch) => None,
            Err(Failure::Config(err)) => return Err(err),
        };

        let mut stream = ctx.into_stream();
        log::trace!(
            "parsed '{start}' over {} tokens, high-water mark {}",
            tokens.len(),
            stream.high_water()
        );
        let outcome =
            result.ok_or_else(|| SyntaxError::new(origin, tokens.to_vec(), stream.high_water()));
        Ok((outcome, stream.take_trace().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::grammar::combinators::*;
    use crate::lingo::grammar::Syntax;
    use crate::lingo::lexing::{tokenize, TokenizerSettings};
    use serde_json::json;

    fn number_list_parser() -> Parser {
        let syntax = Rc::new(Syntax::new());
        syntax
            .rule("expr")
            .add_prod(plus(nonterm("atom"), Some(ignored_token("+"))));
        syntax
            .rule("atom")
            .add_prod(token("NumericLiteral"))
            .set_handler(|args| match args[0].as_str().and_then(|s| s.parse::<i64>().ok()) {
                Some(n) => json!(n),
                None => Value::Null,
            });
        Parser::new(Rc::new(Grammar::new(syntax)))
    }

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source, &TokenizerSettings::new(Vec::<String>::new(), ["+"]))
    }

    #[test]
    fn test_separated_list_is_flat() {
        let value = number_list_parser()
            .parse("expr", &lex("1 + 2 + 3"), None)
            .unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn test_leftover_tokens_fail_at_high_water_mark() {
        let tokens = lex("10 10 10");
        match number_list_parser().parse("expr", &tokens, Some("nums.txt")) {
            Err(Error::Syntax(err)) => {
                assert_eq!(err.index(), 2);
                assert_eq!(err.token_text(), "10");
                assert_eq!(err.origin(), Some("nums.txt"));
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_dangling_separator_is_not_consumed() {
        match number_list_parser().parse("expr", &lex("1 + 2 +"), None) {
            Err(Error::Syntax(err)) => assert_eq!(err.token_text(), "end of input"),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_start_rule_is_config_error() {
        let result = number_list_parser().parse("nope", &lex("1"), None);
        assert!(matches!(result, Err(Error::Config(ConfigError::UnresolvedNonterm { .. }))));
    }

    #[test]
    fn test_trace_returns_error_as_data() {
        let record = number_list_parser()
            .trace("expr", &lex("1 + x"), None)
            .unwrap();
        assert_eq!(record.tokens.len(), 5);
        assert!(!record.log.is_empty());
        let err = record.outcome.unwrap_err();
        assert_eq!(err.token_text(), "x");
    }

    #[test]
    fn test_trace_success() {
        let record = number_list_parser().trace("expr", &lex("4"), None).unwrap();
        assert_eq!(record.outcome, Ok(json!([4])));
        assert_eq!(record.log, vec![0, 1]);
    }

    #[test]
    fn test_depth_guard_stops_runaway_recursion() {
        let syntax = Rc::new(Syntax::new());
        syntax.rule("loop").add_prod(nonterm("loop"));
        let parser = Parser::new(Rc::new(Grammar::new(syntax))).with_max_depth(64);
        assert!(matches!(
            parser.parse("loop", &lex("1"), None),
            Err(Error::Syntax(_))
        ));
    }
}
