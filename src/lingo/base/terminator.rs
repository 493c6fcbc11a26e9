//! Statement terminator inference
//!
//! A statement ends at an explicit `;`, which is consumed, or without consuming anything
//! when the next token is `}`, when the input is exhausted, or when a line break sits in
//! the ether between the statement and the next token.

use crate::lingo::grammar::combinators::punctuator;
use crate::lingo::grammar::{CustomParser, Expr};
use crate::lingo::parsing::{Failure, Outcome, ParseContext};
use serde_json::Value;

#[derive(Debug)]
pub struct Terminator {
    semicolon: Expr,
    close_brace: Expr,
}

impl Terminator {
    pub fn new() -> Self {
        Terminator {
            semicolon: punctuator(";"),
            close_brace: punctuator("}"),
        }
    }
}

impl Default for Terminator {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomParser for Terminator {
    fn parse(&self, ctx: &mut ParseContext<'_, '_>) -> Outcome {
        let Some(next) = ctx.peek() else {
            return Ok(Value::Null);
        };
        if next.kind() == Some(";") {
            ctx.advance();
            return Ok(Value::Null);
        }
        let line_break = ctx
            .ether_before_current()
            .iter()
            .any(|token| token.text().contains('\n'));
        if next.kind() == Some("}") || line_break {
            Ok(Value::Null)
        } else {
            Err(Failure::Mismatch)
        }
    }

    /// Exposes `;` and `}` so the tokenizer knows them as punctuators.
    fn for_each_child(&self, visit: &mut dyn FnMut(&Expr)) {
        visit(&self.semicolon);
        visit(&self.close_brace);
    }

    fn arity(&self) -> usize {
        0
    }

    fn uses_value(&self) -> bool {
        false
    }
}
