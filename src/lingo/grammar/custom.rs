//! Custom parse handlers
//!
//! For constructs the declarative algebra cannot express, e.g. statement terminators that
//! depend on line breaks in the ether, or literal bodies that depend on their delimiter.
//! A handler takes part in every pass an ordinary expression does: parsing, normalization,
//! and the token walk that derives a dialect's keywords and punctuators.

use super::expr::Expr;
use crate::lingo::parsing::{Outcome, ParseContext};
use std::fmt;
use std::rc::Rc;

pub trait CustomParser: fmt::Debug {
    /// Parse at the current position. On mismatch the cursor may be left anywhere;
    /// the enclosing choice or repeat rewinds it.
    fn parse(&self, ctx: &mut ParseContext<'_, '_>) -> Outcome;

    /// Visit the sub-expressions this handler delegates to.
    ///
    /// Token expressions reachable through here contribute to the dialect's keyword and
    /// punctuator sets; nonterminals are checked when the grammar is validated.
    fn for_each_child(&self, _visit: &mut dyn FnMut(&Expr)) {}

    /// A normalized copy, or `None` if the handler is already in normal form.
    fn normalize(&self) -> Option<Rc<dyn CustomParser>> {
        None
    }

    /// Number of values the handler yields, used when a filter spreads its result.
    fn arity(&self) -> usize {
        1
    }

    /// Whether a sequence keeps this handler's value.
    fn uses_value(&self) -> bool {
        true
    }
}
