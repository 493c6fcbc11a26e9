//! Built-in dialects
//!
//!     A small C-family language, enough to exercise every part of the engine:
//!
//!     - fragment `expressions`: literals, identifiers, calls, member access, unary and
//!       binary operators by precedence level, assignment
//!     - fragment `statements`: programs, blocks, variable declarations, `if`/`else`,
//!       `while`, `return`, expression statements, with inferred statement terminators
//!     - fragment `unless`: an `unless (test) body` statement that translates itself into
//!       an `if` with a negated test
//!
//!     Dialect `base` combines the first two; dialect `sugar` extends `base` with `unless`,
//!     so translating `sugar` source yields plain `base` source.

pub mod expressions;
pub mod nodes;
pub mod statements;
pub mod sugar;
pub mod terminator;

use crate::lingo::dialects::{Dialect, Fragment, Registry};

pub const BASE: &str = "base";
pub const SUGAR: &str = "sugar";

/// Register the built-in fragments and dialects.
pub fn register_base(registry: &mut Registry) {
    registry.register_fragment(
        Fragment::new(expressions::FRAGMENT, || Some(expressions::syntax()))
            .with_types(&nodes::expression_types()),
    );
    registry.register_fragment(
        Fragment::new(statements::FRAGMENT, || Some(statements::syntax()))
            .with_types(&nodes::statement_types()),
    );
    registry.register_fragment(
        Fragment::new(sugar::FRAGMENT, || Some(sugar::syntax())).with_type(sugar::unless_type()),
    );

    registry.register_dialect(
        Dialect::new(BASE)
            .add_fragments([expressions::FRAGMENT, statements::FRAGMENT])
            .set_start("Program"),
    );
    registry.register_dialect(
        Dialect::new(SUGAR)
            .extends(BASE)
            .add_fragment(sugar::FRAGMENT)
            .set_start("Program"),
    );
}
