//! Grammar engine
//!
//!     Grammars are data built from a small expression algebra (see [expr]):
//!
//!         Token      match one hard token by kind
//!         Nonterm    defer to a named rule, resolved lazily through the owning Grammar
//!         Sequence   all terms in order
//!         Choice     ordered alternation, first match wins, rewinding between attempts
//!         Repeat     one or more bodies (optionally zero) with an optional separator
//!         Ignore     match and drop the value
//!         Filter     match and hand the value to an [Action]
//!         Custom     anything the algebra cannot express, see [CustomParser]
//!         Empty      match nothing
//!
//!     Expressions are authored into [Rule]s (ordered productions for one name) inside a
//!     [Syntax]. Syntaxes compose by concatenating productions per name in member order.
//!     A [Grammar] freezes a syntax and normalizes each rule on first use.

pub mod action;
pub mod combinators;
pub mod compiled;
pub mod custom;
pub mod expr;
pub mod rule;
pub mod syntax;

pub use action::{Action, NodeFactory};
pub use compiled::Grammar;
pub use custom::CustomParser;
pub use expr::{Expr, ExprKind, TokenExpr, TokenKind};
pub use rule::{Production, Rule};
pub use syntax::Syntax;
