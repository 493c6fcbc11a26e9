//! Combinator construction API
//!
//! Free functions that build [Expr] trees. Grammars read best with a glob import:
//!
//! ```ignore
//! use lingo::lingo::grammar::combinators::*;
//!
//! syntax.rule("IfStatement").add_prod(seq([
//!     keyword("if"),
//!     ignored_token("("),
//!     nonterm("Expression"),
//!     ignored_token(")"),
//!     nonterm("Statement"),
//!     option(seq([keyword("else"), nonterm("Statement")])),
//! ]));
//! ```

use super::action::Action;
use super::custom::CustomParser;
use super::expr::{Expr, ExprKind, TokenExpr, TokenKind};
use serde_json::Value;
use std::rc::Rc;

/// Match a token class such as `Identifier`, `NumericLiteral` or `StringLiteral`.
pub fn token(class: &str) -> Expr {
    Expr::new(ExprKind::Token(TokenExpr {
        value: class.to_string(),
        kind: None,
    }))
}

/// Match a punctuator, keeping its text. Registers it with the dialect's tokenizer.
pub fn punctuator(text: &str) -> Expr {
    Expr::new(ExprKind::Token(TokenExpr {
        value: text.to_string(),
        kind: Some(TokenKind::Punctuator),
    }))
}

/// Match a punctuator and drop it.
pub fn ignored_token(text: &str) -> Expr {
    ignore(punctuator(text))
}

/// Match a keyword and drop it. Registers it with the dialect's tokenizer.
pub fn keyword(word: &str) -> Expr {
    ignore(keyword_with_value(word))
}

/// Match a keyword, keeping its text.
pub fn keyword_with_value(word: &str) -> Expr {
    Expr::new(ExprKind::Token(TokenExpr {
        value: word.to_string(),
        kind: Some(TokenKind::Keyword),
    }))
}

pub fn nonterm(name: &str) -> Expr {
    Expr::new(ExprKind::Nonterm(name.to_string()))
}

pub fn seq(terms: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::Sequence(terms.into_iter().collect()))
}

pub fn choice(terms: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::new(ExprKind::Choice(terms.into_iter().collect()))
}

/// `term`, or `null` without consuming anything.
pub fn option(term: Expr) -> Expr {
    choice([term, value(Value::Null)])
}

/// Zero or more `body`, separated by `separator` if given.
pub fn star(body: Expr, separator: Option<Expr>) -> Expr {
    Expr::new(ExprKind::Repeat {
        body,
        separator,
        allow_empty: true,
    })
}

/// One or more `body`, separated by `separator` if given.
pub fn plus(body: Expr, separator: Option<Expr>) -> Expr {
    Expr::new(ExprKind::Repeat {
        body,
        separator,
        allow_empty: false,
    })
}

pub fn ignore(term: Expr) -> Expr {
    Expr::new(ExprKind::Ignore(term))
}

/// Consume nothing and yield `value`.
pub fn value(value: Value) -> Expr {
    filter(empty(), Action::handler(move |_| value.clone()))
}

pub fn empty() -> Expr {
    Expr::new(ExprKind::Empty)
}

pub fn custom(handler: impl CustomParser + 'static) -> Expr {
    Expr::new(ExprKind::Custom(Rc::new(handler)))
}

/// Pass the value of `term` to `action`, spread by the arity computed at normalization.
pub fn filter(term: Expr, action: Action) -> Expr {
    Expr::new(ExprKind::Filter {
        term,
        action,
        arity: None,
    })
}

/// Like [filter], overriding the computed arity.
pub fn filter_with_arity(term: Expr, action: Action, arity: usize) -> Expr {
    Expr::new(ExprKind::Filter {
        term,
        action,
        arity: Some(arity),
    })
}
