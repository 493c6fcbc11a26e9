//! Expression algebra
//!
//!     An [Expr] is a cheaply clonable handle to an immutable combinator node. Every node
//!     answers four questions:
//!
//!     parse        run against a [ParseContext], yielding a value or a mismatch
//!     normalize    a canonical copy: Empty terms dropped from sequences, empty sequences
//!                  collapsed to Empty, singleton choices collapsed, filter arities fixed
//!     use_value    whether an enclosing sequence keeps this node's value (cached)
//!     arity        how many values the node yields, used to spread a filter's arguments
//!
//!     Values are JSON values. A node that yields nothing yields `null`; it only matters
//!     when `use_value` is true (an optional that matched nothing, for instance).
//!
//!     Normalization is idempotent and must happen before parsing. A Grammar only ever
//!     parses normalized expressions.

use super::action::Action;
use super::custom::CustomParser;
use crate::lingo::parsing::{Failure, Outcome, ParseContext};
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Which derived tokenizer set a token expression contributes its value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Punctuator,
}

/// Match one hard token whose kind equals `value`.
///
/// Without a kind, `value` names a token class such as `Identifier` and is not added to
/// either tokenizer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenExpr {
    pub value: String,
    pub kind: Option<TokenKind>,
}

pub enum ExprKind {
    Token(TokenExpr),
    Nonterm(String),
    Sequence(Vec<Expr>),
    Choice(Vec<Expr>),
    Repeat {
        body: Expr,
        separator: Option<Expr>,
        allow_empty: bool,
    },
    Ignore(Expr),
    Filter {
        term: Expr,
        action: Action,
        /// `None` until normalization computes it from `term`, unless set explicitly.
        arity: Option<usize>,
    },
    Custom(Rc<dyn CustomParser>),
    Empty,
}

struct Node {
    kind: ExprKind,
    use_value: OnceCell<bool>,
}

#[derive(Clone)]
pub struct Expr(Rc<Node>);

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr(Rc::new(Node {
            kind,
            use_value: OnceCell::new(),
        }))
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind(), ExprKind::Empty)
    }

    /// Whether an enclosing sequence keeps this expression's value.
    pub fn use_value(&self) -> bool {
        *self.0.use_value.get_or_init(|| self.calc_use_value())
    }

    fn calc_use_value(&self) -> bool {
        match self.kind() {
            ExprKind::Token(_)
            | ExprKind::Nonterm(_)
            | ExprKind::Repeat { .. }
            | ExprKind::Filter { .. } => true,
            ExprKind::Ignore(_) | ExprKind::Empty => false,
            ExprKind::Sequence(terms) | ExprKind::Choice(terms) => {
                terms.iter().any(Expr::use_value)
            }
            ExprKind::Custom(handler) => handler.uses_value(),
        }
    }

    /// Number of values this expression yields.
    pub fn arity(&self) -> usize {
        match self.kind() {
            ExprKind::Token(_)
            | ExprKind::Nonterm(_)
            | ExprKind::Repeat { .. }
            | ExprKind::Filter { .. } => 1,
            ExprKind::Ignore(_) | ExprKind::Empty => 0,
            ExprKind::Sequence(terms) => terms.iter().filter(|t| t.use_value()).count(),
            ExprKind::Choice(terms) => {
                let mut arities = terms.iter().map(Expr::arity);
                match arities.next() {
                    Some(first) if arities.all(|a| a == first) => first,
                    _ => 1,
                }
            }
            ExprKind::Custom(handler) => handler.arity(),
        }
    }

    /// Canonical copy of this expression.
    pub fn normalize(&self) -> Expr {
        match self.kind() {
            ExprKind::Token(_) | ExprKind::Nonterm(_) | ExprKind::Empty => self.clone(),
            ExprKind::Sequence(terms) => {
                let terms: Vec<Expr> = terms
                    .iter()
                    .map(Expr::normalize)
                    .filter(|t| !t.is_empty())
                    .collect();
                if terms.is_empty() {
                    Expr::new(ExprKind::Empty)
                } else {
                    Expr::new(ExprKind::Sequence(terms))
                }
            }
            ExprKind::Choice(terms) => {
                let mut terms: Vec<Expr> = terms.iter().map(Expr::normalize).collect();
                if terms.len() == 1 {
                    terms.swap_remove(0)
                } else {
                    Expr::new(ExprKind::Choice(terms))
                }
            }
            ExprKind::Repeat {
                body,
                separator,
                allow_empty,
            } => Expr::new(ExprKind::Repeat {
                body: body.normalize(),
                separator: separator.as_ref().map(Expr::normalize),
                allow_empty: *allow_empty,
            }),
            ExprKind::Ignore(term) => {
                let term = term.normalize();
                match term.kind() {
                    ExprKind::Empty | ExprKind::Ignore(_) => term,
                    _ => Expr::new(ExprKind::Ignore(term)),
                }
            }
            ExprKind::Filter {
                term,
                action,
                arity,
            } => {
                let term = term.normalize();
                let arity = arity.unwrap_or_else(|| term.arity());
                if let Action::Construct(factory) = action {
                    if factory.fields().len() != arity {
                        log::warn!(
                            "constructor for '{}' declares {} fields but receives {} values",
                            factory.type_name(),
                            factory.fields().len(),
                            arity
                        );
                    }
                }
                Expr::new(ExprKind::Filter {
                    term,
                    action: action.clone(),
                    arity: Some(arity),
                })
            }
            ExprKind::Custom(handler) => match handler.normalize() {
                Some(normalized) => Expr::new(ExprKind::Custom(normalized)),
                None => self.clone(),
            },
        }
    }

    /// Direct sub-expressions, including those a custom handler exposes.
    pub fn for_each_child(&self, visit: &mut dyn FnMut(&Expr)) {
        match self.kind() {
            ExprKind::Token(_) | ExprKind::Nonterm(_) | ExprKind::Empty => {}
            ExprKind::Sequence(terms) | ExprKind::Choice(terms) => terms.iter().for_each(visit),
            ExprKind::Repeat {
                body, separator, ..
            } => {
                visit(body);
                if let Some(separator) = separator {
                    visit(separator);
                }
            }
            ExprKind::Ignore(term) | ExprKind::Filter { term, .. } => visit(term),
            ExprKind::Custom(handler) => handler.for_each_child(visit),
        }
    }

    /// Pre-order walk over this expression and everything below it.
    pub fn walk(&self, visit: &mut dyn FnMut(&Expr)) {
        visit(self);
        self.for_each_child(&mut |child| child.walk(visit));
    }

    pub fn parse(&self, ctx: &mut ParseContext<'_, '_>) -> Outcome {
        match self.kind() {
            ExprKind::Token(token) => ctx.match_token(&token.value),
            ExprKind::Nonterm(name) => ctx.parse_nonterm(name),
            ExprKind::Sequence(terms) => {
                let mut kept = Vec::new();
                for term in terms {
                    let value = term.parse(ctx)?;
                    if term.use_value() {
                        kept.push(value);
                    }
                }
                Ok(match kept.len() {
                    0 => Value::Null,
                    1 => kept.swap_remove(0),
                    _ => Value::Array(kept),
                })
            }
            ExprKind::Choice(terms) => {
                for term in terms {
                    let mark = ctx.cursor();
                    match term.parse(ctx) {
                        Err(Failure::Mismatch) => ctx.rewind(mark),
                        result => return result,
                    }
                }
                Err(Failure::Mismatch)
            }
            ExprKind::Repeat {
                body,
                separator,
                allow_empty,
            } => parse_repeat(ctx, body, separator.as_ref(), *allow_empty),
            ExprKind::Ignore(term) => {
                term.parse(ctx)?;
                Ok(Value::Null)
            }
            ExprKind::Filter {
                term,
                action,
                arity,
            } => {
                let value = term.parse(ctx)?;
                let arity = arity.unwrap_or_else(|| term.arity());
                Ok(action.invoke(value, arity))
            }
            ExprKind::Custom(handler) => handler.parse(ctx),
            ExprKind::Empty => Ok(Value::Null),
        }
    }
}

fn parse_repeat(
    ctx: &mut ParseContext<'_, '_>,
    body: &Expr,
    separator: Option<&Expr>,
    allow_empty: bool,
) -> Outcome {
    let start = ctx.cursor();
    let first = match body.parse(ctx) {
        Err(Failure::Mismatch) if allow_empty => {
            ctx.rewind(start);
            return Ok(Value::Array(Vec::new()));
        }
        result => result?,
    };

    // Bodies that yield no value still count as iterations but add nothing to the list.
    let keep_body = body.use_value();
    let mut items: Vec<Value> = keep_body.then_some(first).into_iter().collect();
    loop {
        // A separator and the body after it succeed or fail together.
        let mark = ctx.cursor();
        let separator_value = match separator {
            Some(separator) => match separator.parse(ctx) {
                Ok(value) => separator.use_value().then_some(value),
                Err(Failure::Mismatch) => {
                    ctx.rewind(mark);
                    break;
                }
                Err(fatal) => return Err(fatal),
            },
            None => None,
        };
        match body.parse(ctx) {
            Ok(value) => {
                // An iteration that consumes nothing would repeat forever.
                if ctx.cursor() == mark {
                    ctx.rewind(mark);
                    break;
                }
                items.extend(separator_value);
                if keep_body {
                    items.push(value);
                }
            }
            Err(Failure::Mismatch) => {
                ctx.rewind(mark);
                break;
            }
            Err(fatal) => return Err(fatal),
        }
    }
    Ok(Value::Array(items))
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (self.kind(), other.kind()) {
            (ExprKind::Token(a), ExprKind::Token(b)) => a == b,
            (ExprKind::Nonterm(a), ExprKind::Nonterm(b)) => a == b,
            (ExprKind::Sequence(a), ExprKind::Sequence(b)) => a == b,
            (ExprKind::Choice(a), ExprKind::Choice(b)) => a == b,
            (
                ExprKind::Repeat {
                    body: b1,
                    separator: s1,
                    allow_empty: e1,
                },
                ExprKind::Repeat {
                    body: b2,
                    separator: s2,
                    allow_empty: e2,
                },
            ) => b1 == b2 && s1 == s2 && e1 == e2,
            (ExprKind::Ignore(a), ExprKind::Ignore(b)) => a == b,
            (
                ExprKind::Filter {
                    term: t1,
                    action: a1,
                    arity: n1,
                },
                ExprKind::Filter {
                    term: t2,
                    action: a2,
                    arity: n2,
                },
            ) => t1 == t2 && a1 == a2 && n1 == n2,
            (ExprKind::Custom(a), ExprKind::Custom(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            (ExprKind::Empty, ExprKind::Empty) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ExprKind::Token(token) => match token.kind {
                Some(TokenKind::Keyword) => write!(f, "keyword({:?})", token.value),
                Some(TokenKind::Punctuator) => write!(f, "punctuator({:?})", token.value),
                None => write!(f, "token({:?})", token.value),
            },
            ExprKind::Nonterm(name) => write!(f, "nonterm({name:?})"),
            ExprKind::Sequence(terms) => f.debug_tuple("seq").field(terms).finish(),
            ExprKind::Choice(terms) => f.debug_tuple("choice").field(terms).finish(),
            ExprKind::Repeat {
                body,
                separator,
                allow_empty,
            } => f
                .debug_tuple(if *allow_empty { "star" } else { "plus" })
                .field(body)
                .field(separator)
                .finish(),
            ExprKind::Ignore(term) => f.debug_tuple("ignore").field(term).finish(),
            ExprKind::Filter {
                term,
                action,
                arity,
            } => f
                .debug_tuple("filter")
                .field(term)
                .field(action)
                .field(arity)
                .finish(),
            ExprKind::Custom(handler) => f.debug_tuple("custom").field(handler).finish(),
            ExprKind::Empty => f.write_str("empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::grammar::combinators::*;
    use serde_json::json;

    #[test]
    fn test_sequence_drops_empty_terms() {
        let e = seq([empty(), punctuator("+"), empty()]).normalize();
        assert_eq!(e, seq([punctuator("+")]));
    }

    #[test]
    fn test_sequence_of_empties_collapses() {
        assert!(seq([empty(), seq([empty()])]).normalize().is_empty());
    }

    #[test]
    fn test_singleton_choice_collapses() {
        assert_eq!(choice([token("Identifier")]).normalize(), token("Identifier"));
    }

    #[test]
    fn test_filter_arity_is_fixed_at_normalization() {
        let e = filter(
            seq([token("Identifier"), ignored_token("="), token("NumericLiteral")]),
            Action::construct("Pair", &["key", "value"]),
        )
        .normalize();
        match e.kind() {
            ExprKind::Filter { arity, .. } => assert_eq!(*arity, Some(2)),
            _ => panic!("expected filter, got {e:?}"),
        }
    }

    #[test]
    fn test_explicit_arity_survives_normalization() {
        let e = filter_with_arity(seq([token("a"), token("b")]), Action::handler(|_| json!(0)), 1)
            .normalize();
        match e.kind() {
            ExprKind::Filter { arity, .. } => assert_eq!(*arity, Some(1)),
            _ => panic!("expected filter"),
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let e = choice([
            seq([empty(), keyword("if"), nonterm("x"), option(nonterm("y"))]),
            choice([seq([empty()])]),
            plus(ignore(ignore(token("Identifier"))), Some(ignored_token(","))),
        ]);
        let once = e.normalize();
        assert_eq!(once.normalize(), once);
    }

    #[test]
    fn test_use_value() {
        assert!(token("Identifier").use_value());
        assert!(!ignored_token("(").use_value());
        assert!(!keyword("if").use_value());
        assert!(keyword_with_value("if").use_value());
        assert!(!seq([ignored_token("("), ignored_token(")")]).use_value());
        assert!(seq([ignored_token("("), nonterm("e")]).use_value());
        assert!(star(ignored_token(","), None).use_value());
    }

    #[test]
    fn test_arity() {
        assert_eq!(seq([ignored_token("("), nonterm("e"), ignored_token(")")]).arity(), 1);
        assert_eq!(seq([nonterm("a"), punctuator("+"), nonterm("b")]).arity(), 3);
        assert_eq!(ignore(nonterm("a")).arity(), 0);
        assert_eq!(empty().arity(), 0);
        assert_eq!(
            choice([seq([nonterm("a"), nonterm("b")]), seq([nonterm("c"), nonterm("d")])]).arity(),
            2
        );
        assert_eq!(choice([seq([nonterm("a"), nonterm("b")]), nonterm("c")]).arity(), 1);
    }

    #[test]
    fn test_walk_visits_every_node() {
        let e = seq([keyword("var"), plus(token("Identifier"), Some(ignored_token(",")))]);
        let mut count = 0;
        e.walk(&mut |_| count += 1);
        // seq, ignore, keyword, plus, token, ignore, punctuator
        assert_eq!(count, 7);
    }
}
