//! Productions and rules
//!
//! A [Rule] is the ordered list of productions for one nonterminal. Rules are shared
//! (`Rc<Rule>`) between the syntax that authored them and any grammar compiled from it, so
//! authoring goes through `&self`:
//!
//! ```ignore
//! syntax
//!     .rule("ParenthesizedExpression")
//!     .add_prod(seq([ignored_token("("), nonterm("Expression"), ignored_token(")")]))
//!     .set_constructor("ParenthesizedExpression", &["expression"]);
//! ```

use super::action::Action;
use super::combinators::{choice, filter, filter_with_arity};
use super::expr::Expr;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::cell::RefCell;

/// One alternative of a rule, optionally decorated by a filter action.
#[derive(Debug, Clone)]
pub struct Production {
    expr: Expr,
    action: Option<Action>,
    arity: Option<usize>,
}

impl Production {
    pub fn new(expr: Expr) -> Self {
        Production {
            expr,
            action: None,
            arity: None,
        }
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    /// The production's expression, wrapped in its filter if it has one.
    pub fn expression(&self) -> Expr {
        match (&self.action, self.arity) {
            (None, _) => self.expr.clone(),
            (Some(action), None) => filter(self.expr.clone(), action.clone()),
            (Some(action), Some(arity)) => {
                filter_with_arity(self.expr.clone(), action.clone(), arity)
            }
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    name: String,
    productions: RefCell<Vec<Production>>,
    compiled: OnceCell<Expr>,
}

impl Rule {
    pub fn new(name: &str) -> Self {
        Rule {
            name: name.to_string(),
            productions: RefCell::new(Vec::new()),
            compiled: OnceCell::new(),
        }
    }

    /// A rule holding the given productions, used when syntaxes are composed.
    pub fn with_productions(name: &str, productions: Vec<Production>) -> Self {
        Rule {
            name: name.to_string(),
            productions: RefCell::new(productions),
            compiled: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_prod(&self, expr: Expr) -> &Self {
        self.productions.borrow_mut().push(Production::new(expr));
        self
    }

    /// Bind `action` to the most recently added production.
    pub fn set_action(&self, action: Action) -> &Self {
        match self.productions.borrow_mut().last_mut() {
            Some(production) => production.action = Some(action),
            None => log::warn!("rule '{}' has no production to bind an action to", self.name),
        }
        self
    }

    pub fn set_handler(&self, f: impl Fn(Vec<Value>) -> Value + 'static) -> &Self {
        self.set_action(Action::handler(f))
    }

    pub fn set_constructor(&self, type_name: &str, fields: &[&str]) -> &Self {
        self.set_action(Action::construct(type_name, fields))
    }

    /// Override the arity the most recent production's action is invoked with.
    pub fn set_arity(&self, arity: usize) -> &Self {
        if let Some(production) = self.productions.borrow_mut().last_mut() {
            production.arity = Some(arity);
        }
        self
    }

    pub fn productions(&self) -> Vec<Production> {
        self.productions.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.borrow().is_empty()
    }

    /// A choice over every production's expression, built on first request and cached.
    pub fn as_expression(&self) -> Expr {
        self.compiled
            .get_or_init(|| choice(self.productions.borrow().iter().map(Production::expression)))
            .clone()
    }
}
