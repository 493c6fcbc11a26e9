//! Compiled grammars
//!
//!     A Grammar is a finalized view of one [Syntax]. On first use it snapshots every
//!     rule's raw expression (a choice over the rule's productions); from then on changes
//!     to the syntax are invisible to it. Each nonterminal is normalized the first time it
//!     is resolved and cached for the grammar's lifetime.
//!
//!     Nonterminals resolve lazily, through the grammar rather than through the syntax that
//!     declared them, which is what lets rules refer to each other (and to themselves)
//!     without eager recursion. A rule whose every alternative is left-recursive will
//!     recurse without end; that is the grammar author's responsibility.

use super::expr::{Expr, ExprKind, TokenExpr};
use super::syntax::Syntax;
use crate::lingo::error::ConfigError;
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Debug)]
pub struct Grammar {
    syntax: Rc<Syntax>,
    raw: OnceCell<BTreeMap<String, Expr>>,
    resolved: RefCell<HashMap<String, Expr>>,
}

impl Grammar {
    pub fn new(syntax: Rc<Syntax>) -> Self {
        Grammar {
            syntax,
            raw: OnceCell::new(),
            resolved: RefCell::new(HashMap::new()),
        }
    }

    pub fn syntax(&self) -> &Rc<Syntax> {
        &self.syntax
    }

    /// Every rule's expression before normalization, frozen on first access.
    pub fn raw_expressions(&self) -> &BTreeMap<String, Expr> {
        self.raw.get_or_init(|| {
            self.syntax
                .rule_names()
                .into_iter()
                .filter_map(|name| {
                    let rule = self.syntax.get_rule(&name)?;
                    Some((name, rule.as_expression()))
                })
                .collect()
        })
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.raw_expressions().contains_key(name)
    }

    /// The normalized expression for `name`.
    pub fn resolve(&self, name: &str) -> Result<Expr, ConfigError> {
        if let Some(expr) = self.resolved.borrow().get(name) {
            return Ok(expr.clone());
        }
        let raw = self
            .raw_expressions()
            .get(name)
            .ok_or_else(|| ConfigError::UnresolvedNonterm {
                name: name.to_string(),
            })?;
        let normalized = raw.normalize();
        log::debug!("compiled nonterminal '{name}'");
        // The first resolution wins, so every caller sees the same expression.
        Ok(self
            .resolved
            .borrow_mut()
            .entry(name.to_string())
            .or_insert(normalized)
            .clone())
    }

    /// Visit every token expression reachable from any rule.
    pub fn for_each_token(&self, visit: &mut dyn FnMut(&TokenExpr)) {
        for expr in self.raw_expressions().values() {
            expr.walk(&mut |node| {
                if let ExprKind::Token(token) = node.kind() {
                    visit(token);
                }
            });
        }
    }

    /// Check that every referenced nonterminal names a rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for expr in self.raw_expressions().values() {
            let mut missing = None;
            expr.walk(&mut |node| {
                if let ExprKind::Nonterm(name) = node.kind() {
                    if missing.is_none() && !self.has_rule(name) {
                        missing = Some(name.clone());
                    }
                }
            });
            if let Some(name) = missing {
                return Err(ConfigError::UnresolvedNonterm { name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::grammar::combinators::*;

    fn syntax() -> Rc<Syntax> {
        let syntax = Rc::new(Syntax::new());
        syntax.rule("List").add_prod(seq([
            ignored_token("["),
            star(nonterm("Item"), Some(ignored_token(","))),
            ignored_token("]"),
        ]));
        syntax.rule("Item").add_prod(token("NumericLiteral"));
        syntax.rule("Item").add_prod(nonterm("List"));
        syntax
    }

    #[test]
    fn test_resolve_normalizes_and_caches() {
        let grammar = Grammar::new(syntax());
        let first = grammar.resolve("Item").unwrap();
        let second = grammar.resolve("Item").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, first.normalize());
    }

    #[test]
    fn test_resolve_unknown_name() {
        let grammar = Grammar::new(syntax());
        match grammar.resolve("Nope") {
            Err(ConfigError::UnresolvedNonterm { name }) => assert_eq!(name, "Nope"),
            other => panic!("expected unresolved nonterminal, got {other:?}"),
        }
    }

    #[test]
    fn test_grammar_ignores_later_syntax_changes() {
        let syntax = syntax();
        let grammar = Grammar::new(syntax.clone());
        grammar.resolve("List").unwrap();
        syntax.rule("Late").add_prod(token("Identifier"));
        assert!(!grammar.has_rule("Late"));
    }

    #[test]
    fn test_for_each_token_sees_every_token() {
        let grammar = Grammar::new(syntax());
        let mut values = Vec::new();
        grammar.for_each_token(&mut |token| values.push(token.value.clone()));
        values.sort();
        assert_eq!(values, vec![",", "NumericLiteral", "[", "]"]);
    }

    #[test]
    fn test_validate_reports_dangling_reference() {
        let syntax = syntax();
        syntax.rule("Broken").add_prod(nonterm("Missing"));
        let grammar = Grammar::new(syntax);
        match grammar.validate() {
            Err(ConfigError::UnresolvedNonterm { name }) => assert_eq!(name, "Missing"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_mutual_recursion() {
        assert!(Grammar::new(syntax()).validate().is_ok());
    }
}
