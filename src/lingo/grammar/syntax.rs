//! Syntaxes: named rule sets
//!
//!     A literal syntax holds rules authored directly against it. A composite syntax is
//!     formed by [Syntax::compose]: for every rule name in any member, the productions are
//!     concatenated in member order, the composing syntax first and then the supplied
//!     members in argument order. That order is the tie-break when several fragments add
//!     alternatives to the same nonterminal.
//!
//!     A composite computes its rule set once, on first request, and keeps it. Later
//!     changes to its members are not picked up.

use super::rule::Rule;
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub type Rules = BTreeMap<String, Rc<Rule>>;

#[derive(Debug, Default)]
pub struct Syntax {
    own: RefCell<Rules>,
    members: Vec<Rc<Syntax>>,
    composed: OnceCell<Rules>,
}

impl Syntax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_composite(&self) -> bool {
        !self.members.is_empty()
    }

    /// The rule named `name` in this syntax's own rules, created on first reference.
    pub fn rule(&self, name: &str) -> Rc<Rule> {
        self.own
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| Rc::new(Rule::new(name)))
            .clone()
    }

    /// Look up a rule without creating it.
    pub fn get_rule(&self, name: &str) -> Option<Rc<Rule>> {
        if self.is_composite() {
            self.composed().get(name).cloned()
        } else {
            self.own.borrow().get(name).cloned()
        }
    }

    /// Names of every rule, sorted.
    pub fn rule_names(&self) -> Vec<String> {
        if self.is_composite() {
            self.composed().keys().cloned().collect()
        } else {
            self.own.borrow().keys().cloned().collect()
        }
    }

    /// A composite of `self` followed by `members`.
    pub fn compose(self: &Rc<Self>, members: &[Rc<Syntax>]) -> Rc<Syntax> {
        let mut all = Vec::with_capacity(members.len() + 1);
        all.push(Rc::clone(self));
        all.extend(members.iter().cloned());
        Rc::new(Syntax {
            own: RefCell::new(Rules::new()),
            members: all,
            composed: OnceCell::new(),
        })
    }

    fn composed(&self) -> &Rules {
        self.composed.get_or_init(|| {
            let mut productions: BTreeMap<String, Vec<_>> = BTreeMap::new();
            let own = self.own.borrow();
            let own_rules = own.values();
            let member_rules = self.members.iter().flat_map(|member| {
                member
                    .rule_names()
                    .into_iter()
                    .filter_map(|name| member.get_rule(&name))
            });
            for rule in own_rules.cloned().chain(member_rules) {
                productions
                    .entry(rule.name().to_string())
                    .or_default()
                    .extend(rule.productions());
            }
            log::debug!(
                "composed {} rules from {} member syntaxes",
                productions.len(),
                self.members.len()
            );
            productions
                .into_iter()
                .map(|(name, prods)| {
                    let rule = Rc::new(Rule::with_productions(&name, prods));
                    (name, rule)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::grammar::combinators::*;

    fn production_debug(syntax: &Syntax, name: &str) -> Vec<String> {
        syntax
            .get_rule(name)
            .expect("rule")
            .productions()
            .iter()
            .map(|p| format!("{:?}", p.expression()))
            .collect()
    }

    #[test]
    fn test_rule_created_on_first_reference() {
        let syntax = Syntax::new();
        assert!(syntax.get_rule("Expr").is_none());
        let rule = syntax.rule("Expr");
        assert!(Rc::ptr_eq(&rule, &syntax.rule("Expr")));
        assert_eq!(syntax.rule_names(), vec!["Expr"]);
    }

    #[test]
    fn test_compose_concatenates_in_member_order() {
        let a = Rc::new(Syntax::new());
        a.rule("R").add_prod(punctuator("a"));
        let b = Rc::new(Syntax::new());
        b.rule("R").add_prod(punctuator("b"));
        b.rule("S").add_prod(punctuator("s"));

        let ab = a.compose(&[b.clone()]);
        assert_eq!(
            production_debug(&ab, "R"),
            vec!["punctuator(\"a\")", "punctuator(\"b\")"]
        );
        assert_eq!(ab.rule_names(), vec!["R", "S"]);

        let ba = b.compose(&[a]);
        assert_eq!(
            production_debug(&ba, "R"),
            vec!["punctuator(\"b\")", "punctuator(\"a\")"]
        );
    }

    #[test]
    fn test_composite_is_frozen_after_first_use() {
        let a = Rc::new(Syntax::new());
        a.rule("R").add_prod(punctuator("a"));
        let composite = Rc::new(Syntax::new()).compose(&[a.clone()]);
        assert_eq!(production_debug(&composite, "R").len(), 1);

        a.rule("R").add_prod(punctuator("late"));
        a.rule("T").add_prod(punctuator("t"));
        assert_eq!(production_debug(&composite, "R").len(), 1);
        assert!(composite.get_rule("T").is_none());
    }

    #[test]
    fn test_nested_composition() {
        let base = Rc::new(Syntax::new());
        base.rule("R").add_prod(punctuator("base"));
        let ext = Rc::new(Syntax::new());
        ext.rule("R").add_prod(punctuator("ext"));
        let more = Rc::new(Syntax::new());
        more.rule("R").add_prod(punctuator("more"));

        let layered = base.compose(&[ext]).compose(&[more]);
        assert_eq!(
            production_debug(&layered, "R"),
            vec!["punctuator(\"base\")", "punctuator(\"ext\")", "punctuator(\"more\")"]
        );
    }
}
