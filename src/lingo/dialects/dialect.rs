//! Dialects
//!
//!     A dialect is described with a builder and then registered:
//!
//!     ```ignore
//!     registry.register_dialect(
//!         Dialect::new("sugar")
//!             .extends("base")
//!             .add_fragment("unless")
//!             .set_start("Program"),
//!     );
//!     ```
//!
//!     Registration hands the dialect to the registry behind an `Rc`, after which its
//!     fragment list cannot change. Derived data is computed on first use:
//!
//!     - syntax: the parent's composed syntax (or an empty one) composed with the syntaxes
//!       of the dialect's own fragments. Parent fragments are already folded into the
//!       parent's syntax and are not added again.
//!     - grammar: the syntax compiled and validated, including the start rule.
//!     - node types: own fragments' types in order, and the parent's types. Which side wins
//!       a name clash is set by [TypePrecedence].
//!     - tokenizer settings: every keyword and punctuator token expression in the raw
//!       grammar, bucketed by kind.

use super::registry::Registry;
use crate::lingo::ast::{Translator, TypeRegistry, Writer};
use crate::lingo::error::{ConfigError, Error};
use crate::lingo::grammar::{Grammar, Syntax, TokenKind};
use crate::lingo::lexing::{tokenize, Token, TokenizerSettings};
use crate::lingo::parsing::{Parser, TraceRecord};
use crate::lingo::settings::TypePrecedence;
use once_cell::unsync::OnceCell;
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;

pub const DEFAULT_START: &str = "Program";

#[derive(Debug)]
pub struct Dialect {
    name: String,
    parent: Option<String>,
    fragments: Vec<String>,
    start: String,
    type_precedence: Option<TypePrecedence>,
    max_depth: Option<usize>,
    // Set while the syntax is being composed, to catch inheritance cycles.
    composing: Cell<bool>,
    syntax: OnceCell<Rc<Syntax>>,
    grammar: OnceCell<Rc<Grammar>>,
    types: OnceCell<TypeRegistry>,
    tokenizer: OnceCell<TokenizerSettings>,
}

impl Dialect {
    pub fn new(name: &str) -> Self {
        Dialect {
            name: name.to_string(),
            parent: None,
            fragments: Vec::new(),
            start: DEFAULT_START.to_string(),
            type_precedence: None,
            max_depth: None,
            composing: Cell::new(false),
            syntax: OnceCell::new(),
            grammar: OnceCell::new(),
            types: OnceCell::new(),
            tokenizer: OnceCell::new(),
        }
    }

    pub fn extends(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn add_fragment(mut self, name: &str) -> Self {
        self.fragments.push(name.to_string());
        self
    }

    pub fn add_fragments<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.fragments.extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn set_start(mut self, rule: &str) -> Self {
        self.start = rule.to_string();
        self
    }

    /// Override the registry-wide type precedence for this dialect.
    pub fn with_type_precedence(mut self, precedence: TypePrecedence) -> Self {
        self.type_precedence = Some(precedence);
        self
    }

    /// Bound nonterminal nesting while parsing with this dialect.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn syntax(&self, registry: &Registry) -> Result<Rc<Syntax>, ConfigError> {
        if let Some(syntax) = self.syntax.get() {
            return Ok(Rc::clone(syntax));
        }
        if self.composing.replace(true) {
            return Err(ConfigError::CyclicDialect(self.name.clone()));
        }
        let composed = self.compose_syntax(registry);
        self.composing.set(false);
        let composed = composed?;
        Ok(Rc::clone(self.syntax.get_or_init(|| composed)))
    }

    fn compose_syntax(&self, registry: &Registry) -> Result<Rc<Syntax>, ConfigError> {
        let base = match &self.parent {
            Some(parent) => registry.require_dialect(parent)?.syntax(registry)?,
            None => Rc::new(Syntax::new()),
        };
        let members = self
            .fragments
            .iter()
            .map(|name| registry.fragment(name)?.syntax())
            .collect::<Result<Vec<_>, _>>()?;
        let syntax = base.compose(&members);
        log::debug!(
            "dialect '{}' composed {} rules from {} fragments",
            self.name,
            syntax.rule_names().len(),
            members.len()
        );
        Ok(syntax)
    }

    /// The compiled grammar, validated on first request.
    pub fn grammar(&self, registry: &Registry) -> Result<Rc<Grammar>, ConfigError> {
        self.grammar
            .get_or_try_init(|| {
                let syntax = self.syntax(registry)?;
                let has_start = syntax
                    .get_rule(&self.start)
                    .is_some_and(|rule| !rule.is_empty());
                if !has_start {
                    return Err(ConfigError::MissingStartRule {
                        dialect: self.name.clone(),
                        rule: self.start.clone(),
                    });
                }
                let grammar = Grammar::new(syntax);
                grammar.validate()?;
                log::debug!("dialect '{}' grammar validated", self.name);
                Ok(Rc::new(grammar))
            })
            .cloned()
    }

    /// Node types from the dialect's fragments and its ancestors.
    pub fn types(&self, registry: &Registry) -> Result<&TypeRegistry, ConfigError> {
        self.types.get_or_try_init(|| {
            // Composing first rejects unknown names and inheritance cycles.
            self.syntax(registry)?;
            let mut own = TypeRegistry::new();
            for name in &self.fragments {
                own.merge(registry.fragment(name)?.types());
            }
            let parent = match &self.parent {
                Some(parent) => Some(registry.require_dialect(parent)?.types(registry)?),
                None => None,
            };
            let precedence = self
                .type_precedence
                .unwrap_or(registry.config().dialects.type_precedence);

            let mut merged = TypeRegistry::new();
            match (precedence, parent) {
                (_, None) => merged.merge(&own),
                (TypePrecedence::ParentWins, Some(parent)) => {
                    merged.merge(&own);
                    merged.merge(parent);
                }
                (TypePrecedence::ChildWins, Some(parent)) => {
                    merged.merge(parent);
                    merged.merge(&own);
                }
            }
            log::debug!(
                "dialect '{}' has {} node types ({precedence:?})",
                self.name,
                merged.len()
            );
            Ok(merged)
        })
    }

    /// Keywords and punctuators used anywhere in the dialect's grammar.
    pub fn tokenizer_settings(&self, registry: &Registry) -> Result<&TokenizerSettings, ConfigError> {
        self.tokenizer.get_or_try_init(|| {
            let grammar = self.grammar(registry)?;
            let mut keywords = Vec::new();
            let mut punctuators = Vec::new();
            grammar.for_each_token(&mut |token| match token.kind {
                Some(TokenKind::Keyword) => keywords.push(token.value.clone()),
                Some(TokenKind::Punctuator) => punctuators.push(token.value.clone()),
                None => {}
            });
            let settings = TokenizerSettings::new(keywords, punctuators);
            log::debug!(
                "dialect '{}' uses {} keywords and {} punctuators",
                self.name,
                settings.keywords().len(),
                settings.punctuators().len()
            );
            Ok(settings)
        })
    }

    pub fn tokenize(&self, registry: &Registry, source: &str) -> Result<Vec<Token>, ConfigError> {
        Ok(tokenize(source, self.tokenizer_settings(registry)?))
    }

    pub fn parser(&self, registry: &Registry) -> Result<Parser, ConfigError> {
        let parser = Parser::new(self.grammar(registry)?);
        Ok(match self.max_depth {
            Some(max_depth) => parser.with_max_depth(max_depth),
            None => parser,
        })
    }

    /// Tokenize and parse `source` from the start rule.
    pub fn parse_source(
        &self,
        registry: &Registry,
        source: &str,
        origin: Option<&str>,
    ) -> Result<Value, Error> {
        let tokens = self.tokenize(registry, source)?;
        self.parser(registry)?.parse(&self.start, &tokens, origin)
    }

    /// Like [Dialect::parse_source], but syntax errors come back inside the record.
    pub fn trace_source(
        &self,
        registry: &Registry,
        source: &str,
        origin: Option<&str>,
    ) -> Result<TraceRecord, ConfigError> {
        let tokens = self.tokenize(registry, source)?;
        self.parser(registry)?.trace(&self.start, &tokens, origin)
    }

    /// Apply every node type's translation to `tree`.
    pub fn translate_tree(&self, registry: &Registry, tree: &Value) -> Result<Value, Error> {
        Translator::new(self.types(registry)?).translate(tree)
    }

    /// Write `tree` back out as source text.
    pub fn unparse(&self, registry: &Registry, tree: &Value) -> Result<String, Error> {
        let mut writer = Writer::new(self.types(registry)?, &registry.config().writer.indent_unit);
        writer.node(tree)?;
        Ok(writer.finish())
    }

    /// Like [Dialect::translate], but a syntax error comes back inside the record. On
    /// success the record's outcome holds the translated source text.
    pub fn trace_translate(
        &self,
        registry: &Registry,
        source: &str,
        origin: Option<&str>,
    ) -> Result<TraceRecord, Error> {
        let mut record = self.trace_source(registry, source, origin)?;
        if let Ok(tree) = &record.outcome {
            let translated = self.translate_tree(registry, tree)?;
            record.outcome = Ok(Value::String(self.unparse(registry, &translated)?));
        }
        Ok(record)
    }

    /// Parse, translate and unparse `source`.
    pub fn translate(
        &self,
        registry: &Registry,
        source: &str,
        origin: Option<&str>,
    ) -> Result<String, Error> {
        let tree = self.parse_source(registry, source, origin)?;
        let translated = self.translate_tree(registry, &tree)?;
        self.unparse(registry, &translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::ast::{field, NodeSpec};
    use crate::lingo::dialects::Fragment;
    use crate::lingo::grammar::combinators::*;
    use crate::lingo::settings::LingoConfig;
    use serde_json::json;

    fn name_type(label: &'static str) -> NodeSpec {
        NodeSpec::new("Name", move |node, w| {
            w.write(label);
            w.node(field(node, "name")?)
        })
    }

    fn names_fragment() -> Fragment {
        Fragment::new("names", || {
            let syntax = Syntax::new();
            syntax
                .rule("Program")
                .add_prod(star(nonterm("Name"), Some(ignored_token(","))));
            syntax
                .rule("Name")
                .add_prod(token("Identifier"))
                .set_constructor("Name", &["name"]);
            Some(syntax)
        })
        .with_type(name_type("parent:"))
    }

    fn numbers_fragment() -> Fragment {
        Fragment::new("numbers", || {
            let syntax = Syntax::new();
            syntax
                .rule("Name")
                .add_prod(seq([keyword("num"), token("NumericLiteral")]))
                .set_constructor("Name", &["name"]);
            Some(syntax)
        })
        .with_type(name_type("child:"))
    }

    fn registry(config: LingoConfig) -> Registry {
        let mut registry = Registry::with_config(config);
        registry.register_fragment(names_fragment());
        registry.register_fragment(numbers_fragment());
        registry.register_dialect(Dialect::new("names").add_fragment("names"));
        registry.register_dialect(
            Dialect::new("numbers")
                .extends("names")
                .add_fragment("numbers"),
        );
        registry
    }

    #[test]
    fn test_child_extends_parent_grammar() {
        let registry = registry(LingoConfig::default());
        let dialect = registry.dialect("numbers").unwrap();
        let tree = dialect.parse_source(&registry, "a, num 3", None).unwrap();
        assert_eq!(
            tree,
            json!([
                {"type": "Name", "name": "a"},
                {"type": "Name", "name": "3"},
            ])
        );
    }

    #[test]
    fn test_parent_does_not_see_child_fragments() {
        let registry = registry(LingoConfig::default());
        let dialect = registry.dialect("names").unwrap();
        assert!(dialect.parse_source(&registry, "num 3", None).is_err());
        assert!(!dialect
            .tokenizer_settings(&registry)
            .unwrap()
            .is_keyword("num"));
    }

    #[test]
    fn test_tokenizer_settings_bucket_by_kind() {
        let registry = registry(LingoConfig::default());
        let settings = registry
            .dialect("numbers")
            .unwrap()
            .tokenizer_settings(&registry)
            .unwrap();
        assert!(settings.is_keyword("num"));
        assert!(settings.punctuators().contains(","));
        assert!(!settings.keywords().contains("Identifier"));
    }

    #[test]
    fn test_parent_types_win_by_default() {
        let registry = registry(LingoConfig::default());
        let dialect = registry.dialect("numbers").unwrap();
        let out = dialect
            .unparse(&registry, &json!({"type": "Name", "name": "x"}))
            .unwrap();
        assert_eq!(out, "parent:x");
    }

    #[test]
    fn test_child_types_win_when_configured() {
        let mut config = LingoConfig::default();
        config.dialects.type_precedence = TypePrecedence::ChildWins;
        let registry = registry(config);
        let dialect = registry.dialect("numbers").unwrap();
        let out = dialect
            .unparse(&registry, &json!({"type": "Name", "name": "x"}))
            .unwrap();
        assert_eq!(out, "child:x");
    }

    #[test]
    fn test_per_dialect_precedence_override() {
        let mut registry = registry(LingoConfig::default());
        registry.register_dialect(
            Dialect::new("numbers-first")
                .extends("names")
                .add_fragment("numbers")
                .with_type_precedence(TypePrecedence::ChildWins),
        );
        let dialect = registry.dialect("numbers-first").unwrap();
        let out = dialect
            .unparse(&registry, &json!({"type": "Name", "name": "x"}))
            .unwrap();
        assert_eq!(out, "child:x");
    }

    #[test]
    fn test_syntax_is_cached() {
        let registry = registry(LingoConfig::default());
        let dialect = registry.dialect("numbers").unwrap();
        let first = dialect.syntax(&registry).unwrap();
        let second = dialect.syntax(&registry).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unknown_fragment() {
        let mut registry = registry(LingoConfig::default());
        registry.register_dialect(Dialect::new("broken").add_fragment("missing"));
        let result = registry.dialect("broken").unwrap().grammar(&registry);
        assert!(matches!(result, Err(ConfigError::UnknownFragment(name)) if name == "missing"));
    }

    #[test]
    fn test_unknown_parent() {
        let mut registry = registry(LingoConfig::default());
        registry.register_dialect(Dialect::new("orphan").extends("nobody"));
        let result = registry.dialect("orphan").unwrap().syntax(&registry);
        assert!(matches!(result, Err(ConfigError::UnknownDialect(name)) if name == "nobody"));
    }

    #[test]
    fn test_missing_start_rule() {
        let mut registry = registry(LingoConfig::default());
        registry.register_dialect(
            Dialect::new("headless")
                .add_fragment("names")
                .set_start("Module"),
        );
        let result = registry.dialect("headless").unwrap().grammar(&registry);
        assert!(matches!(
            result,
            Err(ConfigError::MissingStartRule { rule, .. }) if rule == "Module"
        ));
    }

    #[test]
    fn test_inheritance_cycle() {
        let mut registry = registry(LingoConfig::default());
        registry.register_dialect(Dialect::new("ping").extends("pong"));
        registry.register_dialect(Dialect::new("pong").extends("ping"));
        let result = registry.dialect("ping").unwrap().syntax(&registry);
        assert!(matches!(result, Err(ConfigError::CyclicDialect(_))));
    }

    #[test]
    fn test_trace_source() {
        let registry = registry(LingoConfig::default());
        let record = registry
            .dialect("names")
            .unwrap()
            .trace_source(&registry, "a, 7", Some("t"))
            .unwrap();
        let err = record.outcome.unwrap_err();
        assert_eq!(err.token_text(), "7");
        assert_eq!(err.origin(), Some("t"));
    }
}
