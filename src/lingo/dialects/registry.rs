//! Registry of fragments and dialects by name

use super::dialect::Dialect;
use super::fragment::Fragment;
use crate::lingo::error::ConfigError;
use crate::lingo::settings::LingoConfig;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Registry {
    fragments: HashMap<String, Rc<Fragment>>,
    dialects: HashMap<String, Rc<Dialect>>,
    config: LingoConfig,
}

impl Registry {
    /// An empty registry with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LingoConfig) -> Self {
        Registry {
            config,
            ..Self::default()
        }
    }

    /// A registry holding the built-in `base` and `sugar` dialects.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::lingo::base::register_base(&mut registry);
        registry
    }

    pub fn config(&self) -> &LingoConfig {
        &self.config
    }

    /// Register a fragment, replacing any fragment of the same name.
    pub fn register_fragment(&mut self, fragment: Fragment) {
        log::debug!("registered fragment '{}'", fragment.name());
        self.fragments
            .insert(fragment.name().to_string(), Rc::new(fragment));
    }

    pub fn fragment(&self, name: &str) -> Result<&Rc<Fragment>, ConfigError> {
        self.fragments
            .get(name)
            .ok_or_else(|| ConfigError::UnknownFragment(name.to_string()))
    }

    pub fn has_fragment(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Register a dialect, replacing any dialect of the same name.
    pub fn register_dialect(&mut self, dialect: Dialect) {
        log::debug!(
            "registered dialect '{}' with fragments {:?}",
            dialect.name(),
            dialect.fragments()
        );
        self.dialects
            .insert(dialect.name().to_string(), Rc::new(dialect));
    }

    pub fn dialect(&self, name: &str) -> Option<&Rc<Dialect>> {
        self.dialects.get(name)
    }

    /// Like [Registry::dialect], for callers that treat an unknown name as an error.
    pub fn require_dialect(&self, name: &str) -> Result<&Rc<Dialect>, ConfigError> {
        self.dialect(name)
            .ok_or_else(|| ConfigError::UnknownDialect(name.to_string()))
    }

    /// Dialect names (sorted)
    pub fn dialect_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.dialects.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Fragment names (sorted)
    pub fn fragment_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.fragments.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::grammar::Syntax;
    use crate::lingo::settings::TypePrecedence;

    #[test]
    fn test_registry_creation() {
        let registry = Registry::new();
        assert!(registry.dialect_names().is_empty());
        assert!(registry.fragment_names().is_empty());
        assert_eq!(registry.config(), &LingoConfig::default());
    }

    #[test]
    fn test_fragment_lookup() {
        let mut registry = Registry::new();
        registry.register_fragment(Fragment::new("b", || Some(Syntax::new())));
        registry.register_fragment(Fragment::new("a", || Some(Syntax::new())));
        assert!(registry.has_fragment("a"));
        assert_eq!(registry.fragment_names(), vec!["a", "b"]);
        assert!(matches!(
            registry.fragment("c"),
            Err(ConfigError::UnknownFragment(name)) if name == "c"
        ));
    }

    #[test]
    fn test_dialect_lookup() {
        let mut registry = Registry::new();
        registry.register_dialect(Dialect::new("x"));
        assert!(registry.dialect("x").is_some());
        assert!(registry.dialect("y").is_none());
        assert!(matches!(
            registry.require_dialect("y"),
            Err(ConfigError::UnknownDialect(_))
        ));
    }

    #[test]
    fn test_with_config() {
        let mut config = LingoConfig::default();
        config.dialects.type_precedence = TypePrecedence::ChildWins;
        let registry = Registry::with_config(config);
        assert_eq!(
            registry.config().dialects.type_precedence,
            TypePrecedence::ChildWins
        );
    }

    #[test]
    fn test_with_defaults() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.dialect_names(), vec!["base", "sugar"]);
    }
}
