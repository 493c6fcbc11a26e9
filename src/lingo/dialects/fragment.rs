//! Fragments: lazily built syntaxes with their node types

use crate::lingo::ast::{NodeType, TypeRegistry};
use crate::lingo::error::ConfigError;
use crate::lingo::grammar::Syntax;
use once_cell::unsync::OnceCell;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

pub type SyntaxProvider = Box<dyn FnOnce() -> Option<Syntax>>;

pub struct Fragment {
    name: String,
    provider: Cell<Option<SyntaxProvider>>,
    built: OnceCell<Option<Rc<Syntax>>>,
    types: TypeRegistry,
}

impl Fragment {
    /// A fragment whose syntax is built by `provider` the first time it is needed.
    pub fn new(name: &str, provider: impl FnOnce() -> Option<Syntax> + 'static) -> Self {
        Fragment {
            name: name.to_string(),
            provider: Cell::new(Some(Box::new(provider))),
            built: OnceCell::new(),
            types: TypeRegistry::new(),
        }
    }

    /// Register a node type constructed by this fragment's productions.
    pub fn with_type<T: NodeType + 'static>(mut self, node_type: T) -> Self {
        self.types.register(node_type);
        self
    }

    pub fn with_types(mut self, types: &TypeRegistry) -> Self {
        self.types.merge(types);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// The fragment's syntax. The provider runs at most once, even if it yields nothing.
    pub fn syntax(&self) -> Result<Rc<Syntax>, ConfigError> {
        self.built
            .get_or_init(|| {
                let syntax = self.provider.take().and_then(|provider| provider());
                match &syntax {
                    Some(syntax) => log::debug!(
                        "fragment '{}' built {} rules",
                        self.name,
                        syntax.rule_names().len()
                    ),
                    None => log::debug!("fragment '{}' provided no syntax", self.name),
                }
                syntax.map(Rc::new)
            })
            .clone()
            .ok_or_else(|| ConfigError::EmptyFragment(self.name.clone()))
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("name", &self.name)
            .field("built", &self.built.get().is_some())
            .field("types", &self.types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::ast::NodeSpec;
    use crate::lingo::grammar::combinators::*;

    #[test]
    fn test_provider_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let fragment = Fragment::new("numbers", move || {
            counter.set(counter.get() + 1);
            let syntax = Syntax::new();
            syntax.rule("Number").add_prod(token("NumericLiteral"));
            Some(syntax)
        });

        let first = fragment.syntax().unwrap();
        let second = fragment.syntax().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
        assert_eq!(first.rule_names(), vec!["Number"]);
    }

    #[test]
    fn test_empty_provider_is_config_error() {
        let fragment = Fragment::new("nothing", || None);
        match fragment.syntax() {
            Err(ConfigError::EmptyFragment(name)) => assert_eq!(name, "nothing"),
            other => panic!("expected empty fragment error, got {other:?}"),
        }
        // Still an error the second time, without re-running the provider.
        assert!(fragment.syntax().is_err());
    }

    #[test]
    fn test_types() {
        let fragment = Fragment::new("ids", || Some(Syntax::new()))
            .with_type(NodeSpec::new("Identifier", |_, _| Ok(())));
        assert!(fragment.types().has("Identifier"));
        assert_eq!(fragment.name(), "ids");
    }
}
