//! Node types and the registry that maps type names to them
//!
//! A node type knows how to unparse nodes of its kind and, optionally, how to translate
//! them into something else (typically a construct of a parent dialect). Without a custom
//! translation a node is copied structurally.

use super::translate::Translator;
use super::writer::Writer;
use crate::lingo::error::Error;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub trait NodeType {
    /// The `type` string this implementation handles
    fn name(&self) -> &str;

    /// Write the node back as source text
    fn unparse(&self, node: &Map<String, Value>, writer: &mut Writer<'_>) -> Result<(), Error>;

    /// Translate the node. The translator doubles as the recursion callback for sub-parts.
    fn translate(
        &self,
        node: &Map<String, Value>,
        translator: &mut Translator<'_>,
    ) -> Result<Value, Error> {
        translator.copy_node(node)
    }
}

pub type UnparseFn = dyn Fn(&Map<String, Value>, &mut Writer<'_>) -> Result<(), Error>;
pub type TranslateFn = dyn Fn(&Map<String, Value>, &mut Translator<'_>) -> Result<Value, Error>;

/// A node type assembled from closures.
#[derive(Clone)]
pub struct NodeSpec {
    name: String,
    unparse: Rc<UnparseFn>,
    translate: Option<Rc<TranslateFn>>,
}

impl NodeSpec {
    pub fn new(
        name: &str,
        unparse: impl Fn(&Map<String, Value>, &mut Writer<'_>) -> Result<(), Error> + 'static,
    ) -> Self {
        NodeSpec {
            name: name.to_string(),
            unparse: Rc::new(unparse),
            translate: None,
        }
    }

    pub fn with_translation(
        mut self,
        translate: impl Fn(&Map<String, Value>, &mut Translator<'_>) -> Result<Value, Error> + 'static,
    ) -> Self {
        self.translate = Some(Rc::new(translate));
        self
    }
}

impl NodeType for NodeSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn unparse(&self, node: &Map<String, Value>, writer: &mut Writer<'_>) -> Result<(), Error> {
        (self.unparse)(node, writer)
    }

    fn translate(
        &self,
        node: &Map<String, Value>,
        translator: &mut Translator<'_>,
    ) -> Result<Value, Error> {
        match &self.translate {
            Some(translate) => translate(node, translator),
            None => translator.copy_node(node),
        }
    }
}

/// Registry of node types by name
#[derive(Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Rc<dyn NodeType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type, replacing any previous type of the same name.
    pub fn register<T: NodeType + 'static>(&mut self, node_type: T) {
        self.register_shared(Rc::new(node_type));
    }

    pub fn register_shared(&mut self, node_type: Rc<dyn NodeType>) {
        self.types.insert(node_type.name().to_string(), node_type);
    }

    pub fn get(&self, name: &str) -> Option<&Rc<dyn NodeType>> {
        self.types.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// All type names (sorted)
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Copy every entry of `other` in, overwriting same-named entries.
    pub fn merge(&mut self, other: &TypeRegistry) {
        for (name, node_type) in &other.types {
            self.types.insert(name.clone(), Rc::clone(node_type));
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, text: &'static str) -> NodeSpec {
        NodeSpec::new(name, move |_, w| {
            w.write(text);
            Ok(())
        })
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = TypeRegistry::new();
        registry.register(spec("Identifier", "x"));
        assert!(registry.has("Identifier"));
        assert!(registry.get("Missing").is_none());
        assert_eq!(registry.names(), vec!["Identifier"]);
    }

    #[test]
    fn test_merge_overwrites() {
        let mut first = TypeRegistry::new();
        first.register(spec("A", "first"));
        first.register(spec("B", "first"));
        let mut second = TypeRegistry::new();
        second.register(spec("A", "second"));

        first.merge(&second);
        assert_eq!(first.len(), 2);
        let a = first.get("A").unwrap();
        assert!(Rc::ptr_eq(a, second.get("A").unwrap()));
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = TypeRegistry::new();
        registry.register(spec("B", ""));
        registry.register(spec("A", ""));
        assert_eq!(format!("{registry:?}"), "{\"A\", \"B\"}");
    }
}
