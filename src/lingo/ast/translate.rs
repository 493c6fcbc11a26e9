//! Translation of tagged values
//!
//! Walks a value and asks each node's type to translate it. Types without a translation of
//! their own are copied: same `type`, every other member translated recursively. Arrays are
//! translated element-wise and primitives come back unchanged.

use super::traverse::{traverse, Visitor};
use super::types::{NodeType, TypeRegistry};
use crate::lingo::error::Error;
use serde_json::{Map, Value};
use std::rc::Rc;

pub struct Translator<'a> {
    types: &'a TypeRegistry,
}

impl<'a> Translator<'a> {
    pub fn new(types: &'a TypeRegistry) -> Self {
        Translator { types }
    }

    pub fn types(&self) -> &'a TypeRegistry {
        self.types
    }

    pub fn translate(&mut self, value: &Value) -> Result<Value, Error> {
        let types = self.types;
        traverse(value, self, types)
    }

    /// Structural copy of `node` with all members but `type` translated.
    pub fn copy_node(&mut self, node: &Map<String, Value>) -> Result<Value, Error> {
        let mut copy = Map::new();
        for (name, member) in node {
            let member = if name == "type" {
                member.clone()
            } else {
                self.translate(member)?
            };
            copy.insert(name.clone(), member);
        }
        Ok(Value::Object(copy))
    }
}

impl Visitor for Translator<'_> {
    type Output = Value;

    fn visit_array(&mut self, items: &[Value], _types: &TypeRegistry) -> Result<Value, Error> {
        items
            .iter()
            .map(|item| self.translate(item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn visit_primitive(&mut self, value: &Value) -> Result<Value, Error> {
        Ok(value.clone())
    }

    fn visit_node(
        &mut self,
        node: &Map<String, Value>,
        node_type: &Rc<dyn NodeType>,
        _types: &TypeRegistry,
    ) -> Result<Value, Error> {
        node_type.translate(node, self)
    }
}
