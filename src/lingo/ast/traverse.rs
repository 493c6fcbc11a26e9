//! Generic traversal of tagged values
//!
//! Arrays go to [Visitor::visit_array], primitives (strings, numbers, booleans, null) to
//! [Visitor::visit_primitive], and objects to [Visitor::visit_node] along with their
//! registered type. An object without a `type`, or with a type the registry does not know,
//! is a protocol violation.

use super::types::{NodeType, TypeRegistry};
use crate::lingo::error::{Error, ProtocolError};
use serde_json::{Map, Value};
use std::rc::Rc;

pub trait Visitor {
    type Output;

    fn visit_array(&mut self, items: &[Value], types: &TypeRegistry) -> Result<Self::Output, Error>;

    fn visit_primitive(&mut self, value: &Value) -> Result<Self::Output, Error>;

    fn visit_node(
        &mut self,
        node: &Map<String, Value>,
        node_type: &Rc<dyn NodeType>,
        types: &TypeRegistry,
    ) -> Result<Self::Output, Error>;
}

pub fn traverse<V: Visitor + ?Sized>(
    value: &Value,
    visitor: &mut V,
    types: &TypeRegistry,
) -> Result<V::Output, Error> {
    match value {
        Value::Array(items) => visitor.visit_array(items, types),
        Value::Object(node) => {
            let name = node
                .get("type")
                .and_then(Value::as_str)
                .ok_or(ProtocolError::UntypedObject)?;
            let node_type = types
                .get(name)
                .ok_or_else(|| ProtocolError::UnknownNodeType(name.to_string()))?;
            visitor.visit_node(node, node_type, types)
        }
        primitive => visitor.visit_primitive(primitive),
    }
}
