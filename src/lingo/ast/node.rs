//! Helpers for building and reading tagged nodes

use crate::lingo::error::ProtocolError;
use serde_json::{Map, Value};

/// `{"type": type_name, ..fields}`
pub fn make_node<'a>(
    type_name: &str,
    fields: impl IntoIterator<Item = (&'a str, Value)>,
) -> Value {
    let mut node = Map::new();
    node.insert("type".into(), Value::String(type_name.to_string()));
    for (name, value) in fields {
        node.insert(name.to_string(), value);
    }
    Value::Object(node)
}

/// The `type` of a node, if `value` is one.
pub fn node_type(value: &Value) -> Option<&str> {
    value.as_object()?.get("type")?.as_str()
}

/// A required member of a node.
pub fn field<'n>(node: &'n Map<String, Value>, name: &str) -> Result<&'n Value, ProtocolError> {
    node.get(name).ok_or_else(|| ProtocolError::MissingField {
        node: type_of(node).to_string(),
        field: name.to_string(),
    })
}

/// A required member holding an array.
pub fn array_field<'n>(
    node: &'n Map<String, Value>,
    name: &str,
) -> Result<&'n [Value], ProtocolError> {
    field(node, name)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| unexpected(node, name, "an array"))
}

/// A required member holding a string.
pub fn str_field<'n>(node: &'n Map<String, Value>, name: &str) -> Result<&'n str, ProtocolError> {
    field(node, name)?
        .as_str()
        .ok_or_else(|| unexpected(node, name, "a string"))
}

fn unexpected(node: &Map<String, Value>, name: &str, expected: &'static str) -> ProtocolError {
    ProtocolError::UnexpectedValue {
        node: type_of(node).to_string(),
        field: name.to_string(),
        expected,
    }
}

fn type_of(node: &Map<String, Value>) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or("?")
}
