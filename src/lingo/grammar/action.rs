//! Filter actions
//!
//! A filter hands the value of its term to an action. The value is spread into an argument
//! list according to the arity fixed at normalization time:
//!
//! - arity 0: no arguments
//! - arity 1: the whole value as the only argument, even when it is a list
//! - arity n: the elements of the value's list, positionally
//!
//! Actions are either plain handler functions or node factories that build a tagged node
//! with a declared field list.

use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

pub type HandlerFn = dyn Fn(Vec<Value>) -> Value;

#[derive(Clone)]
pub enum Action {
    /// Call a function with the spread arguments.
    Handler(Rc<HandlerFn>),
    /// Build a tagged node, one field per argument.
    Construct(NodeFactory),
}

impl Action {
    pub fn handler(f: impl Fn(Vec<Value>) -> Value + 'static) -> Self {
        Action::Handler(Rc::new(f))
    }

    pub fn construct(type_name: &str, fields: &[&str]) -> Self {
        Action::Construct(NodeFactory::new(type_name, fields))
    }

    pub fn is_constructor(&self) -> bool {
        matches!(self, Action::Construct(_))
    }

    pub fn invoke(&self, value: Value, arity: usize) -> Value {
        let args = spread(value, arity);
        match self {
            Action::Handler(f) => f(args),
            Action::Construct(factory) => factory.build(args),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Handler(_) => f.write_str("Handler(..)"),
            Action::Construct(factory) => f.debug_tuple("Construct").field(factory).finish(),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::Handler(a), Action::Handler(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            (Action::Construct(a), Action::Construct(b)) => a == b,
            _ => false,
        }
    }
}

/// Builds `{"type": type_name, fields[0]: args[0], ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFactory {
    type_name: String,
    fields: Vec<String>,
}

impl NodeFactory {
    pub fn new(type_name: &str, fields: &[&str]) -> Self {
        NodeFactory {
            type_name: type_name.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Missing arguments become `null`; surplus arguments are dropped.
    pub fn build(&self, args: Vec<Value>) -> Value {
        let mut node = Map::new();
        node.insert("type".into(), Value::String(self.type_name.clone()));
        let mut args = args.into_iter();
        for field in &self.fields {
            node.insert(field.clone(), args.next().unwrap_or(Value::Null));
        }
        Value::Object(node)
    }
}

fn spread(value: Value, arity: usize) -> Vec<Value> {
    match (arity, value) {
        (0, _) => Vec::new(),
        (1, value) => vec![value],
        (_, Value::Array(items)) => items,
        (_, value) => vec![value],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spread_by_arity() {
        assert_eq!(spread(json!([1, 2]), 0), Vec::<Value>::new());
        assert_eq!(spread(json!([1, 2]), 1), vec![json!([1, 2])]);
        assert_eq!(spread(json!([1, 2]), 2), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_construct_builds_tagged_node() {
        let action = Action::construct("BinaryExpression", &["left", "operator", "right"]);
        let node = action.invoke(json!([1, "+", 2]), 3);
        assert_eq!(
            node,
            json!({"type": "BinaryExpression", "left": 1, "operator": "+", "right": 2})
        );
    }

    #[test]
    fn test_construct_pads_missing_fields() {
        let action = Action::construct("ReturnStatement", &["argument"]);
        assert_eq!(
            action.invoke(Value::Null, 0),
            json!({"type": "ReturnStatement", "argument": null})
        );
    }

    #[test]
    fn test_handler_receives_single_argument() {
        let action = Action::handler(|args| json!(args.len()));
        assert_eq!(action.invoke(json!(["a", "b"]), 1), json!(1));
        assert_eq!(action.invoke(json!(["a", "b"]), 2), json!(2));
    }

    #[test]
    fn test_handler_equality_is_identity() {
        let a = Action::handler(|_| Value::Null);
        let b = Action::handler(|_| Value::Null);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(!a.is_constructor());
    }
}
