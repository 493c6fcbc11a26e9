//! Unparsing writer
//!
//! Accumulates source text while dispatching nodes to their registered unparse routines.
//!
//! Line breaks are deferred: [Writer::newline] only schedules one, and the next
//! [Writer::write] emits a single newline followed by the indentation of the current level.
//! Scheduling twice in a row still yields one break, and indentation changes made between
//! the schedule and the next write apply to the line that follows.

use super::traverse::{traverse, Visitor};
use super::types::{NodeType, TypeRegistry};
use crate::lingo::error::Error;
use serde_json::{Map, Value};
use std::rc::Rc;

pub const DEFAULT_INDENT_UNIT: &str = "    ";

pub struct Writer<'a> {
    types: &'a TypeRegistry,
    out: String,
    indent_unit: String,
    level: usize,
    pending_newline: bool,
}

impl<'a> Writer<'a> {
    pub fn new(types: &'a TypeRegistry, indent_unit: &str) -> Self {
        Writer {
            types,
            out: String::new(),
            indent_unit: indent_unit.to_string(),
            level: 0,
            pending_newline: false,
        }
    }

    pub fn write(&mut self, text: &str) {
        if self.pending_newline {
            self.pending_newline = false;
            self.out.push('\n');
            for _ in 0..self.level {
                self.out.push_str(&self.indent_unit);
            }
        }
        self.out.push_str(text);
    }

    pub fn newline(&mut self) {
        self.pending_newline = true;
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn deindent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Unparse any value: a node, an array of values, or a primitive.
    pub fn node(&mut self, value: &Value) -> Result<(), Error> {
        let types = self.types;
        traverse(value, self, types)
    }

    /// Unparse `items` with `separator` written between consecutive ones.
    pub fn nodes(&mut self, items: &[Value], separator: &str) -> Result<(), Error> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.node(item)?;
        }
        Ok(())
    }

    /// Unparse `items` one per line.
    pub fn lines(&mut self, items: &[Value]) -> Result<(), Error> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.newline();
            }
            self.node(item)?;
        }
        Ok(())
    }

    pub fn finish(self) -> String {
        self.out
    }
}

impl Visitor for Writer<'_> {
    type Output = ();

    fn visit_array(&mut self, items: &[Value], _types: &TypeRegistry) -> Result<(), Error> {
        self.nodes(items, "")
    }

    fn visit_primitive(&mut self, value: &Value) -> Result<(), Error> {
        match value {
            Value::Null => {}
            Value::String(text) => self.write(text),
            other => self.write(&other.to_string()),
        }
        Ok(())
    }

    fn visit_node(
        &mut self,
        node: &Map<String, Value>,
        node_type: &Rc<dyn NodeType>,
        _types: &TypeRegistry,
    ) -> Result<(), Error> {
        node_type.unparse(node, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lingo::ast::{field, NodeSpec};
    use serde_json::json;

    fn types() -> TypeRegistry {
        let mut types = TypeRegistry::new();
        types.register(NodeSpec::new("Name", |node, w| w.node(field(node, "name")?)));
        types.register(NodeSpec::new("Block", |node, w| {
            w.write("{");
            w.indent();
            if let Some(body) = field(node, "body")?.as_array() {
                for statement in body {
                    w.newline();
                    w.node(statement)?;
                }
            }
            w.deindent();
            w.newline();
            w.write("}");
            Ok(())
        }));
        types
    }

    #[test]
    fn test_deferred_newlines_collapse() {
        let types = TypeRegistry::new();
        let mut w = Writer::new(&types, "  ");
        w.write("a");
        w.newline();
        w.newline();
        w.indent();
        w.write("b");
        w.deindent();
        w.newline();
        w.write("c");
        assert_eq!(w.finish(), "a\n  b\nc");
    }

    #[test]
    fn test_primitives() {
        let types = TypeRegistry::new();
        let mut w = Writer::new(&types, DEFAULT_INDENT_UNIT);
        w.nodes(&[json!("x"), json!(1.5), json!(null), json!(true)], " ")
            .unwrap();
        assert_eq!(w.finish(), "x 1.5  true");
    }

    #[test]
    fn test_nested_blocks() {
        let types = types();
        let tree = json!({"type": "Block", "body": [
            {"type": "Name", "name": "a"},
            {"type": "Block", "body": [{"type": "Name", "name": "b"}]},
        ]});
        let mut w = Writer::new(&types, DEFAULT_INDENT_UNIT);
        w.node(&tree).unwrap();
        insta::assert_snapshot!(w.finish(), @r"
        {
            a
            {
                b
            }
        }
        ");
    }

    #[test]
    fn test_lines() {
        let types = types();
        let mut w = Writer::new(&types, DEFAULT_INDENT_UNIT);
        w.lines(&[
            json!({"type": "Name", "name": "a"}),
            json!({"type": "Name", "name": "b"}),
        ])
        .unwrap();
        assert_eq!(w.finish(), "a\nb");
    }
}
