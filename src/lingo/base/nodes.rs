//! Node types of the base dialect and how they unparse

use crate::lingo::ast::{array_field, field, str_field, NodeSpec, TypeRegistry, Writer};
use crate::lingo::error::Error;
use serde_json::{Map, Value};

type Node = Map<String, Value>;

pub fn expression_types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types.register(NodeSpec::new("NumericLiteral", |node, w| {
        w.write(str_field(node, "raw")?);
        Ok(())
    }));
    types.register(NodeSpec::new("StringLiteral", |node, w| {
        w.write(str_field(node, "raw")?);
        Ok(())
    }));
    types.register(NodeSpec::new("BooleanLiteral", |node, w| {
        w.node(field(node, "value")?)
    }));
    types.register(NodeSpec::new("NullLiteral", |_, w| {
        w.write("null");
        Ok(())
    }));
    types.register(NodeSpec::new("Identifier", |node, w| {
        w.write(str_field(node, "name")?);
        Ok(())
    }));
    types.register(NodeSpec::new("ParenthesizedExpression", |node, w| {
        w.write("(");
        w.node(field(node, "expression")?)?;
        w.write(")");
        Ok(())
    }));
    types.register(NodeSpec::new("CallExpression", |node, w| {
        w.node(field(node, "callee")?)?;
        w.write("(");
        w.nodes(array_field(node, "arguments")?, ", ")?;
        w.write(")");
        Ok(())
    }));
    types.register(NodeSpec::new("MemberExpression", |node, w| {
        w.node(field(node, "object")?)?;
        if field(node, "computed")?.as_bool() == Some(true) {
            w.write("[");
            w.node(field(node, "property")?)?;
            w.write("]");
        } else {
            w.write(".");
            w.node(field(node, "property")?)?;
        }
        Ok(())
    }));
    types.register(NodeSpec::new("UnaryExpression", |node, w| {
        w.write(str_field(node, "operator")?);
        w.node(field(node, "argument")?)
    }));
    types.register(NodeSpec::new("BinaryExpression", infix("left", "right")));
    types.register(NodeSpec::new("LogicalExpression", infix("left", "right")));
    types.register(NodeSpec::new("AssignmentExpression", infix("left", "right")));
    types
}

pub fn statement_types() -> TypeRegistry {
    let mut types = TypeRegistry::new();
    types.register(NodeSpec::new("Program", |node, w| {
        w.lines(array_field(node, "body")?)
    }));
    types.register(NodeSpec::new("BlockStatement", |node, w| {
        block(array_field(node, "body")?, w)
    }));
    types.register(NodeSpec::new("VariableDeclaration", |node, w| {
        w.write(str_field(node, "kind")?);
        w.write(" ");
        w.nodes(array_field(node, "declarations")?, ", ")?;
        w.write(";");
        Ok(())
    }));
    types.register(NodeSpec::new("VariableDeclarator", |node, w| {
        w.node(field(node, "id")?)?;
        let init = field(node, "init")?;
        if !init.is_null() {
            w.write(" = ");
            w.node(init)?;
        }
        Ok(())
    }));
    types.register(NodeSpec::new("IfStatement", |node, w| {
        w.write("if (");
        w.node(field(node, "test")?)?;
        w.write(") ");
        w.node(field(node, "consequent")?)?;
        let alternate = field(node, "alternate")?;
        if !alternate.is_null() {
            w.write(" else ");
            w.node(alternate)?;
        }
        Ok(())
    }));
    types.register(NodeSpec::new("WhileStatement", |node, w| {
        w.write("while (");
        w.node(field(node, "test")?)?;
        w.write(") ");
        w.node(field(node, "body")?)
    }));
    types.register(NodeSpec::new("ReturnStatement", |node, w| {
        w.write("return");
        let argument = field(node, "argument")?;
        if !argument.is_null() {
            w.write(" ");
            w.node(argument)?;
        }
        w.write(";");
        Ok(())
    }));
    types.register(NodeSpec::new("EmptyStatement", |_, w| {
        w.write(";");
        Ok(())
    }));
    types.register(NodeSpec::new("ExpressionStatement", |node, w| {
        w.node(field(node, "expression")?)?;
        w.write(";");
        Ok(())
    }));
    types
}

/// `left op right`, spaced.
fn infix(
    left: &'static str,
    right: &'static str,
) -> impl Fn(&Node, &mut Writer<'_>) -> Result<(), Error> {
    move |node, w| {
        w.node(field(node, left)?)?;
        w.write(" ");
        w.write(str_field(node, "operator")?);
        w.write(" ");
        w.node(field(node, right)?)
    }
}

/// Braced statements, one per line, indented. An empty block stays on one line.
pub fn block(body: &[Value], w: &mut Writer<'_>) -> Result<(), Error> {
    if body.is_empty() {
        w.write("{}");
        return Ok(());
    }
    w.write("{");
    w.indent();
    for statement in body {
        w.newline();
        w.node(statement)?;
    }
    w.deindent();
    w.newline();
    w.write("}");
    Ok(())
}
