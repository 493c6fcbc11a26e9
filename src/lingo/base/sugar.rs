//! The `unless` statement
//!
//! `unless (test) body` adds an alternative to `Statement`. Translation rewrites it to
//! `if (!(test)) body`, so the node never reaches a dialect that does not define it.

use crate::lingo::ast::{field, make_node, NodeSpec};
use crate::lingo::grammar::combinators::*;
use crate::lingo::grammar::Syntax;
use serde_json::Value;

pub const FRAGMENT: &str = "unless";

pub fn syntax() -> Syntax {
    let syntax = Syntax::new();
    syntax
        .rule("Statement")
        .add_prod(nonterm("UnlessStatement"));
    syntax
        .rule("UnlessStatement")
        .add_prod(seq([
            keyword("unless"),
            ignored_token("("),
            nonterm("Expression"),
            ignored_token(")"),
            nonterm("Statement"),
        ]))
        .set_constructor("UnlessStatement", &["test", "body"]);
    syntax
}

pub fn unless_type() -> NodeSpec {
    NodeSpec::new("UnlessStatement", |node, w| {
        w.write("unless (");
        w.node(field(node, "test")?)?;
        w.write(") ");
        w.node(field(node, "body")?)
    })
    .with_translation(|node, translator| {
        let test = translator.translate(field(node, "test")?)?;
        let body = translator.translate(field(node, "body")?)?;
        let negated = make_node(
            "UnaryExpression",
            [
                ("operator", Value::from("!")),
                (
                    "argument",
                    make_node("ParenthesizedExpression", [("expression", test)]),
                ),
            ],
        );
        Ok(make_node(
            "IfStatement",
            [
                ("test", negated),
                ("consequent", body),
                ("alternate", Value::Null),
            ],
        ))
    })
}
