//! Expression grammar
//!
//! Precedence, loosest first:
//!
//! | rule                      | operators                 |
//! |---------------------------|---------------------------|
//! | AssignmentExpression      | `=` `+=` `-=` (right)     |
//! | LogicalOrExpression       | `\|\|`                    |
//! | LogicalAndExpression      | `&&`                      |
//! | EqualityExpression        | `==` `!=` `===` `!==`     |
//! | RelationalExpression      | `<` `>` `<=` `>=`         |
//! | AdditiveExpression        | `+` `-`                   |
//! | MultiplicativeExpression  | `*` `/` `%`               |
//! | UnaryExpression           | `!` `-` (prefix)          |
//! | PostfixExpression         | calls, `.name`, `[expr]`  |
//!
//! Binary levels parse as an operand followed by any number of `operator operand` pairs
//! and fold the pairs to the left.

use crate::lingo::ast::make_node;
use crate::lingo::grammar::combinators::*;
use crate::lingo::grammar::Syntax;
use serde_json::{Number, Value};

pub const FRAGMENT: &str = "expressions";

const BINARY_LEVELS: &[(&str, &str, &[&str], &str)] = &[
    (
        "LogicalOrExpression",
        "LogicalAndExpression",
        &["||"],
        "LogicalExpression",
    ),
    (
        "LogicalAndExpression",
        "EqualityExpression",
        &["&&"],
        "LogicalExpression",
    ),
    (
        "EqualityExpression",
        "RelationalExpression",
        &["==", "!=", "===", "!=="],
        "BinaryExpression",
    ),
    (
        "RelationalExpression",
        "AdditiveExpression",
        &["<", ">", "<=", ">="],
        "BinaryExpression",
    ),
    (
        "AdditiveExpression",
        "MultiplicativeExpression",
        &["+", "-"],
        "BinaryExpression",
    ),
    (
        "MultiplicativeExpression",
        "UnaryExpression",
        &["*", "/", "%"],
        "BinaryExpression",
    ),
];

pub fn syntax() -> Syntax {
    let syntax = Syntax::new();

    syntax
        .rule("Expression")
        .add_prod(nonterm("AssignmentExpression"));

    syntax
        .rule("AssignmentExpression")
        .add_prod(seq([
            nonterm("PostfixExpression"),
            choice(["=", "+=", "-="].map(punctuator)),
            nonterm("AssignmentExpression"),
        ]))
        .set_constructor("AssignmentExpression", &["left", "operator", "right"])
        .add_prod(nonterm("LogicalOrExpression"));

    for (name, operand, operators, node) in BINARY_LEVELS {
        let node = node.to_string();
        syntax
            .rule(name)
            .add_prod(seq([
                nonterm(operand),
                star(
                    seq([
                        choice(operators.iter().copied().map(punctuator)),
                        nonterm(operand),
                    ]),
                    None,
                ),
            ]))
            .set_handler(move |args| fold_binary(&node, args));
    }

    syntax
        .rule("UnaryExpression")
        .add_prod(seq([
            choice([punctuator("!"), punctuator("-")]),
            nonterm("UnaryExpression"),
        ]))
        .set_constructor("UnaryExpression", &["operator", "argument"])
        .add_prod(nonterm("PostfixExpression"));

    syntax
        .rule("PostfixExpression")
        .add_prod(seq([
            nonterm("PrimaryExpression"),
            star(nonterm("PostfixSuffix"), None),
        ]))
        .set_handler(fold_postfix);

    syntax
        .rule("PostfixSuffix")
        .add_prod(seq([
            ignored_token("("),
            star(nonterm("AssignmentExpression"), Some(ignored_token(","))),
            ignored_token(")"),
        ]))
        .set_handler(|args| {
            make_node(
                "CallExpression",
                [("callee", Value::Null), ("arguments", first(args))],
            )
        })
        .add_prod(seq([ignored_token("."), nonterm("Identifier")]))
        .set_handler(|args| member(first(args), false))
        .add_prod(seq([
            ignored_token("["),
            nonterm("Expression"),
            ignored_token("]"),
        ]))
        .set_handler(|args| member(first(args), true));

    syntax
        .rule("PrimaryExpression")
        .add_prod(token("NumericLiteral"))
        .set_handler(|args| numeric_literal(first(args)))
        .add_prod(token("StringLiteral"))
        .set_constructor("StringLiteral", &["raw"])
        .add_prod(choice([
            keyword_with_value("true"),
            keyword_with_value("false"),
        ]))
        .set_handler(|args| {
            let value = first(args).as_str() == Some("true");
            make_node("BooleanLiteral", [("value", Value::Bool(value))])
        })
        .add_prod(keyword("null"))
        .set_constructor("NullLiteral", &[])
        .add_prod(nonterm("Identifier"))
        .add_prod(seq([
            ignored_token("("),
            nonterm("Expression"),
            ignored_token(")"),
        ]))
        .set_constructor("ParenthesizedExpression", &["expression"]);

    syntax
        .rule("Identifier")
        .add_prod(token("Identifier"))
        .set_constructor("Identifier", &["name"]);

    syntax
}

fn first(args: Vec<Value>) -> Value {
    args.into_iter().next().unwrap_or(Value::Null)
}

/// `[operand, [[op, operand], ...]]` folded into left-nested nodes.
fn fold_binary(node: &str, args: Vec<Value>) -> Value {
    let mut args = args.into_iter();
    let mut left = args.next().unwrap_or(Value::Null);
    let rest = match args.next() {
        Some(Value::Array(rest)) => rest,
        _ => Vec::new(),
    };
    for pair in rest {
        let mut pair = match pair {
            Value::Array(pair) => pair.into_iter(),
            _ => continue,
        };
        let operator = pair.next().unwrap_or(Value::Null);
        let right = pair.next().unwrap_or(Value::Null);
        left = make_node(
            node,
            [("operator", operator), ("left", left), ("right", right)],
        );
    }
    left
}

/// `[primary, [suffix, ...]]` where each suffix is a call or member node with an empty
/// callee or object slot. Each suffix takes the result so far into that slot.
fn fold_postfix(args: Vec<Value>) -> Value {
    let mut args = args.into_iter();
    let mut target = args.next().unwrap_or(Value::Null);
    let suffixes = match args.next() {
        Some(Value::Array(suffixes)) => suffixes,
        _ => Vec::new(),
    };
    for mut suffix in suffixes {
        if let Some(node) = suffix.as_object_mut() {
            let slot = if node.contains_key("callee") {
                "callee"
            } else {
                "object"
            };
            node.insert(slot.to_string(), target);
        }
        target = suffix;
    }
    target
}

fn member(property: Value, computed: bool) -> Value {
    make_node(
        "MemberExpression",
        [
            ("object", Value::Null),
            ("property", property),
            ("computed", Value::Bool(computed)),
        ],
    )
}

/// `NumericLiteral` node with the parsed number next to its source text.
fn numeric_literal(raw: Value) -> Value {
    let text = raw.as_str().unwrap_or_default();
    let value = parse_number(text).unwrap_or(Value::Null);
    make_node("NumericLiteral", [("value", value), ("raw", raw)])
}

fn parse_number(text: &str) -> Option<Value> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok().map(Value::from);
    }
    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::from(int));
    }
    let float = text.parse::<f64>().ok()?;
    Number::from_f64(float).map(Value::Number)
}
