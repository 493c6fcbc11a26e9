//! Statement grammar
//!
//! `Statement` is an open rule: other fragments add alternatives to it, and those are tried
//! after the ones declared here.

use super::terminator::Terminator;
use crate::lingo::grammar::combinators::*;
use crate::lingo::grammar::{Expr, Syntax};

pub const FRAGMENT: &str = "statements";

fn terminator() -> Expr {
    custom(Terminator::new())
}

pub fn syntax() -> Syntax {
    let syntax = Syntax::new();

    syntax
        .rule("Program")
        .add_prod(star(nonterm("Statement"), None))
        .set_constructor("Program", &["body"]);

    let statement = syntax.rule("Statement");
    for kind in [
        "BlockStatement",
        "VariableDeclaration",
        "IfStatement",
        "WhileStatement",
        "ReturnStatement",
        "EmptyStatement",
        "ExpressionStatement",
    ] {
        statement.add_prod(nonterm(kind));
    }

    syntax
        .rule("BlockStatement")
        .add_prod(seq([
            ignored_token("{"),
            star(nonterm("Statement"), None),
            ignored_token("}"),
        ]))
        .set_constructor("BlockStatement", &["body"]);

    syntax
        .rule("VariableDeclaration")
        .add_prod(seq([
            choice(["var", "let", "const"].map(keyword_with_value)),
            plus(nonterm("VariableDeclarator"), Some(ignored_token(","))),
            terminator(),
        ]))
        .set_constructor("VariableDeclaration", &["kind", "declarations"]);

    syntax
        .rule("VariableDeclarator")
        .add_prod(seq([
            nonterm("Identifier"),
            option(seq([ignored_token("="), nonterm("AssignmentExpression")])),
        ]))
        .set_constructor("VariableDeclarator", &["id", "init"]);

    syntax
        .rule("IfStatement")
        .add_prod(seq([
            keyword("if"),
            ignored_token("("),
            nonterm("Expression"),
            ignored_token(")"),
            nonterm("Statement"),
            option(seq([keyword("else"), nonterm("Statement")])),
        ]))
        .set_constructor("IfStatement", &["test", "consequent", "alternate"]);

    syntax
        .rule("WhileStatement")
        .add_prod(seq([
            keyword("while"),
            ignored_token("("),
            nonterm("Expression"),
            ignored_token(")"),
            nonterm("Statement"),
        ]))
        .set_constructor("WhileStatement", &["test", "body"]);

    syntax
        .rule("ReturnStatement")
        .add_prod(seq([
            keyword("return"),
            option(nonterm("Expression")),
            terminator(),
        ]))
        .set_constructor("ReturnStatement", &["argument"]);

    syntax
        .rule("EmptyStatement")
        .add_prod(ignored_token(";"))
        .set_constructor("EmptyStatement", &[]);

    syntax
        .rule("ExpressionStatement")
        .add_prod(seq([nonterm("Expression"), terminator()]))
        .set_constructor("ExpressionStatement", &["expression"]);

    syntax
}
