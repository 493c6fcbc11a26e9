//! Main module for lingo library functionality

pub mod ast;
pub mod base;
pub mod dialects;
pub mod error;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod settings;

pub use dialects::{Dialect, Fragment, Registry};
pub use error::{ConfigError, Error, ProtocolError, SyntaxError};
pub use grammar::{Expr, Grammar, Rule, Syntax};
pub use lexing::{Token, TokenizerSettings};
pub use parsing::{Parser, TraceRecord};
pub use settings::LingoConfig;
