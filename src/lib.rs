//! # lingo
//!
//! A composable grammar engine and the machinery to build extensible dialects of a
//! C-family scripting language on top of it.
//!
//! File Layout
//!
//!     The library lives under src/lingo, one directory per stage of the pipeline:
//!
//!     src/lingo
//!       ├── lexing      Trie, logos scanner, dialect-aware tokenizer, detokenizer
//!       ├── grammar     Expression algebra, rules, syntaxes and compiled grammars
//!       ├── parsing     Token stream, parse context and the backtracking parser
//!       ├── dialects    Fragments, dialects and the registry that owns them
//!       ├── ast         Tagged nodes, type registries, traversal, translation, unparsing
//!       ├── base        The base C-family dialect and a small sugar dialect over it
//!       ├── pipeline    Named processing configurations and their executor
//!       ├── error.rs    Syntax, configuration and protocol errors
//!       └── settings.rs Layered TOML settings (writer indent, type precedence)
//!
//!     Data flows source text -> tokens -> tagged tree -> translated tree -> source text.

pub mod lingo;
