//! Fragments and dialects
//!
//!     A [Fragment] is a named, reusable piece of language: a lazily built [Syntax] plus the
//!     node types its productions construct. A [Dialect] names a start rule, an optional
//!     parent dialect, and an ordered list of fragments. Its syntax is the parent's composed
//!     syntax followed by its own fragments' syntaxes, in list order.
//!
//!     Both are looked up by name through a [Registry]. Everything a dialect derives (syntax,
//!     grammar, node types, tokenizer settings) is computed on first use and then frozen, so
//!     a dialect must be fully described before it is registered.
//!
//! [Syntax]: crate::lingo::grammar::Syntax

pub mod dialect;
pub mod fragment;
pub mod registry;

pub use dialect::Dialect;
pub use fragment::Fragment;
pub use registry::Registry;
