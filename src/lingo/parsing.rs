//! Parsing
//!
//!     A backtracking recursive-descent driver over a fully materialized token list.
//!
//!     [TokenStream] is the cursor. It always rests on a hard token or the end of input,
//!     skipping ether after every move, and records the furthest position ever reached.
//!     [ParseContext] binds a stream to a [Grammar](crate::lingo::grammar::Grammar) for one
//!     parse call. [Parser] is the entry point: it runs a start rule, requires every token
//!     to be consumed, and turns failure into a [SyntaxError](crate::lingo::SyntaxError)
//!     positioned at the high-water mark.

pub mod context;
pub mod parser;
pub mod stream;

pub use context::{Failure, Outcome, ParseContext};
pub use parser::{Parser, TraceRecord};
pub use stream::TokenStream;
