//! Tagged trees
//!
//!     Parse results are JSON values. A node is an object with a `type` string; its other
//!     members are nodes, arrays of nodes, or primitives. There is no closed node hierarchy:
//!     behavior is looked up by the `type` string in a dialect's [TypeRegistry].
//!
//!     [traverse] dispatches a value to a [Visitor]. Two visitors ship with the crate:
//!     [Translator] (structural copy, unless a node type rewrites itself) and [Writer]
//!     (unparsing back to source text).

pub mod node;
pub mod translate;
pub mod traverse;
pub mod types;
pub mod writer;

pub use node::{array_field, field, make_node, node_type, str_field};
pub use translate::Translator;
pub use traverse::{traverse, Visitor};
pub use types::{NodeSpec, NodeType, TypeRegistry};
pub use writer::Writer;
