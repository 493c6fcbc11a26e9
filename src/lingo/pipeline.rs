//! Named processing runs
//!
//! A processing configuration names what to produce from a source text in a dialect:
//! the token list, the parsed tree as JSON or YAML, translated source, or a parse trace.
//! [PipelineExecutor] runs them by name; this is what the `lingo` binary drives.

pub mod config;
pub mod executor;

pub use config::{ConfigRegistry, OutputFormat, ProcessingConfig, TargetSpec};
pub use executor::{ExecutionError, PipelineExecutor};
