//! Settings loader
//!
//! `defaults/lingo.default.toml` is embedded into the library so documentation and runtime
//! behavior agree. Callers layer their own files on top with [Loader] before deserializing
//! into [LingoConfig], then hand the result to [crate::lingo::Registry::with_config].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/lingo.default.toml");

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LingoConfig {
    pub writer: WriterConfig,
    pub dialects: DialectConfig,
}

/// Unparse output knobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WriterConfig {
    pub indent_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DialectConfig {
    pub type_precedence: TypePrecedence,
}

/// Which definition survives when a dialect and its parent register the same node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypePrecedence {
    #[default]
    ParentWins,
    ChildWins,
}

impl Default for LingoConfig {
    fn default() -> Self {
        LingoConfig {
            writer: WriterConfig {
                indent_unit: crate::lingo::ast::writer::DEFAULT_INDENT_UNIT.to_string(),
            },
            dialects: DialectConfig {
                type_precedence: TypePrecedence::default(),
            },
        }
    }
}

/// Layers user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a settings file. A missing file is an error at build time.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a settings file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer TOML text, e.g. settings embedded by an application.
    pub fn with_toml(mut self, text: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(text, FileFormat::Toml));
        self
    }

    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<LingoConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<LingoConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, LingoConfig::default());
        assert_eq!(config.writer.indent_unit, "    ");
        assert_eq!(config.dialects.type_precedence, TypePrecedence::ParentWins);
    }

    #[test]
    fn test_override() {
        let config = Loader::new()
            .set_override("dialects.type_precedence", "child-wins")
            .unwrap()
            .set_override("writer.indent_unit", "\t")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.dialects.type_precedence, TypePrecedence::ChildWins);
        assert_eq!(config.writer.indent_unit, "\t");
    }

    #[test]
    fn test_layered_toml_keeps_other_defaults() {
        let config = Loader::new()
            .with_toml("[writer]\nindent_unit = \"  \"\n")
            .build()
            .unwrap();
        assert_eq!(config.writer.indent_unit, "  ");
        assert_eq!(config.dialects.type_precedence, TypePrecedence::ParentWins);
    }

    #[test]
    fn test_missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/lingo.toml")
            .build()
            .unwrap();
        assert_eq!(config, LingoConfig::default());
    }

    #[test]
    fn test_missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/lingo.toml")
            .build()
            .is_err());
    }

    #[test]
    fn test_bad_precedence_is_rejected() {
        let result = Loader::new()
            .set_override("dialects.type_precedence", "sideways")
            .unwrap()
            .build();
        assert!(result.is_err());
    }
}
