//! Pipeline executor that runs processing configurations

use super::config::{ConfigRegistry, OutputFormat, ProcessingConfig, TargetSpec};
use crate::lingo::dialects::Registry;
use crate::lingo::error::{ConfigError, Error};
use serde::Serialize;

/// Errors during pipeline execution
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("config '{0}' not found")]
    ConfigNotFound(String),

    #[error(transparent)]
    Lingo(#[from] Error),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<ConfigError> for ExecutionError {
    fn from(err: ConfigError) -> Self {
        ExecutionError::Lingo(err.into())
    }
}

/// Executes processing configurations
#[derive(Debug, Default)]
pub struct PipelineExecutor {
    registry: ConfigRegistry,
}

impl PipelineExecutor {
    /// Executor with the standard configurations
    pub fn new() -> Self {
        Self {
            registry: ConfigRegistry::with_defaults(),
        }
    }

    pub fn with_registry(registry: ConfigRegistry) -> Self {
        Self { registry }
    }

    /// Run the configuration `config_name` over `source` in dialect `dialect_name`.
    pub fn execute(
        &self,
        config_name: &str,
        dialects: &Registry,
        dialect_name: &str,
        source: &str,
        origin: Option<&str>,
    ) -> Result<String, ExecutionError> {
        let config = self
            .registry
            .get(config_name)
            .ok_or_else(|| ExecutionError::ConfigNotFound(config_name.to_string()))?;
        let dialect = dialects.require_dialect(dialect_name)?;
        log::debug!("running '{config_name}' in dialect '{dialect_name}'");

        match config.target {
            TargetSpec::Tokens => to_json(&dialect.tokenize(dialects, source)?),
            TargetSpec::Ast { format } => {
                let tree = dialect.parse_source(dialects, source, origin)?;
                match format {
                    OutputFormat::Json => to_json(&tree),
                    OutputFormat::Yaml => serde_yaml::to_string(&tree)
                        .map_err(|e| ExecutionError::Serialization(e.to_string())),
                }
            }
            TargetSpec::Translate => Ok(dialect.translate(dialects, source, origin)?),
            TargetSpec::Trace => to_json(&dialect.trace_source(dialects, source, origin)?),
        }
    }

    /// List all available configurations
    pub fn list_configs(&self) -> Vec<&ProcessingConfig> {
        self.registry.list_all()
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExecutionError> {
    serde_json::to_string_pretty(value).map_err(|e| ExecutionError::Serialization(e.to_string()))
}
