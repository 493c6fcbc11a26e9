//! Processing configurations
//!
//! Each configuration specifies:
//! 1. How far to take the source (tokens, tree, translation)
//! 2. How to render the result

use std::collections::HashMap;

/// A named configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingConfig {
    pub name: String,
    pub description: String,
    pub target: TargetSpec,
}

/// What to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSpec {
    /// Stop after tokenizing and dump the tokens
    Tokens,

    /// Parse and serialize the tree
    Ast { format: OutputFormat },

    /// Parse, translate and unparse back to source
    Translate,

    /// Parse with tracing; syntax errors are part of the output
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Registry of processing configurations
#[derive(Debug)]
pub struct ConfigRegistry {
    configs: HashMap<String, ProcessingConfig>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        ConfigRegistry {
            configs: HashMap::new(),
        }
    }

    /// Register a configuration, replacing one of the same name
    pub fn register(&mut self, config: ProcessingConfig) {
        self.configs.insert(config.name.clone(), config);
    }

    pub fn get(&self, name: &str) -> Option<&ProcessingConfig> {
        self.configs.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.configs.contains_key(name)
    }

    /// List all configurations (sorted by name)
    pub fn list_all(&self) -> Vec<&ProcessingConfig> {
        let mut configs: Vec<_> = self.configs.values().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs
    }

    /// Registry with the standard configurations
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ProcessingConfig {
            name: "tokens".into(),
            description: "Tokenize with the dialect's keywords and punctuators, output tokens"
                .into(),
            target: TargetSpec::Tokens,
        });

        registry.register(ProcessingConfig {
            name: "ast-json".into(),
            description: "Parse and serialize the tree as JSON".into(),
            target: TargetSpec::Ast {
                format: OutputFormat::Json,
            },
        });

        registry.register(ProcessingConfig {
            name: "ast-yaml".into(),
            description: "Parse and serialize the tree as YAML".into(),
            target: TargetSpec::Ast {
                format: OutputFormat::Yaml,
            },
        });

        registry.register(ProcessingConfig {
            name: "translate".into(),
            description: "Parse, translate to the base language and unparse".into(),
            target: TargetSpec::Translate,
        });

        registry.register(ProcessingConfig {
            name: "trace".into(),
            description: "Parse with tracing, output the trace record as JSON".into(),
            target: TargetSpec::Trace,
        });

        registry
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
