//! Builder pattern for FilterEngine

use crate::config::EngineConfig;
use crate::engine::FilterEngine;
use crate::error::Result;
use segfilter_compiler::{Compiler, CompilerOptions};
use segfilter_core::SchemaRegistry;
use std::path::Path;
use std::sync::Arc;

/// Builder for FilterEngine
///
/// # Example
///
/// ```rust,ignore
/// use segfilter_sdk::{FilterEngineBuilder, RecommendScenario};
///
/// let engine = FilterEngineBuilder::new()
///     .with_field("category", "string")
///     .with_field("price", "float")
///     .build()?;
///
/// let reql = engine.compile_reql(&filter, RecommendScenario::ItemsToUser)?;
/// ```
#[derive(Debug, Default)]
pub struct FilterEngineBuilder {
    config: EngineConfig,
    registry: Option<Arc<SchemaRegistry>>,
}

impl FilterEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a configuration file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let config = EngineConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Declare a schema field by type tag
    pub fn with_field(mut self, name: impl Into<String>, dtype: impl Into<String>) -> Self {
        self.config.schema.insert(name.into(), dtype.into());
        self
    }

    /// Use an already built registry; declared fields are then ignored
    pub fn with_registry(mut self, registry: Arc<SchemaRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set compiler options
    pub fn with_compiler_options(mut self, options: CompilerOptions) -> Self {
        self.config.compiler = options;
        self
    }

    /// Build the engine, validating the declared schema
    pub fn build(self) -> Result<FilterEngine> {
        let schema = match self.registry {
            Some(registry) => registry,
            None => Arc::new(SchemaRegistry::build(self.config.schema)?),
        };

        tracing::info!(
            fields = schema.len(),
            max_depth = self.config.compiler.max_depth,
            max_conditions = self.config.compiler.max_conditions,
            "Built filter engine"
        );

        Ok(FilterEngine::new(schema, Compiler::with_options(self.config.compiler)))
    }
}
