//! Configuration types for FilterEngine
//!
//! A configuration names the tenant schema and the compiler limits:
//!
//! ```yaml
//! schema:
//!   category: string
//!   price: float
//! compiler:
//!   max_depth: 16
//! ```

use crate::error::{Result, SdkError};
use segfilter_compiler::CompilerOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Field name to declared type tag
    pub schema: BTreeMap<String, String>,

    /// Compiler options
    pub compiler: CompilerOptions,
}

impl EngineConfig {
    /// Create an empty configuration with default compiler options
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a schema field
    pub fn with_field(mut self, name: impl Into<String>, dtype: impl Into<String>) -> Self {
        self.schema.insert(name.into(), dtype.into());
        self
    }

    /// Set compiler options
    pub fn with_compiler_options(mut self, options: CompilerOptions) -> Self {
        self.compiler = options;
        self
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SdkError::ConfigError(format!("invalid YAML config: {}", e)))
    }

    /// Parse a JSON configuration
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| SdkError::ConfigError(format!("invalid JSON config: {}", e)))
    }

    /// Load a configuration file; `.json` files are read as JSON, anything
    /// else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading engine config from {:?}", path);

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_config() {
        let config = EngineConfig::from_yaml_str(
            r#"
schema:
  category: string
  price: float
compiler:
  max_depth: 4
"#,
        )
        .unwrap();
        assert_eq!(config.schema.get("price").map(String::as_str), Some("float"));
        assert_eq!(config.compiler.max_depth, 4);
        assert_eq!(config.compiler.max_conditions, 1000);
    }

    #[test]
    fn test_json_config_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert!(config.schema.is_empty());
        assert_eq!(config.compiler, CompilerOptions::default());
    }

    #[test]
    fn test_invalid_config() {
        let err = EngineConfig::from_yaml_str("schema: [1, 2]").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/segfilter.yaml").unwrap_err();
        assert!(matches!(err, SdkError::IoError(_)));
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_field("category", "string")
            .with_compiler_options(CompilerOptions {
                max_depth: 2,
                max_conditions: 5,
            });
        assert_eq!(config.schema.len(), 1);
        assert_eq!(config.compiler.max_conditions, 5);
    }
}
