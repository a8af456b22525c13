//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Filter rejected by the compiler
    #[error("Compiler error: {0}")]
    Compile(#[from] segfilter_compiler::CompileError),

    /// Invalid schema declaration
    #[error("Schema error: {0}")]
    Schema(#[from] segfilter_core::CoreError),
}

impl SdkError {
    /// The compiler error behind this error, if any
    pub fn as_compile_error(&self) -> Option<&segfilter_compiler::CompileError> {
        match self {
            SdkError::Compile(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use segfilter_compiler::{CompileError, ErrorKind};

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("missing schema".to_string());
        assert_eq!(error.to_string(), "Configuration error: missing schema");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert!(sdk_error.to_string().contains("I/O error"));
        assert!(sdk_error.to_string().contains("File not found"));
    }

    #[test]
    fn test_compile_error_conversion() {
        let sdk_error: SdkError = CompileError::ContextNotAllowed.into();
        assert_eq!(
            sdk_error.as_compile_error().map(CompileError::kind),
            Some(ErrorKind::ContextNotAllowed)
        );
        assert!(sdk_error.to_string().starts_with("Compiler error: "));
    }

    #[test]
    fn test_schema_error_conversion() {
        let sdk_error: SdkError = segfilter_core::CoreError::UnsupportedType {
            field: "tags".to_string(),
            dtype: "list".to_string(),
        }
        .into();
        assert!(sdk_error.as_compile_error().is_none());
        assert!(sdk_error.to_string().contains("'tags'"));
    }
}
