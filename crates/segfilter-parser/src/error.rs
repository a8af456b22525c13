//! Parser error types

use segfilter_core::{CoreError, NodeFault};
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON parsing error
    #[error("DSL JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Operator token outside the grammar
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    /// Group `op` other than AND/OR
    #[error("Group 'op' must be 'AND' or 'OR', got {0}")]
    InvalidCombinator(String),

    /// Unsupported `dtype` override
    #[error(transparent)]
    UnsupportedType(#[from] CoreError),
}

impl From<NodeFault> for ParseError {
    fn from(fault: NodeFault) -> Self {
        match fault {
            NodeFault::MissingField { field } => ParseError::MissingField { field },
            NodeFault::InvalidValue { field, message } => ParseError::InvalidValue { field, message },
            NodeFault::InvalidOperator(token) => ParseError::InvalidOperator(token),
            NodeFault::InvalidCombinator(op) => ParseError::InvalidCombinator(op),
            NodeFault::UnsupportedType(err) => ParseError::UnsupportedType(err),
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
