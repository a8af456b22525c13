//! Error types for segfilter Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unsupported datatype for property '{field}': {dtype}")]
    UnsupportedType { field: String, dtype: String },
}

/// Structural fault of a single rule node.
///
/// Kept inside the tree in place of the malformed node, so the fault
/// surfaces only when a walk reaches it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeFault {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    #[error("Group 'op' must be 'AND' or 'OR', got {0}")]
    InvalidCombinator(String),

    #[error(transparent)]
    UnsupportedType(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
