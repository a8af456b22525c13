//! Compiler error types
//!
//! Every variant except `SchemaMismatch` is raised fail-fast by the first
//! fault of a depth-first walk. All of them describe a bad filter, never a
//! transient condition, so callers should report them as validation errors.

use segfilter_core::ast::Operator;
use segfilter_core::types::DataType;
use segfilter_core::{CoreError, NodeFault};
use segfilter_parser::ParseError;
use std::fmt;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Structurally invalid filter JSON
    #[error("Malformed filter: {0}")]
    MalformedInput(String),

    /// Declared or overridden type outside the supported set
    #[error("Unsupported datatype for property '{field}': {dtype}")]
    UnsupportedType { field: String, dtype: String },

    /// Field neither declared in the schema nor typed by an override
    #[error("Unknown property '{0}'")]
    UnknownField(String),

    /// Operator token not in the allowlist of the field's type
    #[error("Operator '{operator}' not allowed for type '{dtype}'")]
    OperatorNotAllowed { operator: String, dtype: DataType },

    /// Literal that cannot be encoded as the field's type
    #[error("Value {value} is not a valid {expected}")]
    InvalidValue { value: String, expected: String },

    /// Membership operator without a list value
    #[error("Operator '{0}' requires a list of values")]
    RequiresList(Operator),

    /// List value on a single-value operator
    #[error("Operator '{0}' does not accept list value")]
    ListNotAllowed(Operator),

    /// Context item reference where the call has no context item
    #[error("$context_item usage is not allowed for this API call")]
    ContextNotAllowed,

    /// Tree deeper or larger than the configured limits
    #[error("Filter exceeds limits: {0}")]
    LimitExceeded(String),

    /// Aggregated schema reconciliation faults
    #[error("{0}")]
    SchemaMismatch(SchemaMismatch),
}

/// Stable discriminant of a `CompileError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    UnsupportedType,
    UnknownField,
    OperatorNotAllowed,
    InvalidValue,
    RequiresList,
    ListNotAllowed,
    ContextNotAllowed,
    LimitExceeded,
    SchemaMismatch,
}

impl CompileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::MalformedInput(_) => ErrorKind::MalformedInput,
            CompileError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            CompileError::UnknownField(_) => ErrorKind::UnknownField,
            CompileError::OperatorNotAllowed { .. } => ErrorKind::OperatorNotAllowed,
            CompileError::InvalidValue { .. } => ErrorKind::InvalidValue,
            CompileError::RequiresList(_) => ErrorKind::RequiresList,
            CompileError::ListNotAllowed(_) => ErrorKind::ListNotAllowed,
            CompileError::ContextNotAllowed => ErrorKind::ContextNotAllowed,
            CompileError::LimitExceeded(_) => ErrorKind::LimitExceeded,
            CompileError::SchemaMismatch(_) => ErrorKind::SchemaMismatch,
        }
    }

    pub(crate) fn invalid_value(value: impl fmt::Display, expected: impl Into<String>) -> Self {
        CompileError::InvalidValue {
            value: value.to_string(),
            expected: expected.into(),
        }
    }
}

impl From<CoreError> for CompileError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedType { field, dtype } => {
                CompileError::UnsupportedType { field, dtype }
            }
        }
    }
}

impl From<NodeFault> for CompileError {
    fn from(fault: NodeFault) -> Self {
        match fault {
            NodeFault::UnsupportedType(core) => core.into(),
            other => CompileError::MalformedInput(other.to_string()),
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnsupportedType(core) => core.into(),
            other => CompileError::MalformedInput(other.to_string()),
        }
    }
}

/// A field whose filter type disagrees with the external schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    pub field: String,
    pub filter_type: String,
    pub schema_type: String,
}

/// All faults found while reconciling extracted fields with a schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMismatch {
    /// Fields absent from the schema, sorted
    pub missing: Vec<String>,
    /// Incompatible types, sorted by field
    pub mismatches: Vec<TypeMismatch>,
}

impl SchemaMismatch {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.mismatches.is_empty()
    }
}

impl fmt::Display for TypeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (filter:{} vs schema:{})",
            self.field, self.filter_type, self.schema_type
        )
    }
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::new();
        if !self.missing.is_empty() {
            sections.push(format!("Missing fields in schema: {}", self.missing.join(", ")));
        }
        if !self.mismatches.is_empty() {
            let items: Vec<String> = self.mismatches.iter().map(|m| m.to_string()).collect();
            sections.push(format!("Type mismatches: {}", items.join(", ")));
        }
        write!(f, "Schema validation failed: {}", sections.join("; "))
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
