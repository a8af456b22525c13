//! Declared data types for filterable fields

use crate::ast::Operator;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Whole numbers
    Int,
    /// Decimal numbers
    Float,
    /// Quoted text
    String,
    /// ISO 8601 string or `now()`
    Datetime,
    /// `true` / `false`
    Boolean,
}

const STRING_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::In,
    Operator::NotIn,
    Operator::Contains,
    Operator::StartsWith,
];

const NUMERIC_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Le,
    Operator::Gt,
    Operator::Ge,
    Operator::In,
    Operator::NotIn,
];

const DATETIME_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Lt,
    Operator::Le,
    Operator::Gt,
    Operator::Ge,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Eq, Operator::Ne];

impl DataType {
    /// All supported data types
    pub const ALL: [DataType; 5] = [
        DataType::Int,
        DataType::Float,
        DataType::String,
        DataType::Datetime,
        DataType::Boolean,
    ];

    /// Parse a declared type tag for `field`.
    ///
    /// Tags are matched exactly; anything outside the closed set is rejected.
    pub fn parse_for(field: &str, tag: &str) -> Result<Self> {
        match tag {
            "int" => Ok(DataType::Int),
            "float" => Ok(DataType::Float),
            "string" => Ok(DataType::String),
            "datetime" => Ok(DataType::Datetime),
            "boolean" => Ok(DataType::Boolean),
            other => Err(CoreError::UnsupportedType {
                field: field.to_string(),
                dtype: other.to_string(),
            }),
        }
    }

    /// Get type tag as string
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::Datetime => "datetime",
            DataType::Boolean => "boolean",
        }
    }

    /// Operators a condition on a field of this type may use
    pub fn allowed_operators(&self) -> &'static [Operator] {
        match self {
            DataType::String => STRING_OPERATORS,
            DataType::Int | DataType::Float => NUMERIC_OPERATORS,
            DataType::Datetime => DATETIME_OPERATORS,
            DataType::Boolean => BOOLEAN_OPERATORS,
        }
    }

    /// Check if `op` is allowed for this type
    pub fn allows(&self, op: Operator) -> bool {
        self.allowed_operators().contains(&op)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
