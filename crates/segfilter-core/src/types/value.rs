//! Literal values carried by rule conditions
//!
//! A `Literal` is the scalar subset of JSON: rule values are never objects
//! (those are context references) and lists are modelled one level up by
//! `ConditionValue::List`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value as JsonValue};
use std::fmt;

/// Scalar literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value, kept as JSON number text so integers stay integers
    Number(Number),
    /// String value
    String(String),
}

impl Literal {
    /// Convert a scalar JSON value; arrays and objects yield `None`
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => Some(Literal::Null),
            JsonValue::Bool(b) => Some(Literal::Bool(*b)),
            JsonValue::Number(n) => Some(Literal::Number(n.clone())),
            JsonValue::String(s) => Some(Literal::String(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(Number::from(n))
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Literal::Number).unwrap_or(Literal::Null)
    }
}

/// Renders the value the way it appears in error messages
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}
