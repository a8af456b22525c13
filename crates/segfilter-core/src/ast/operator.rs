//! Condition operators

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Operator tokens accepted in a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    // Comparison operators
    /// Equal (==)
    #[serde(rename = "==")]
    Eq,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    Ne,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Le,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Ge,

    // Membership operators
    /// In
    #[serde(rename = "in")]
    In,
    /// Not in
    #[serde(rename = "not in")]
    NotIn,

    // String functions
    /// Contains
    #[serde(rename = "contains")]
    Contains,
    /// Starts with
    #[serde(rename = "startsWith")]
    StartsWith,
}

impl Operator {
    /// Every operator token, in table order
    pub const ALL: [Operator; 10] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
        Operator::In,
        Operator::NotIn,
        Operator::Contains,
        Operator::StartsWith,
    ];

    /// DSL token for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
        }
    }

    /// Returns true for `in` / `not in`, the only operators taking a list
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Returns true for operators emitted as string function calls
    pub fn is_string_function(&self) -> bool {
        matches!(self, Operator::Contains | Operator::StartsWith)
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .find(|op| op.as_str() == token)
            .copied()
            .ok_or_else(|| token.to_string())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator as written in a condition, recognised or not.
///
/// An unrecognised token is kept verbatim so it can be rejected against
/// the field's type like any other operator the type does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperatorToken {
    Known(Operator),
    Unknown(String),
}

impl OperatorToken {
    pub fn parse(token: &str) -> Self {
        token
            .parse()
            .map(OperatorToken::Known)
            .unwrap_or_else(OperatorToken::Unknown)
    }

    pub fn known(&self) -> Option<Operator> {
        match self {
            OperatorToken::Known(op) => Some(*op),
            OperatorToken::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OperatorToken::Known(op) => op.as_str(),
            OperatorToken::Unknown(token) => token,
        }
    }
}

impl From<Operator> for OperatorToken {
    fn from(op: Operator) -> Self {
        OperatorToken::Known(op)
    }
}

impl fmt::Display for OperatorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OperatorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
