//! Store query backend
//!
//! Emits a PartiQL-style `WHERE` template with positional `?` placeholders
//! and the ordered list of typed parameters bound to them. No literal is
//! ever spliced into the statement text except the `now()` function token.

use super::{Emitter, TreeWalker};
use crate::error::{CompileError, Result};
use crate::format::{FormattedValue, ValueFormatter};
use segfilter_core::ast::{ContextRef, Operator, RuleNode};
use segfilter_core::types::{DataType, Literal, SchemaRegistry};
use serde::{Deserialize, Serialize};

const PLACEHOLDER: &str = "?";

/// Typed positional parameter, serialised as a DynamoDB attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryParam {
    #[serde(rename = "S")]
    String(String),
    #[serde(rename = "N")]
    Number(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
}

impl QueryParam {
    pub fn null() -> Self {
        QueryParam::Null(true)
    }
}

/// Compiled statement template and its bound parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreQuery {
    pub statement: String,
    pub params: Vec<QueryParam>,
}

/// Emitter for the parameterized store query language
#[derive(Debug, Default)]
pub struct StoreQueryEmitter {
    params: Vec<QueryParam>,
}

impl StoreQueryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters bound so far, in placeholder order
    pub fn into_params(self) -> Vec<QueryParam> {
        self.params
    }

    fn bind(&mut self, value: FormattedValue) -> String {
        let param = match value {
            FormattedValue::Now => return "now()".to_string(),
            FormattedValue::Null => QueryParam::null(),
            FormattedValue::Bool(b) => QueryParam::Bool(b),
            FormattedValue::Number(n) => QueryParam::Number(n),
            FormattedValue::Text(s) => QueryParam::String(s),
        };
        self.params.push(param);
        PLACEHOLDER.to_string()
    }

    fn is_identifier(name: &str) -> bool {
        name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        })
    }

    fn operator_token(op: Operator) -> &'static str {
        match op {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::StartsWith => "begins_with",
            other => other.as_str(),
        }
    }
}

impl Emitter for StoreQueryEmitter {
    const NAME: &'static str = "store_query";

    fn supports_context(&self) -> bool {
        false
    }

    fn field(&self, name: &str) -> Result<String> {
        if Self::is_identifier(name) {
            Ok(name.to_string())
        } else {
            Err(CompileError::MalformedInput(format!(
                "'{}' is not a valid attribute name",
                name
            )))
        }
    }

    fn scalar(&mut self, value: &Literal, dtype: DataType) -> Result<String> {
        let formatted = ValueFormatter::normalize(value, dtype)?;
        Ok(self.bind(formatted))
    }

    fn context(&mut self, _context: &ContextRef) -> Result<String> {
        Err(CompileError::ContextNotAllowed)
    }

    fn set(&mut self, values: &[Literal], dtype: DataType, op: Operator) -> Result<String> {
        if values.is_empty() {
            return Err(CompileError::RequiresList(op));
        }
        let mut placeholders = Vec::with_capacity(values.len());
        for value in values {
            placeholders.push(self.scalar(value, dtype)?);
        }
        Ok(format!("({})", placeholders.join(", ")))
    }

    fn membership(&self, field: &str, set: &str, negated: bool) -> String {
        if negated {
            format!("NOT ({} IN {})", field, set)
        } else {
            format!("{} IN {}", field, set)
        }
    }

    fn function(&self, op: Operator, field: &str, arg: &str) -> String {
        format!("{}({}, {})", Self::operator_token(op), field, arg)
    }

    fn binary(&self, field: &str, op: Operator, operand: &str) -> String {
        format!("{} {} {}", field, Self::operator_token(op), operand)
    }
}

/// Compiler for the store query backend
pub struct StoreQueryCompiler;

impl StoreQueryCompiler {
    /// Compile a parsed tree into a statement template and parameters.
    ///
    /// Context item references are always rejected.
    pub fn compile(tree: &RuleNode, schema: &SchemaRegistry) -> Result<StoreQuery> {
        let (statement, emitter) =
            TreeWalker::new(schema, StoreQueryEmitter::new(), false).run(tree)?;
        Ok(StoreQuery {
            statement,
            params: emitter.into_params(),
        })
    }
}
