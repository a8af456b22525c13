//! Rule validation
//!
//! Checks every condition of a tree against the schema, in the same
//! depth-first, left-to-right order the backends emit text in:
//!
//! 1. resolve the field type (override first, then schema)
//! 2. the operator must be allowed for that type; unrecognised tokens never are
//! 3. the value must have decoded
//! 4. `in` / `not in` need a list, every other operator a single value
//! 5. context item references need `allow_context_item`
//!
//! Nodes that failed to decode are reported when the walk reaches them.

use crate::error::{CompileError, Result};
use segfilter_core::ast::{Condition, ConditionValue, Operator, OperatorToken, RuleNode};
use segfilter_core::types::{DataType, SchemaRegistry};

/// Validator for rule trees against a schema
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    /// Whether `$context_item` references are accepted
    allow_context_item: bool,
}

impl Validator {
    /// Create a new validator that rejects context item references
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow context item references
    pub fn allow_context_item(mut self, allow: bool) -> Self {
        self.allow_context_item = allow;
        self
    }

    /// Resolve the effective type of a condition's field
    pub fn resolve_type(condition: &Condition, schema: &SchemaRegistry) -> Result<DataType> {
        condition
            .dtype_override
            .or_else(|| schema.lookup(&condition.field))
            .ok_or_else(|| CompileError::UnknownField(condition.field.clone()))
    }

    /// Validate one condition, returning its resolved type and operator
    pub fn check_condition(
        &self,
        condition: &Condition,
        schema: &SchemaRegistry,
    ) -> Result<(DataType, Operator)> {
        let dtype = Self::resolve_type(condition, schema)?;
        let op = match &condition.operator {
            OperatorToken::Known(op) if dtype.allows(*op) => *op,
            token => {
                return Err(CompileError::OperatorNotAllowed {
                    operator: token.to_string(),
                    dtype,
                })
            }
        };

        if let Some(fault) = condition.fault() {
            return Err(fault.into());
        }

        match (&condition.value, op.is_membership()) {
            (ConditionValue::List(_), false) => return Err(CompileError::ListNotAllowed(op)),
            (ConditionValue::Scalar(_) | ConditionValue::Context(_), true) => {
                return Err(CompileError::RequiresList(op))
            }
            _ => {}
        }

        if condition.value.is_context() && !self.allow_context_item {
            return Err(CompileError::ContextNotAllowed);
        }

        Ok((dtype, op))
    }

    /// Validate a whole tree without emitting anything.
    ///
    /// Returns the number of conditions checked.
    pub fn validate(&self, tree: &RuleNode, schema: &SchemaRegistry) -> Result<usize> {
        match tree {
            RuleNode::Condition(condition) => self.check_condition(condition, schema).map(|_| 1),
            RuleNode::Group(group) => group
                .children
                .iter()
                .try_fold(0, |count, child| Ok(count + self.validate(child, schema)?)),
            RuleNode::Invalid(fault) => Err(fault.clone().into()),
        }
    }
}
