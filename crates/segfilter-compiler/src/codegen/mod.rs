//! Code generation module
//!
//! Both backends share one validated tree walk and differ only in how they
//! emit fields, literals and operator forms. The walk lives here; each
//! backend implements `Emitter`.

pub mod reql;
pub mod store_query;

pub use reql::{ReqlCompiler, ReqlEmitter};
pub use store_query::{QueryParam, StoreQuery, StoreQueryCompiler, StoreQueryEmitter};

use crate::error::{CompileError, Result};
use crate::validator::Validator;
use segfilter_core::ast::{Combinator, Condition, ConditionValue, ContextRef, Group, Operator, RuleNode};
use segfilter_core::types::{DataType, Literal, SchemaRegistry};

/// Text emitted for a group without children
pub const EMPTY_GROUP: &str = "true";

/// Backend-specific emission
pub trait Emitter {
    /// Backend name used in logs
    const NAME: &'static str;

    /// Whether this backend can reference the context item at all
    fn supports_context(&self) -> bool;

    /// Render a field reference
    fn field(&self, name: &str) -> Result<String>;

    /// Render a single literal of the given type
    fn scalar(&mut self, value: &Literal, dtype: DataType) -> Result<String>;

    /// Render a context item property reference
    fn context(&mut self, context: &ContextRef) -> Result<String>;

    /// Render a multi-value literal for `in` / `not in`
    fn set(&mut self, values: &[Literal], dtype: DataType, op: Operator) -> Result<String>;

    /// `field in set`, negated for `not in`
    fn membership(&self, field: &str, set: &str, negated: bool) -> String;

    /// `contains` / `startsWith` function call
    fn function(&self, op: Operator, field: &str, arg: &str) -> String;

    /// `field <op> operand`
    fn binary(&self, field: &str, op: Operator, operand: &str) -> String;
}

/// Validating depth-first tree walk driving an `Emitter`
pub(crate) struct TreeWalker<'a, E: Emitter> {
    schema: &'a SchemaRegistry,
    validator: Validator,
    emitter: E,
}

impl<'a, E: Emitter> TreeWalker<'a, E> {
    pub(crate) fn new(schema: &'a SchemaRegistry, emitter: E, allow_context_item: bool) -> Self {
        let allow = allow_context_item && emitter.supports_context();
        Self {
            schema,
            validator: Validator::new().allow_context_item(allow),
            emitter,
        }
    }

    /// Emit the whole tree, handing back the emitter for output collection
    pub(crate) fn run(mut self, tree: &RuleNode) -> Result<(String, E)> {
        let text = self.emit_node(tree)?;
        Ok((text, self.emitter))
    }

    fn emit_node(&mut self, node: &RuleNode) -> Result<String> {
        match node {
            RuleNode::Group(group) => self.emit_group(group),
            RuleNode::Condition(condition) => self.emit_condition(condition),
            RuleNode::Invalid(fault) => Err(fault.clone().into()),
        }
    }

    fn emit_group(&mut self, group: &Group) -> Result<String> {
        if group.children.is_empty() {
            return Ok(EMPTY_GROUP.to_string());
        }

        let mut parts = Vec::with_capacity(group.children.len());
        for child in &group.children {
            let part = self.emit_node(child)?;
            match child {
                RuleNode::Group(_) => parts.push(format!("({})", part)),
                _ => parts.push(part),
            }
        }

        let joiner = match group.combinator {
            Combinator::And => " AND ",
            Combinator::Or => " OR ",
        };
        Ok(parts.join(joiner))
    }

    fn emit_condition(&mut self, condition: &Condition) -> Result<String> {
        let (dtype, op) = self.validator.check_condition(condition, self.schema)?;
        let field = self.emitter.field(&condition.field)?;

        if op.is_membership() {
            let values = match &condition.value {
                ConditionValue::List(values) => values,
                // shape already enforced by the validator
                _ => return Err(CompileError::RequiresList(op)),
            };
            let set = self.emitter.set(values, dtype, op)?;
            return Ok(self.emitter.membership(&field, &set, op == Operator::NotIn));
        }

        let operand = match &condition.value {
            ConditionValue::Scalar(value) => self.emitter.scalar(value, dtype)?,
            ConditionValue::Context(context) => self.emitter.context(context)?,
            ConditionValue::List(_) => return Err(CompileError::ListNotAllowed(op)),
            ConditionValue::Invalid(message) => {
                return Err(CompileError::MalformedInput(message.clone()))
            }
        };

        if op.is_string_function() {
            Ok(self.emitter.function(op, &field, &operand))
        } else {
            Ok(self.emitter.binary(&field, op, &operand))
        }
    }
}
