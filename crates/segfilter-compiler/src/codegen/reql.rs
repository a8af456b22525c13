//! ReQL backend
//!
//! Emits a single self-contained filter expression for the recommendation
//! engine, with every literal inlined:
//!
//! ```text
//! ('category' == "Books" AND 'price' < 200) OR 'is_available' == true
//! ```

use super::{Emitter, TreeWalker};
use crate::error::Result;
use crate::format::{FormattedValue, ValueFormatter};
use segfilter_core::ast::{ContextRef, Operator, RuleNode};
use segfilter_core::types::{DataType, Literal, SchemaRegistry};

/// Emitter for the inline expression language
#[derive(Debug, Default)]
pub struct ReqlEmitter;

impl ReqlEmitter {
    fn render(value: FormattedValue) -> String {
        match value {
            FormattedValue::Null => "null".to_string(),
            FormattedValue::Bool(b) => b.to_string(),
            FormattedValue::Number(n) => n,
            FormattedValue::Text(s) => ValueFormatter::quote_string(&s),
            FormattedValue::Now => "now()".to_string(),
        }
    }
}

impl Emitter for ReqlEmitter {
    const NAME: &'static str = "reql";

    fn supports_context(&self) -> bool {
        true
    }

    fn field(&self, name: &str) -> Result<String> {
        Ok(ValueFormatter::quote_property(name))
    }

    fn scalar(&mut self, value: &Literal, dtype: DataType) -> Result<String> {
        ValueFormatter::normalize(value, dtype).map(Self::render)
    }

    fn context(&mut self, context: &ContextRef) -> Result<String> {
        Ok(format!(
            "context_item[{}]",
            ValueFormatter::quote_string(&context.property)
        ))
    }

    fn set(&mut self, values: &[Literal], dtype: DataType, _op: Operator) -> Result<String> {
        let items = values
            .iter()
            .map(|v| self.scalar(v, dtype))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{{{}}}", items.join(", ")))
    }

    fn membership(&self, field: &str, set: &str, negated: bool) -> String {
        if negated {
            format!("not ({} in {})", field, set)
        } else {
            format!("{} in {}", field, set)
        }
    }

    fn function(&self, op: Operator, field: &str, arg: &str) -> String {
        format!("{}({}, {})", op.as_str(), field, arg)
    }

    fn binary(&self, field: &str, op: Operator, operand: &str) -> String {
        format!("{} {} {}", field, op.as_str(), operand)
    }
}

/// Compiler for the ReQL backend
pub struct ReqlCompiler;

impl ReqlCompiler {
    /// Compile a parsed tree into a ReQL expression
    pub fn compile(
        tree: &RuleNode,
        schema: &SchemaRegistry,
        allow_context_item: bool,
    ) -> Result<String> {
        let (text, _) = TreeWalker::new(schema, ReqlEmitter, allow_context_item).run(tree)?;
        Ok(text)
    }
}
