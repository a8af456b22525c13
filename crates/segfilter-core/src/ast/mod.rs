//! Rule tree AST
//!
//! A tenant-authored filter is a boolean tree: groups combine children with
//! AND/OR, conditions compare one field against a value.

pub mod operator;
pub mod rule;

pub use operator::{Operator, OperatorToken};
pub use rule::{Combinator, Condition, ConditionValue, ContextRef, Group, RuleNode, CONTEXT_ITEM_KEY};
