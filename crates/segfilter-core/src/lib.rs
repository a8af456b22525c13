//! segfilter Core - Core types for the segfilter rule-tree compiler
//!
//! This crate provides the fundamental types shared by the parser,
//! the compiler backends and the SDK:
//! - Data types and the per-tenant schema registry
//! - Literal values
//! - Rule tree AST (groups and conditions)
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{Combinator, Condition, ConditionValue, ContextRef, Group, Operator, OperatorToken, RuleNode};
pub use error::{CoreError, NodeFault};
pub use types::{DataType, Literal, SchemaRegistry};
