//! Rule tree definitions

use super::operator::OperatorToken;
use crate::error::NodeFault;
use crate::types::{DataType, Literal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the object form of a context reference: `{"$context_item": "brand"}`
pub const CONTEXT_ITEM_KEY: &str = "$context_item";

const CONTEXT_ITEM_PREFIX: &str = "$context_item.";

/// A node of the rule tree
///
/// Serializes back to the DSL shape; decoding goes through `segfilter-parser`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleNode {
    /// Nested AND/OR group
    Group(Group),
    /// Leaf comparison
    Condition(Condition),
    /// Node that could not be decoded; raised when a walk reaches it
    #[serde(skip_serializing)]
    Invalid(NodeFault),
}

/// How a group joins its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combinator {
    And,
    Or,
}

/// A group of child nodes joined by one combinator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    #[serde(rename = "op")]
    pub combinator: Combinator,

    /// Ordered children; an empty group is the permissive literal `true`
    #[serde(rename = "rules")]
    pub children: Vec<RuleNode>,
}

/// A single field/operator/value comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub field: String,

    pub operator: OperatorToken,

    pub value: ConditionValue,

    /// Per-condition type that takes precedence over the schema
    #[serde(rename = "dtype", skip_serializing_if = "Option::is_none")]
    pub dtype_override: Option<DataType>,
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// Multi-value list for `in` / `not in`
    List(Vec<Literal>),
    /// Property of the caller-supplied context item
    Context(ContextRef),
    /// Single literal
    Scalar(Literal),
    /// Value that could not be decoded, with the reason
    #[serde(skip_serializing)]
    Invalid(String),
}

/// Reference to a property of the context item of an item-to-item call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextRef {
    #[serde(rename = "$context_item")]
    pub property: String,
}

impl Combinator {
    /// Parse the `op` token of a group; only `AND` and `OR` are accepted
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "AND" => Some(Combinator::And),
            "OR" => Some(Combinator::Or),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContextRef {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    /// Parse the dotted string form `"$context_item.<property>"`
    pub fn parse_dotted(s: &str) -> Option<Self> {
        s.strip_prefix(CONTEXT_ITEM_PREFIX).map(Self::new)
    }
}

impl ConditionValue {
    pub fn is_context(&self) -> bool {
        matches!(self, ConditionValue::Context(_))
    }
}

impl From<Literal> for ConditionValue {
    fn from(literal: Literal) -> Self {
        ConditionValue::Scalar(literal)
    }
}

impl From<ContextRef> for ConditionValue {
    fn from(context: ContextRef) -> Self {
        ConditionValue::Context(context)
    }
}

impl From<Vec<Literal>> for ConditionValue {
    fn from(values: Vec<Literal>) -> Self {
        ConditionValue::List(values)
    }
}

impl Condition {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<OperatorToken>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
            dtype_override: None,
        }
    }

    /// Structural fault carried by this condition's operator or value
    pub fn fault(&self) -> Option<NodeFault> {
        if let OperatorToken::Unknown(token) = &self.operator {
            return Some(NodeFault::InvalidOperator(token.clone()));
        }
        match &self.value {
            ConditionValue::Invalid(message) => Some(NodeFault::InvalidValue {
                field: "value".to_string(),
                message: message.clone(),
            }),
            _ => None,
        }
    }

    /// Set a per-condition type override
    pub fn with_dtype(mut self, dtype: DataType) -> Self {
        self.dtype_override = Some(dtype);
        self
    }
}

impl Group {
    pub fn new(combinator: Combinator, children: Vec<RuleNode>) -> Self {
        Self {
            combinator,
            children,
        }
    }
}

impl RuleNode {
    /// Create an AND group
    pub fn and(children: Vec<RuleNode>) -> Self {
        RuleNode::Group(Group::new(Combinator::And, children))
    }

    /// Create an OR group
    pub fn or(children: Vec<RuleNode>) -> Self {
        RuleNode::Group(Group::new(Combinator::Or, children))
    }

    /// Create a condition leaf
    pub fn condition(
        field: impl Into<String>,
        operator: impl Into<OperatorToken>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        RuleNode::Condition(Condition::new(field, operator, value))
    }

    /// First structural fault in walk order, if any
    pub fn first_fault(&self) -> Option<NodeFault> {
        match self {
            RuleNode::Invalid(fault) => Some(fault.clone()),
            RuleNode::Condition(c) => c.fault(),
            RuleNode::Group(g) => g.children.iter().find_map(RuleNode::first_fault),
        }
    }

    /// All conditions in the tree, depth-first, left to right
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut result = Vec::new();
        self.collect_conditions(&mut result);
        result
    }

    fn collect_conditions<'a>(&'a self, result: &mut Vec<&'a Condition>) {
        match self {
            RuleNode::Condition(c) => result.push(c),
            RuleNode::Group(g) => {
                for child in &g.children {
                    child.collect_conditions(result);
                }
            }
            RuleNode::Invalid(_) => {}
        }
    }

    /// Group nesting depth; a lone condition has depth 0, a flat group 1
    pub fn depth(&self) -> usize {
        match self {
            RuleNode::Condition(_) | RuleNode::Invalid(_) => 0,
            RuleNode::Group(g) => 1 + g.children.iter().map(RuleNode::depth).max().unwrap_or(0),
        }
    }

    /// Number of condition leaves
    pub fn condition_count(&self) -> usize {
        match self {
            RuleNode::Condition(_) => 1,
            RuleNode::Group(g) => g.children.iter().map(RuleNode::condition_count).sum(),
            RuleNode::Invalid(_) => 0,
        }
    }
}
