//! Rule tree parser
//!
//! Parses the JSON filter DSL into `RuleNode` trees:
//!
//! ```text
//! Group     ::= { "op": "AND" | "OR", "rules": [ Node, ... ] }
//! Condition ::= { "field": <string>, "operator": <token>, "value": <value>, "dtype"?: <string> }
//! ```
//!
//! `decode` never fails: a malformed node stays in the tree as
//! `RuleNode::Invalid` and is reported by whichever walk reaches it first.
//! `parse` / `parse_value` reject the tree on its first such fault.

use crate::error::Result;
use crate::json_parser::{
    JsonParser, DTYPE_KEY, FIELD_KEY, OPERATOR_KEY, OP_KEY, RULES_KEY, VALUE_KEY,
};
use segfilter_core::ast::{
    Combinator, Condition, ConditionValue, ContextRef, Group, OperatorToken, RuleNode,
    CONTEXT_ITEM_KEY,
};
use segfilter_core::types::{DataType, Literal};
use segfilter_core::NodeFault;
use serde_json::Value as JsonValue;

type Decoded<T> = std::result::Result<T, NodeFault>;

/// Rule tree parser
pub struct RuleTreeParser;

impl RuleTreeParser {
    /// Parse a rule tree from a JSON string
    pub fn parse(json_str: &str) -> Result<RuleNode> {
        let json = JsonParser::parse(json_str)?;
        Self::parse_value(&json)
    }

    /// Parse a rule tree from an already decoded JSON value, failing on the
    /// first structural fault in walk order
    pub fn parse_value(json: &JsonValue) -> Result<RuleNode> {
        let node = Self::decode(json);
        match node.first_fault() {
            Some(fault) => Err(fault.into()),
            None => Ok(node),
        }
    }

    /// Decode a rule tree, keeping per-node faults in place
    pub fn decode(json: &JsonValue) -> RuleNode {
        let node = Self::decode_node(json);
        log::trace!(
            "decoded rule tree: depth={} conditions={}",
            node.depth(),
            node.condition_count()
        );
        node
    }

    fn decode_node(json: &JsonValue) -> RuleNode {
        let decoded = if !json.is_object() {
            Err(NodeFault::InvalidValue {
                field: RULES_KEY.to_string(),
                message: format!(
                    "each rule must be an object, got {}",
                    JsonParser::type_name(json)
                ),
            })
        } else if JsonParser::is_group(json) {
            Self::decode_group(json).map(RuleNode::Group)
        } else {
            Self::decode_condition(json).map(RuleNode::Condition)
        };
        decoded.unwrap_or_else(RuleNode::Invalid)
    }

    /// Decode a group; a bad `op` or `rules` invalidates the whole group
    fn decode_group(json: &JsonValue) -> Decoded<Group> {
        let op = json.get(OP_KEY).ok_or_else(|| NodeFault::MissingField {
            field: OP_KEY.to_string(),
        })?;
        let combinator = op
            .as_str()
            .and_then(Combinator::parse)
            .ok_or_else(|| NodeFault::InvalidCombinator(op.to_string()))?;

        let rules = json
            .get(RULES_KEY)
            .and_then(|v| v.as_array())
            .ok_or_else(|| NodeFault::InvalidValue {
                field: RULES_KEY.to_string(),
                message: "'rules' must be a list".to_string(),
            })?;

        let children = rules.iter().map(Self::decode_node).collect();
        Ok(Group::new(combinator, children))
    }

    /// Decode a single condition.
    ///
    /// Missing keys and a bad `dtype` invalidate the node. An unknown
    /// operator or a malformed value is kept on the condition, so schema
    /// checks still run first.
    fn decode_condition(json: &JsonValue) -> Decoded<Condition> {
        let missing = |field: &str| NodeFault::MissingField {
            field: field.to_string(),
        };

        let field = JsonParser::get_field_name(json).ok_or_else(|| missing(FIELD_KEY))?;
        let token = JsonParser::get_optional_string(json, OPERATOR_KEY)
            .ok_or_else(|| missing(OPERATOR_KEY))?;
        let raw_value = json.get(VALUE_KEY).ok_or_else(|| missing(VALUE_KEY))?;

        // A null dtype is treated as absent
        let dtype_override = match json.get(DTYPE_KEY) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(tag)) => Some(DataType::parse_for(&field, tag)?),
            Some(other) => {
                return Err(NodeFault::InvalidValue {
                    field: DTYPE_KEY.to_string(),
                    message: format!("expected a type name, got {}", JsonParser::type_name(other)),
                })
            }
        };

        Ok(Condition {
            field,
            operator: OperatorToken::parse(&token),
            value: Self::decode_value(raw_value),
            dtype_override,
        })
    }

    /// Decode the right-hand side of a condition
    fn decode_value(json: &JsonValue) -> ConditionValue {
        match json {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| {
                    Literal::from_json(item).ok_or_else(|| {
                        format!(
                            "list elements must be scalar values, got {}",
                            JsonParser::type_name(item)
                        )
                    })
                })
                .collect::<std::result::Result<Vec<_>, String>>()
                .map(ConditionValue::List)
                .unwrap_or_else(ConditionValue::Invalid),
            JsonValue::Object(map) => match map.get(CONTEXT_ITEM_KEY) {
                Some(JsonValue::String(property)) => {
                    ConditionValue::Context(ContextRef::new(property.clone()))
                }
                Some(_) => ConditionValue::Invalid("Invalid $context_item reference".to_string()),
                None => ConditionValue::Invalid(
                    "objects are only allowed as $context_item references".to_string(),
                ),
            },
            JsonValue::String(s) => ContextRef::parse_dotted(s)
                .map(ConditionValue::Context)
                .unwrap_or_else(|| ConditionValue::Scalar(Literal::String(s.clone()))),
            scalar => Literal::from_json(scalar)
                .map(ConditionValue::Scalar)
                .unwrap_or_else(|| ConditionValue::Invalid("unsupported value".to_string())),
        }
    }
}
