//! JSON Parser
//!
//! Provides utilities for reading rule-tree JSON objects.

use crate::error::Result;
use serde_json::Value as JsonValue;

/// Key marking an object as a group
pub const RULES_KEY: &str = "rules";

/// Key holding a group's combinator
pub const OP_KEY: &str = "op";

/// Condition keys
pub const FIELD_KEY: &str = "field";
/// Field-catalogue spelling of the condition field key
pub const FIELD_NAME_KEY: &str = "field_name";
pub const OPERATOR_KEY: &str = "operator";
pub const VALUE_KEY: &str = "value";
pub const DTYPE_KEY: &str = "dtype";

/// JSON parser utilities
pub struct JsonParser;

impl JsonParser {
    /// Parse JSON string into a JSON value
    pub fn parse(json_str: &str) -> Result<JsonValue> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// An object carrying a `rules` key is a group, whatever else it holds
    pub fn is_group(obj: &JsonValue) -> bool {
        obj.as_object()
            .map(|map| map.contains_key(RULES_KEY))
            .unwrap_or(false)
    }

    /// Get an optional string field from JSON object
    pub fn get_optional_string(obj: &JsonValue, field: &str) -> Option<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Condition field name, read from `field` or its `field_name` alias
    pub fn get_field_name(obj: &JsonValue) -> Option<String> {
        Self::get_optional_string(obj, FIELD_KEY)
            .or_else(|| Self::get_optional_string(obj, FIELD_NAME_KEY))
    }

    /// Short JSON type name used in error messages
    pub fn type_name(value: &JsonValue) -> &'static str {
        match value {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "list",
            JsonValue::Object(_) => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use serde_json::json;

    #[test]
    fn test_is_group() {
        assert!(JsonParser::is_group(&json!({"op": "AND", "rules": []})));
        assert!(JsonParser::is_group(&json!({"rules": "not_a_list"})));
        assert!(!JsonParser::is_group(&json!({"field": "x"})));
        assert!(!JsonParser::is_group(&json!("rules")));
    }

    #[test]
    fn test_get_optional_string() {
        let obj = json!({"field": "category", "value": 3});
        assert_eq!(JsonParser::get_optional_string(&obj, "field"), Some("category".to_string()));
        assert_eq!(JsonParser::get_optional_string(&obj, "value"), None);
        assert_eq!(JsonParser::get_optional_string(&obj, "missing"), None);
    }

    #[test]
    fn test_field_name_alias() {
        assert_eq!(
            JsonParser::get_field_name(&json!({"field_name": "brand"})),
            Some("brand".to_string())
        );
        assert_eq!(
            JsonParser::get_field_name(&json!({"field": "a", "field_name": "b"})),
            Some("a".to_string())
        );
        assert_eq!(JsonParser::get_field_name(&json!({"field": 1})), None);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(JsonParser::parse("{\"op\": "), Err(ParseError::JsonError(_))));
    }
}
