//! Unit tests for core types
//!
//! Covers the operator allowlist table, the schema registry and the rule
//! tree helpers.

use segfilter_core::ast::*;
use segfilter_core::types::*;
use segfilter_core::CoreError;
use std::collections::HashMap;

// =============================================================================
// Operator Allowlist Tests
// =============================================================================

#[test]
fn test_string_operators() {
    let allowed: Vec<&str> = DataType::String.allowed_operators().iter().map(|op| op.as_str()).collect();
    assert_eq!(allowed, vec!["==", "!=", "in", "not in", "contains", "startsWith"]);
}

#[test]
fn test_numeric_operators() {
    for dtype in [DataType::Int, DataType::Float] {
        assert!(dtype.allows(Operator::Le));
        assert!(dtype.allows(Operator::NotIn));
        assert!(!dtype.allows(Operator::Contains));
        assert!(!dtype.allows(Operator::StartsWith));
    }
}

#[test]
fn test_datetime_operators() {
    assert!(DataType::Datetime.allows(Operator::Gt));
    assert!(!DataType::Datetime.allows(Operator::In));
    assert!(!DataType::Datetime.allows(Operator::Contains));
}

#[test]
fn test_boolean_operators() {
    let allowed: Vec<Operator> = DataType::Boolean.allowed_operators().to_vec();
    assert_eq!(allowed, vec![Operator::Eq, Operator::Ne]);
}

#[test]
fn test_every_type_allows_equality() {
    for dtype in DataType::ALL {
        assert!(dtype.allows(Operator::Eq), "{} should allow ==", dtype);
        assert!(dtype.allows(Operator::Ne), "{} should allow !=", dtype);
    }
}

// =============================================================================
// Schema Registry Tests
// =============================================================================

#[test]
fn test_registry_rejects_unknown_tag() {
    let err = SchemaRegistry::build([("price", "float"), ("tags", "list")]).unwrap_err();
    assert_eq!(
        err,
        CoreError::UnsupportedType {
            field: "tags".to_string(),
            dtype: "list".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Unsupported datatype for property 'tags': list");
}

#[test]
fn test_registry_tags_are_exact() {
    assert!(SchemaRegistry::build([("price", "Float")]).is_err());
    assert!(SchemaRegistry::build([("price", "varchar")]).is_err());
}

#[test]
fn test_registry_from_json() -> anyhow::Result<()> {
    let schema: SchemaRegistry =
        serde_json::from_str(r#"{"category": "string", "price": "float"}"#)?;
    assert_eq!(schema.lookup("category"), Some(DataType::String));

    let bad: Result<SchemaRegistry, _> = serde_json::from_str(r#"{"category": "text"}"#);
    assert!(bad.is_err());

    assert_eq!(
        serde_json::to_string(&schema)?,
        r#"{"category":"string","price":"float"}"#
    );
    Ok(())
}

#[test]
fn test_registry_from_hash_map() {
    let mut fields = HashMap::new();
    fields.insert("is_available".to_string(), "boolean".to_string());
    let schema = SchemaRegistry::try_from(fields).unwrap();
    assert!(schema.contains("is_available"));
    assert!(!schema.is_empty());
}

#[test]
fn test_registry_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SchemaRegistry>();

    let schema = std::sync::Arc::new(SchemaRegistry::from_types([("price", DataType::Float)]));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let schema = schema.clone();
            std::thread::spawn(move || schema.lookup("price"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(DataType::Float));
    }
}

// =============================================================================
// Rule Tree Tests
// =============================================================================

#[test]
fn test_tree_walk_order() {
    let tree = RuleNode::or(vec![
        RuleNode::and(vec![
            RuleNode::condition("a", Operator::Eq, Literal::from(1)),
            RuleNode::condition("b", Operator::Eq, Literal::from(2)),
        ]),
        RuleNode::condition("c", Operator::Eq, Literal::from(3)),
    ]);
    let fields: Vec<&str> = tree.conditions().iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["a", "b", "c"]);
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.condition_count(), 3);
}

#[test]
fn test_tree_serializes_to_dsl_shape() -> anyhow::Result<()> {
    let tree = RuleNode::and(vec![
        RuleNode::condition("category", Operator::In, vec![Literal::from("A"), Literal::from("B")]),
        RuleNode::Condition(
            Condition::new("rating", Operator::Ge, Literal::from(4)).with_dtype(DataType::Float),
        ),
        RuleNode::condition("brand", Operator::Eq, ContextRef::new("brand")),
    ]);
    assert_eq!(
        serde_json::to_value(&tree)?,
        serde_json::json!({
            "op": "AND",
            "rules": [
                {"field": "category", "operator": "in", "value": ["A", "B"]},
                {"field": "rating", "operator": ">=", "value": 4, "dtype": "float"},
                {"field": "brand", "operator": "==", "value": {"$context_item": "brand"}}
            ]
        })
    );
    Ok(())
}

#[test]
fn test_context_ref_dotted_form() {
    assert_eq!(
        ContextRef::parse_dotted("$context_item.brand"),
        Some(ContextRef::new("brand"))
    );
    assert_eq!(ContextRef::parse_dotted("brand"), None);
}
