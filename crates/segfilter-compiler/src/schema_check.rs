//! Schema pre-flight checks
//!
//! Harvests the field types a stored filter relies on and reconciles them
//! with an external schema, without compiling. Extraction is best effort
//! and reconciliation reports every fault at once.

use crate::error::{CompileError, Result, SchemaMismatch, TypeMismatch};
use segfilter_core::ast::RuleNode;
use segfilter_core::types::{DataType, SchemaRegistry};
use segfilter_parser::json_parser::{JsonParser, DTYPE_KEY, RULES_KEY};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};

/// Field name to the first type it was used with
pub type ExtractedFields = BTreeMap<String, DataType>;

/// Type aliases understood as equivalent to each filter type
const COMPATIBLE_TYPES: &[(&str, &[&str])] = &[
    ("string", &["text", "varchar", "char"]),
    ("int", &["integer", "bigint", "smallint"]),
    ("float", &["double", "decimal", "numeric"]),
    ("boolean", &["bool"]),
    ("datetime", &["timestamp", "date"]),
];

/// Field extractor
pub struct FieldExtractor;

impl FieldExtractor {
    /// Extract field types from a raw filter.
    ///
    /// Malformed entries are skipped. Only a root whose `rules` is present
    /// but not a list is an error.
    pub fn extract(json: &JsonValue, schema: &SchemaRegistry) -> Result<ExtractedFields> {
        if let Some(rules) = json.get(RULES_KEY) {
            if !rules.is_array() {
                return Err(CompileError::MalformedInput(format!(
                    "'rules' must be a list, got {}",
                    JsonParser::type_name(rules)
                )));
            }
        }

        let mut fields = ExtractedFields::new();
        Self::walk_json(json, schema, &mut fields);
        Ok(fields)
    }

    /// Extract field types from an already parsed tree
    pub fn extract_tree(tree: &RuleNode, schema: &SchemaRegistry) -> ExtractedFields {
        let mut fields = ExtractedFields::new();
        for condition in tree.conditions() {
            let dtype = condition
                .dtype_override
                .or_else(|| schema.lookup(&condition.field));
            if let Some(dtype) = dtype {
                fields.entry(condition.field.clone()).or_insert(dtype);
            }
        }
        fields
    }

    fn walk_json(node: &JsonValue, schema: &SchemaRegistry, fields: &mut ExtractedFields) {
        if !node.is_object() {
            return;
        }

        if JsonParser::is_group(node) {
            if let Some(children) = node.get(RULES_KEY).and_then(JsonValue::as_array) {
                for child in children {
                    Self::walk_json(child, schema, fields);
                }
            }
            return;
        }

        let Some(field) = JsonParser::get_field_name(node) else {
            return;
        };

        // an override that does not parse falls back to the schema
        let dtype = JsonParser::get_optional_string(node, DTYPE_KEY)
            .and_then(|tag| DataType::parse_for(&field, &tag).ok())
            .or_else(|| schema.lookup(&field));

        if let Some(dtype) = dtype {
            fields.entry(field).or_insert(dtype);
        }
    }
}

/// Reconciles extracted field types with an external schema
#[derive(Debug, Clone, Default)]
pub struct SchemaReconciler {
    /// Field name to raw type name as the external store declares it
    schema: HashMap<String, String>,
}

impl SchemaReconciler {
    pub fn new(schema: HashMap<String, String>) -> Self {
        Self { schema }
    }

    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        Self::new(registry.type_names().into_iter().collect())
    }

    /// Check every extracted field, aggregating all faults into one error
    pub fn validate(&self, extracted: &ExtractedFields) -> Result<()> {
        let mut mismatch = SchemaMismatch::default();

        for (field, dtype) in extracted {
            match self.schema.get(field) {
                None => mismatch.missing.push(field.clone()),
                Some(schema_type) if !Self::types_compatible(dtype.as_str(), schema_type) => {
                    mismatch.mismatches.push(TypeMismatch {
                        field: field.clone(),
                        filter_type: dtype.as_str().to_string(),
                        schema_type: schema_type.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if mismatch.is_empty() {
            Ok(())
        } else {
            Err(CompileError::SchemaMismatch(mismatch))
        }
    }

    /// Whether a filter type and a schema type name denote the same kind
    pub fn types_compatible(filter_type: &str, schema_type: &str) -> bool {
        let filter_type = filter_type.to_ascii_lowercase();
        let schema_type = schema_type.to_ascii_lowercase();
        if filter_type == schema_type {
            return true;
        }

        let class_of = |name: &str| {
            COMPATIBLE_TYPES
                .iter()
                .position(|(base, aliases)| *base == name || aliases.contains(&name))
        };
        matches!(
            (class_of(&filter_type), class_of(&schema_type)),
            (Some(a), Some(b)) if a == b
        )
    }
}
