//! Main compiler
//!
//! Provides a unified interface over both backends: decode (optionally),
//! enforce tree limits, then validate and emit in one walk. Decoding keeps
//! malformed nodes in the tree, so the walk reports whichever fault comes
//! first, structural or not.

use crate::codegen::{
    Emitter, ReqlCompiler, ReqlEmitter, StoreQuery, StoreQueryCompiler, StoreQueryEmitter,
};
use crate::error::{CompileError, Result};
use crate::validator::Validator;
use segfilter_core::ast::RuleNode;
use segfilter_core::types::SchemaRegistry;
use segfilter_parser::{JsonParser, RuleTreeParser};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Compiler options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Maximum group nesting depth
    pub max_depth: usize,
    /// Maximum number of conditions in one tree
    pub max_conditions: usize,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_conditions: 1000,
        }
    }
}

/// The main filter compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    /// Compiler options
    options: CompilerOptions,
}

impl Compiler {
    /// Create a new compiler instance with default options
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Create a new compiler instance with custom options
    pub fn with_options(options: CompilerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile a parsed tree into a ReQL expression
    pub fn compile_reql(
        &self,
        tree: &RuleNode,
        schema: &SchemaRegistry,
        allow_context_item: bool,
    ) -> Result<String> {
        self.check_limits(tree)?;
        let text = ReqlCompiler::compile(tree, schema, allow_context_item)?;

        tracing::debug!(
            backend = ReqlEmitter::NAME,
            conditions = tree.condition_count(),
            allow_context_item,
            "Compiled filter"
        );
        Ok(text)
    }

    /// Parse and compile a JSON value into a ReQL expression
    pub fn compile_reql_json(
        &self,
        json: &JsonValue,
        schema: &SchemaRegistry,
        allow_context_item: bool,
    ) -> Result<String> {
        let tree = RuleTreeParser::decode(json);
        self.compile_reql(&tree, schema, allow_context_item)
    }

    /// Parse and compile JSON text into a ReQL expression
    pub fn compile_reql_str(
        &self,
        json: &str,
        schema: &SchemaRegistry,
        allow_context_item: bool,
    ) -> Result<String> {
        let tree = RuleTreeParser::decode(&JsonParser::parse(json)?);
        self.compile_reql(&tree, schema, allow_context_item)
    }

    /// Compile a parsed tree into a store query template and parameters
    pub fn compile_store_query(&self, tree: &RuleNode, schema: &SchemaRegistry) -> Result<StoreQuery> {
        self.check_limits(tree)?;
        let query = StoreQueryCompiler::compile(tree, schema)?;

        tracing::debug!(
            backend = StoreQueryEmitter::NAME,
            conditions = tree.condition_count(),
            params = query.params.len(),
            "Compiled filter"
        );
        Ok(query)
    }

    /// Parse and compile a JSON value into a store query
    pub fn compile_store_query_json(&self, json: &JsonValue, schema: &SchemaRegistry) -> Result<StoreQuery> {
        let tree = RuleTreeParser::decode(json);
        self.compile_store_query(&tree, schema)
    }

    /// Parse and compile JSON text into a store query
    pub fn compile_store_query_str(&self, json: &str, schema: &SchemaRegistry) -> Result<StoreQuery> {
        let tree = RuleTreeParser::decode(&JsonParser::parse(json)?);
        self.compile_store_query(&tree, schema)
    }

    /// Validate a tree without emitting anything, returning its condition count
    pub fn validate(
        &self,
        tree: &RuleNode,
        schema: &SchemaRegistry,
        allow_context_item: bool,
    ) -> Result<usize> {
        self.check_limits(tree)?;
        Validator::new()
            .allow_context_item(allow_context_item)
            .validate(tree, schema)
    }

    fn check_limits(&self, tree: &RuleNode) -> Result<()> {
        let depth = tree.depth();
        if depth > self.options.max_depth {
            return Err(CompileError::LimitExceeded(format!(
                "nesting depth {} is above the maximum of {}",
                depth, self.options.max_depth
            )));
        }

        let conditions = tree.condition_count();
        if conditions > self.options.max_conditions {
            return Err(CompileError::LimitExceeded(format!(
                "{} conditions is above the maximum of {}",
                conditions, self.options.max_conditions
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn schema() -> SchemaRegistry {
        SchemaRegistry::build([("category", "string"), ("price", "float")]).unwrap()
    }

    fn nested(depth: usize) -> RuleNode {
        (0..depth).fold(RuleNode::and(vec![]), |inner, _| RuleNode::or(vec![inner]))
    }

    #[test]
    fn test_default_options() {
        let options = CompilerOptions::default();
        assert_eq!(options.max_depth, 32);
        assert_eq!(options.max_conditions, 1000);
    }

    #[test]
    fn test_options_partial_deserialize() {
        let options: CompilerOptions = serde_json::from_value(json!({"max_depth": 4})).unwrap();
        assert_eq!(options.max_depth, 4);
        assert_eq!(options.max_conditions, 1000);
    }

    #[test]
    fn test_compile_reql_str() {
        let compiler = Compiler::new();
        let text = compiler
            .compile_reql_str(
                r#"{"field": "category", "operator": "==", "value": "Books"}"#,
                &schema(),
                false,
            )
            .unwrap();
        assert_eq!(text, r#"'category' == "Books""#);
    }

    #[test]
    fn test_parse_faults_are_malformed_input() {
        let compiler = Compiler::new();
        let err = compiler
            .compile_reql_json(&json!({"op": "XOR", "rules": []}), &schema(), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        let err = compiler.compile_store_query_str("not json", &schema()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_structural_faults_surface_in_walk_order() {
        let compiler = Compiler::new();
        let filter = json!({
            "op": "AND",
            "rules": [
                {"field": "ghost", "operator": "==", "value": "x"},
                {"op": "XOR", "rules": []}
            ]
        });
        assert_eq!(
            compiler.compile_reql_json(&filter, &schema(), false).unwrap_err(),
            CompileError::UnknownField("ghost".to_string())
        );
        assert_eq!(
            compiler.compile_store_query_json(&filter, &schema()).unwrap_err().kind(),
            ErrorKind::UnknownField
        );
    }

    #[test]
    fn test_depth_limit() {
        let compiler = Compiler::with_options(CompilerOptions {
            max_depth: 3,
            max_conditions: 10,
        });
        assert_eq!(compiler.compile_reql(&nested(2), &schema(), false).unwrap(), "((true))");

        let err = compiler.compile_reql(&nested(3), &schema(), false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
    }

    #[test]
    fn test_condition_limit() {
        let compiler = Compiler::with_options(CompilerOptions {
            max_depth: 32,
            max_conditions: 2,
        });
        let tree = RuleNode::and(
            (0..3)
                .map(|i| {
                    RuleNode::condition(
                        "price",
                        segfilter_core::ast::Operator::Gt,
                        segfilter_core::types::Literal::from(i),
                    )
                })
                .collect(),
        );
        let err = compiler.compile_store_query(&tree, &schema()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LimitExceeded);
        assert_eq!(
            compiler.validate(&tree, &schema(), false).unwrap_err().kind(),
            ErrorKind::LimitExceeded
        );
    }
}
