//! Filter engine
//!
//! Owns the tenant schema and compiler settings and exposes one call per
//! consumer: ReQL text for recommendation calls, a parameterized statement
//! for the user store, and the schema pre-flight check.

use crate::error::{Result, SdkError};
use crate::scenario::RecommendScenario;
use segfilter_compiler::{
    CompileError, Compiler, CompilerOptions, ExtractedFields, FieldExtractor, SchemaReconciler,
    StoreQuery,
};
use segfilter_core::SchemaRegistry;
use segfilter_parser::RuleTreeParser;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Filter engine
///
/// Cheap to clone; clones share the schema.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    schema: Arc<SchemaRegistry>,
    compiler: Compiler,
}

impl FilterEngine {
    pub fn new(schema: Arc<SchemaRegistry>, compiler: Compiler) -> Self {
        Self { schema, compiler }
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    pub fn options(&self) -> &CompilerOptions {
        self.compiler.options()
    }

    /// Compile a filter into a ReQL expression for a recommendation call
    pub fn compile_reql(&self, filter: &JsonValue, scenario: RecommendScenario) -> Result<String> {
        let result = self
            .compiler
            .compile_reql_json(filter, &self.schema, scenario.allows_context_item());
        Self::logged(result, "reql", Some(scenario)).map_err(SdkError::from)
    }

    /// Compile filter JSON text into a ReQL expression
    pub fn compile_reql_str(&self, filter: &str, scenario: RecommendScenario) -> Result<String> {
        let result = self
            .compiler
            .compile_reql_str(filter, &self.schema, scenario.allows_context_item());
        Self::logged(result, "reql", Some(scenario)).map_err(SdkError::from)
    }

    /// Compile a filter into a store query statement and its parameters
    pub fn compile_store_query(&self, filter: &JsonValue) -> Result<StoreQuery> {
        let result = self.compiler.compile_store_query_json(filter, &self.schema);
        Self::logged(result, "store_query", None).map_err(SdkError::from)
    }

    /// Validate a filter for a scenario without compiling it
    pub fn validate(&self, filter: &JsonValue, scenario: RecommendScenario) -> Result<usize> {
        let tree = RuleTreeParser::decode(filter);
        let result = self
            .compiler
            .validate(&tree, &self.schema, scenario.allows_context_item());
        Self::logged(result, "validate", Some(scenario)).map_err(SdkError::from)
    }

    /// Check that a stored filter still fits an external schema.
    ///
    /// Field types are taken from the filter's overrides and this engine's
    /// schema; every missing or incompatible field is reported at once.
    pub fn check_filter(
        &self,
        filter: &JsonValue,
        external_schema: &HashMap<String, String>,
    ) -> Result<ExtractedFields> {
        let result = FieldExtractor::extract(filter, &self.schema).and_then(|extracted| {
            SchemaReconciler::new(external_schema.clone())
                .validate(&extracted)
                .map(|_| extracted)
        });
        let extracted = Self::logged(result, "check_filter", None)?;

        tracing::debug!(fields = extracted.len(), "Filter matches external schema");
        Ok(extracted)
    }

    fn logged<T>(
        result: std::result::Result<T, CompileError>,
        operation: &str,
        scenario: Option<RecommendScenario>,
    ) -> std::result::Result<T, CompileError> {
        if let Err(err) = &result {
            tracing::warn!(
                operation,
                scenario = scenario.map(|s| s.as_str()),
                kind = ?err.kind(),
                "Filter rejected: {}",
                err
            );
        }
        result
    }
}
