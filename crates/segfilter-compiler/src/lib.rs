//! segfilter Compiler - rule tree to backend filter text
//!
//! Validates a rule tree against a tenant schema and compiles it into:
//! - a ReQL-style filter expression for the recommendation engine
//! - a parameterized store-query template plus ordered parameters
//!
//! Compilation is pure and deterministic: the only shared input is the
//! read-only `SchemaRegistry`.

pub mod codegen;
pub mod compiler;
pub mod error;
pub mod format;
pub mod schema_check;
pub mod validator;

// Re-export main types
pub use codegen::{QueryParam, ReqlCompiler, StoreQuery, StoreQueryCompiler};
pub use compiler::{Compiler, CompilerOptions};
pub use error::{CompileError, ErrorKind, Result, SchemaMismatch, TypeMismatch};
pub use format::{FormattedValue, ValueFormatter};
pub use schema_check::{ExtractedFields, FieldExtractor, SchemaReconciler};
pub use validator::Validator;
