//! segfilter SDK
//!
//! High-level API for compiling tenant segment filters against a shared
//! schema.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod scenario;

// Re-export main types
pub use builder::FilterEngineBuilder;
pub use config::EngineConfig;
pub use engine::FilterEngine;
pub use error::{Result, SdkError};
pub use scenario::RecommendScenario;

// Re-export commonly used types from dependencies
pub use segfilter_compiler::{CompileError, CompilerOptions, ErrorKind, ExtractedFields, QueryParam, StoreQuery};
pub use segfilter_core::{DataType, SchemaRegistry};
