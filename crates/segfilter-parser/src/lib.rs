//! segfilter Parser - JSON to rule tree parser
//!
//! Tenant filters arrive as JSON (a string or an already-decoded
//! `serde_json::Value`). This crate decodes them once into the tagged
//! `RuleNode` union so later stages never sniff map shapes again.

pub mod error;
pub mod json_parser;
pub mod rule_parser;

// Re-export main parser types
pub use error::{ParseError, Result};
pub use json_parser::JsonParser;
pub use rule_parser::RuleTreeParser;
