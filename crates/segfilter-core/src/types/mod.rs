//! Type system for segfilter
//!
//! This module contains:
//! - Declared field data types
//! - The schema registry
//! - Literal values carried by rule conditions

pub mod data_type;
pub mod schema;
pub mod value;

pub use data_type::DataType;
pub use schema::SchemaRegistry;
pub use value::Literal;
