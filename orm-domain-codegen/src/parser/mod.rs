//! SQL DDL parser module using sqlparser-rs

mod metadata;
mod schema_parser;

pub use metadata::*;
pub use schema_parser::*;
