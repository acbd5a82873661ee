//! Error types for orm-domain-codegen

use thiserror::Error;

/// Result type alias for orm-domain-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while loading a schema or generating domain classes
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Class not found: {0}")]
    ClassNotFound(String),

    #[error("Column {column} not found in table {table}")]
    ColumnNotFound { table: String, column: String },

    #[error("Unsupported data type {data_type} for column {table}.{column}")]
    UnsupportedDataType {
        table: String,
        column: String,
        data_type: String,
    },

    #[error("Invalid default value {value} for column {table}.{column}")]
    InvalidDefault {
        table: String,
        column: String,
        value: String,
    },

    /// A relation names two classes, but the "many" table has no foreign key
    /// column pointing back at the "one" table.
    #[error("Relation {one} -> {many}: no foreign key in {many_table} references {one_table}")]
    MissingForeignKey {
        one: String,
        many: String,
        one_table: String,
        many_table: String,
    },

    #[error("Relation {one} -> {many}: table {one_table} has no single integer primary key")]
    RelationTargetNotStrong {
        one: String,
        many: String,
        one_table: String,
    },
}

impl From<sqlparser::parser::ParserError> for CodegenError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        CodegenError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
