use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Logical column type, independent of the generated language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticType {
    Integer,
    Decimal,
    DateTime,
    String,
    /// Synthetic primary key id, wrapped in the runtime's key value type
    PkId,
}

impl SemanticType {
    /// Integer-valued types usable as an auto-loadable key
    pub fn is_integer(self) -> bool {
        matches!(self, SemanticType::Integer | SemanticType::PkId)
    }
}

/// A column default, already typed for the column it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Decimal(Decimal),
    String(String),
    /// Datetime defaults are always materialised as "now" at construction
    CurrentTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Physical column name
    pub name: String,

    /// Accessor name used in generated getters and setters
    pub property: String,

    pub semantic_type: SemanticType,

    pub nullable: bool,

    pub read_only: bool,

    pub primary_key: bool,

    /// Never set on foreign key columns
    pub default: Option<DefaultValue>,

    /// Physical name of the referenced table
    pub foreign_key: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        let name = name.into();
        Self {
            property: name.to_lowercase(),
            name,
            semantic_type,
            nullable: false,
            read_only: false,
            primary_key: false,
            default: None,
            foreign_key: None,
        }
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn references(mut self, table: impl Into<String>) -> Self {
        self.foreign_key = Some(table.into());
        self
    }

    pub fn has_fk(&self) -> bool {
        self.foreign_key.is_some()
    }

    /// True when this column's foreign key points at `table`
    pub fn references_table(&self, table: &str) -> bool {
        self.foreign_key.as_deref() == Some(table)
    }
}
