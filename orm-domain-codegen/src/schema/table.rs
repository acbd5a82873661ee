use super::column::Column;
use crate::error::{CodegenError, Result};

/// How a table's primary key can be used by generated code
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyShape<'a> {
    /// Exactly one integer primary key column: objects can be loaded by id
    Strong(&'a Column),
    /// More than one primary key column
    Ambiguous,
    /// No primary key, or a single non-integer one
    Unsuitable,
}

impl<'a> KeyShape<'a> {
    pub fn is_strong(&self) -> bool {
        matches!(self, KeyShape::Strong(_))
    }

    pub fn key_column(&self) -> Option<&'a Column> {
        match self {
            KeyShape::Strong(column) => Some(column),
            KeyShape::Ambiguous | KeyShape::Unsuitable => None,
        }
    }
}

impl std::fmt::Display for KeyShape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyShape::Strong(column) => write!(f, "strong ({})", column.name),
            KeyShape::Ambiguous => f.write_str("ambiguous"),
            KeyShape::Unsuitable => f.write_str("unsuitable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Physical table name
    pub name: String,

    /// Generated class name
    pub class_name: String,

    /// Columns in declaration order; drives emission and include order
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn get_column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CodegenError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    pub fn foreign_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.has_fk())
    }

    /// First column whose foreign key points at `table`
    pub fn find_fk_to(&self, table: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.references_table(table))
    }

    /// Classify the primary key; recomputed on every call
    pub fn key_shape(&self) -> KeyShape<'_> {
        let mut pk = self.primary_key_columns();
        match (pk.next(), pk.next()) {
            (Some(column), None) if column.semantic_type.is_integer() => KeyShape::Strong(column),
            (Some(_), Some(_)) => KeyShape::Ambiguous,
            _ => KeyShape::Unsuitable,
        }
    }
}
