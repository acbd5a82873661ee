//! Raw table descriptions as read from `CREATE TABLE` statements.
//!
//! Nothing here is interpreted yet: data types and defaults are kept as the
//! DDL spelled them, and the loader turns them into the typed schema.

/// One `CREATE TABLE` statement
#[derive(Debug, Clone, Default)]
pub struct TableMetadata {
    pub name: String,
    /// In declaration order
    pub columns: Vec<ColumnMetadata>,
    pub foreign_keys: Vec<ForeignKeyMetadata>,
    pub primary_key: Option<PrimaryKey>,
}

#[derive(Debug, Clone)]
pub struct ColumnMetadata {
    pub name: String,
    /// Rendered SQL type, e.g. `VARCHAR(100)`
    pub data_type: String,
    pub nullable: bool,
    pub default_value: Option<DefaultExpr>,
    pub is_auto_increment: bool,
}

/// A column's `DEFAULT` clause, with literal quoting already removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultExpr {
    Null,
    /// Numeric literal as written, sign included
    Number(String),
    /// Single- or double-quoted string, unescaped
    String(String),
    Boolean(bool),
    /// Anything else (`CURRENT_TIMESTAMP`, `NOW()`, ...) rendered back to SQL
    Expression(String),
}

impl std::fmt::Display for DefaultExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultExpr::Null => f.write_str("NULL"),
            DefaultExpr::Number(n) => f.write_str(n),
            DefaultExpr::String(s) => write!(f, "'{}'", s),
            DefaultExpr::Boolean(b) => write!(f, "{}", b),
            DefaultExpr::Expression(e) => f.write_str(e),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
}

impl PrimaryKey {
    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }
}

/// One column of a `FOREIGN KEY ... REFERENCES` clause
#[derive(Debug, Clone)]
pub struct ForeignKeyMetadata {
    pub column_name: String,
    pub referenced_table: String,
}

impl TableMetadata {
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_primary_key_column(&self, column_name: &str) -> bool {
        match &self.primary_key {
            Some(pk) => pk.columns.iter().any(|c| c == column_name),
            None => false,
        }
    }

    /// Referenced table for a foreign key column
    pub fn foreign_table_of(&self, column_name: &str) -> Option<&str> {
        self.foreign_keys
            .iter()
            .find(|fk| fk.column_name == column_name)
            .map(|fk| fk.referenced_table.as_str())
    }
}
