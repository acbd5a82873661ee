use super::relations::TableRelations;
use super::EmitOptions;
use crate::error::Result;
use crate::schema::{KeyShape, Schema, Table};

/// Per-table emission state, built fresh for every table and dropped once its
/// artifacts are written.
#[derive(Debug)]
pub struct TableContext<'a> {
    pub schema: &'a Schema,
    pub table: &'a Table,
    pub key: KeyShape<'a>,
    pub relations: TableRelations<'a>,
    pub options: &'a EmitOptions,
}

impl<'a> TableContext<'a> {
    pub fn new(schema: &'a Schema, table: &'a Table, options: &'a EmitOptions) -> Result<Self> {
        Ok(Self {
            schema,
            table,
            key: table.key_shape(),
            relations: TableRelations::resolve(schema, table)?,
            options,
        })
    }

    pub fn class_name(&self) -> &'a str {
        &self.table.class_name
    }

    /// Weak tables cannot be re-fetched by id
    pub fn is_weak(&self) -> bool {
        !self.key.is_strong()
    }

    pub fn include_path(&self, class_name: &str) -> String {
        format!("{}{}.h", self.options.include_prefix, class_name)
    }
}
