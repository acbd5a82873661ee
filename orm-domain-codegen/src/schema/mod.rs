//! Typed schema model: tables, columns and relations.
//!
//! A [`Schema`] is validated once when it is built and is read-only from then
//! on, so the generators never need fallback branches for malformed input.

mod column;
mod loader;
mod relation;
mod table;

pub use column::*;
pub use loader::*;
pub use relation::*;
pub use table::*;

use std::collections::{BTreeMap, HashMap};

use crate::error::{CodegenError, Result};

#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Tables keyed by physical name; iteration order is the generation order
    tables: BTreeMap<String, Table>,

    /// Class name -> physical table name
    classes: HashMap<String, String>,

    /// Relations in declaration order
    relations: Vec<Relation>,
}

impl Schema {
    /// Build and validate a schema
    pub fn new(tables: Vec<Table>, relations: Vec<Relation>) -> Result<Self> {
        let mut schema = Schema::default();

        for table in tables {
            if schema.tables.contains_key(&table.name) {
                return Err(CodegenError::ValidationError(format!(
                    "duplicate table {}",
                    table.name
                )));
            }
            if let Some(other) = schema.classes.get(&table.class_name) {
                return Err(CodegenError::ValidationError(format!(
                    "tables {} and {} both map to class {}",
                    other, table.name, table.class_name
                )));
            }
            schema
                .classes
                .insert(table.class_name.clone(), table.name.clone());
            schema.tables.insert(table.name.clone(), table);
        }

        for table in schema.tables.values() {
            schema.check_table(table)?;
        }

        for relation in &relations {
            for side in [relation.one(), relation.many()] {
                schema.find_table_by_class(&side.class)?;
            }
        }
        schema.relations = relations;

        Ok(schema)
    }

    fn check_table(&self, table: &Table) -> Result<()> {
        let synthetic = table
            .columns
            .iter()
            .filter(|c| c.semantic_type == SemanticType::PkId)
            .count();
        if synthetic > 1 {
            return Err(CodegenError::ValidationError(format!(
                "table {} has {} synthetic primary key columns",
                table.name, synthetic
            )));
        }

        for column in &table.columns {
            if let Some(target) = &column.foreign_key {
                if !self.tables.contains_key(target) {
                    return Err(CodegenError::ValidationError(format!(
                        "column {}.{} references unknown table {}",
                        table.name, column.name, target
                    )));
                }
                if column.default.is_some() {
                    return Err(CodegenError::ValidationError(format!(
                        "foreign key column {}.{} cannot carry a default",
                        table.name, column.name
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn find_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| CodegenError::TableNotFound(name.to_string()))
    }

    pub fn find_table_by_class(&self, class_name: &str) -> Result<&Table> {
        self.classes
            .get(class_name)
            .and_then(|name| self.tables.get(name))
            .ok_or_else(|| CodegenError::ClassNotFound(class_name.to_string()))
    }

    /// Every relation with `class_name` on either side, in declaration order
    pub fn relations_for_class(&self, class_name: &str) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|r| r.touches(class_name))
            .collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
