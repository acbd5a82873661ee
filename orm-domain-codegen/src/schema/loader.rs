//! Resolve parsed DDL metadata and configuration into a [`Schema`]

use std::str::FromStr;

use heck::{ToPascalCase, ToSnakeCase};
use rust_decimal::Decimal;
use tracing::warn;

use super::{Column, DefaultValue, Relation, RelationSide, Schema, SemanticType, Table};
use crate::config::{CodegenConfig, TableOverride};
use crate::error::{CodegenError, Result};
use crate::parser::{self, ColumnMetadata, DefaultExpr, TableMetadata};

/// Read the configured schema file and build the schema model from it
pub fn load_schema(config: &CodegenConfig) -> Result<Schema> {
    let sql = std::fs::read_to_string(&config.schema_file)?;
    let tables = parser::parse_schema(&sql)?;
    build_schema(tables, config)
}

/// Build the schema model from parsed tables plus the config's overrides and
/// relations
pub fn build_schema(tables: Vec<TableMetadata>, config: &CodegenConfig) -> Result<Schema> {
    for name in config.tables.keys() {
        if !tables.iter().any(|t| &t.name == name) {
            warn!("Override for unknown table '{}' ignored", name);
        }
    }

    let tables = tables
        .iter()
        .map(|t| {
            let empty = TableOverride::default();
            let overrides = config.tables.get(&t.name).unwrap_or(&empty);
            build_table(t, overrides, &config.table_prefix)
        })
        .collect::<Result<Vec<_>>>()?;

    let relations = config
        .relations
        .iter()
        .map(|r| {
            Relation::new(
                r.kind,
                RelationSide::new(&r.one.class, r.one.property.as_deref()),
                RelationSide::new(&r.many.class, r.many.property.as_deref()),
            )
        })
        .collect();

    Schema::new(tables, relations)
}

fn build_table(meta: &TableMetadata, overrides: &TableOverride, prefix: &str) -> Result<Table> {
    let class_name = overrides
        .class_name
        .clone()
        .unwrap_or_else(|| class_name_for(&meta.name, prefix));
    let mut table = Table::new(&meta.name, class_name);

    let synthetic_pk = meta
        .primary_key
        .as_ref()
        .filter(|pk| !pk.is_composite())
        .and_then(|pk| pk.columns.first())
        .and_then(|name| meta.get_column(name))
        .filter(|c| c.is_auto_increment)
        .map(|c| c.name.as_str());

    for col in &meta.columns {
        let mut semantic_type = semantic_type_for(&meta.name, col)?;
        if synthetic_pk == Some(col.name.as_str()) && semantic_type == SemanticType::Integer {
            semantic_type = SemanticType::PkId;
        }

        let property = overrides
            .properties
            .get(&col.name)
            .cloned()
            .unwrap_or_else(|| col.name.to_snake_case());

        let mut column = Column::new(&col.name, semantic_type).property(property);
        column.nullable = col.nullable;
        column.read_only = overrides.read_only.contains(&col.name);
        column.primary_key = meta.is_primary_key_column(&col.name);
        column.foreign_key = meta.foreign_table_of(&col.name).map(str::to_string);

        if let Some(expr) = &col.default_value {
            if column.has_fk() {
                warn!(
                    "Dropping default {} on foreign key column {}.{}",
                    expr, meta.name, col.name
                );
            } else {
                column.default = parse_default(&meta.name, &column, expr)?;
            }
        }

        table.columns.push(column);
    }

    // Overrides must name real columns
    for name in overrides.read_only.iter().chain(overrides.properties.keys()) {
        table.get_column(name)?;
    }

    Ok(table)
}

/// PascalCase class name for a table, after stripping `prefix`
pub fn class_name_for(table_name: &str, prefix: &str) -> String {
    let stripped = match table_name.get(..prefix.len()) {
        Some(head)
            if !prefix.is_empty()
                && table_name.len() > prefix.len()
                && head.eq_ignore_ascii_case(prefix) =>
        {
            &table_name[prefix.len()..]
        }
        _ => table_name,
    };
    stripped.to_lowercase().to_pascal_case()
}

/// Map a SQL type to its semantic type
fn semantic_type_for(table: &str, column: &ColumnMetadata) -> Result<SemanticType> {
    let data_type = column.data_type.to_lowercase();
    let base = data_type
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    let semantic_type = match base {
        "bigint" | "int" | "integer" | "mediumint" | "smallint" | "tinyint" => {
            SemanticType::Integer
        }
        "decimal" | "numeric" | "dec" => SemanticType::Decimal,
        "datetime" | "timestamp" | "date" => SemanticType::DateTime,
        "char" | "varchar" | "character" | "text" | "tinytext" | "mediumtext" | "longtext"
        | "nvarchar" => SemanticType::String,
        _ => {
            return Err(CodegenError::UnsupportedDataType {
                table: table.to_string(),
                column: column.name.clone(),
                data_type: column.data_type.clone(),
            })
        }
    };

    Ok(semantic_type)
}

/// Typed default for `column`; `NULL` means none
///
/// Datetime columns only ever default to the current time. Booleans are
/// accepted on integer columns as 0/1.
fn parse_default(
    table: &str,
    column: &Column,
    expr: &DefaultExpr,
) -> Result<Option<DefaultValue>> {
    let invalid = || CodegenError::InvalidDefault {
        table: table.to_string(),
        column: column.name.clone(),
        value: expr.to_string(),
    };

    let default = match (column.semantic_type, expr) {
        (_, DefaultExpr::Null) => return Ok(None),
        (SemanticType::DateTime, _) => DefaultValue::CurrentTime,
        (SemanticType::Integer | SemanticType::PkId, DefaultExpr::Boolean(b)) => {
            DefaultValue::Integer(i64::from(*b))
        }
        (
            SemanticType::Integer | SemanticType::PkId,
            DefaultExpr::Number(text) | DefaultExpr::String(text),
        ) => DefaultValue::Integer(text.trim().parse::<i64>().map_err(|_| invalid())?),
        (SemanticType::Decimal, DefaultExpr::Number(text) | DefaultExpr::String(text)) => {
            DefaultValue::Decimal(Decimal::from_str(text.trim()).map_err(|_| invalid())?)
        }
        (SemanticType::String, DefaultExpr::String(text) | DefaultExpr::Number(text)) => {
            DefaultValue::String(text.clone())
        }
        _ => return Err(invalid()),
    };

    Ok(Some(default))
}
