//! DDL reader built on sqlparser's MySQL dialect

use sqlparser::ast::{
    ColumnDef, ColumnOption, CreateTable, Expr, ForeignKeyConstraint, IndexColumn, ObjectName,
    PrimaryKeyConstraint, Statement, TableConstraint, UnaryOperator, Value,
};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

use super::metadata::*;
use crate::error::Result;

/// Read every `CREATE TABLE` in `sql`, in file order
///
/// Other statements (inserts, indexes, views) are ignored.
pub fn parse_schema(sql: &str) -> Result<Vec<TableMetadata>> {
    let statements = Parser::parse_sql(&MySqlDialect {}, sql)?;
    Ok(statements
        .iter()
        .filter_map(|stmt| match stmt {
            Statement::CreateTable(create) => Some(read_table(create)),
            _ => None,
        })
        .collect())
}

fn read_table(create: &CreateTable) -> TableMetadata {
    let mut table = TableMetadata {
        name: object_name(&create.name),
        ..Default::default()
    };

    for def in &create.columns {
        let (column, inline_pk) = read_column(def);
        if inline_pk {
            table.primary_key = Some(PrimaryKey {
                columns: vec![column.name.clone()],
            });
        }
        table.columns.push(column);
    }

    for constraint in &create.constraints {
        match constraint {
            TableConstraint::PrimaryKey(PrimaryKeyConstraint { columns, .. }) => {
                let names: Vec<String> = columns.iter().map(index_column_name).collect();
                // Key columns are implicitly NOT NULL
                table
                    .columns
                    .iter_mut()
                    .filter(|c| names.contains(&c.name))
                    .for_each(|c| c.nullable = false);
                table.primary_key = Some(PrimaryKey { columns: names });
            }
            TableConstraint::ForeignKey(ForeignKeyConstraint {
                columns,
                foreign_table,
                ..
            }) => {
                let referenced_table = object_name(foreign_table);
                table
                    .foreign_keys
                    .extend(columns.iter().map(|column| ForeignKeyMetadata {
                        column_name: column.value.clone(),
                        referenced_table: referenced_table.clone(),
                    }));
            }
            _ => {}
        }
    }

    table
}

/// Column plus whether it carries an inline `PRIMARY KEY`
fn read_column(def: &ColumnDef) -> (ColumnMetadata, bool) {
    let mut column = ColumnMetadata {
        name: def.name.value.clone(),
        data_type: def.data_type.to_string(),
        nullable: true,
        default_value: None,
        is_auto_increment: false,
    };
    let mut inline_pk = false;

    for option in def.options.iter().map(|o| &o.option) {
        match option {
            ColumnOption::NotNull => column.nullable = false,
            ColumnOption::Null => column.nullable = true,
            ColumnOption::Default(expr) => column.default_value = Some(read_default(expr)),
            ColumnOption::PrimaryKey(_) => {
                inline_pk = true;
                column.nullable = false;
            }
            // MySQL's AUTO_INCREMENT has no dedicated option
            ColumnOption::DialectSpecific(tokens) => {
                if tokens
                    .iter()
                    .any(|t| t.to_string().eq_ignore_ascii_case("AUTO_INCREMENT"))
                {
                    column.is_auto_increment = true;
                }
            }
            _ => {}
        }
    }

    (column, inline_pk)
}

fn read_default(expr: &Expr) -> DefaultExpr {
    match expr {
        Expr::Value(v) => match &v.value {
            Value::Null => DefaultExpr::Null,
            Value::Number(n, _) => DefaultExpr::Number(n.to_string()),
            Value::SingleQuotedString(s) | Value::DoubleQuotedString(s) => {
                DefaultExpr::String(s.clone())
            }
            Value::Boolean(b) => DefaultExpr::Boolean(*b),
            other => DefaultExpr::Expression(other.to_string()),
        },
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr: inner,
        } => match read_default(inner) {
            DefaultExpr::Number(n) => DefaultExpr::Number(format!("-{}", n)),
            _ => DefaultExpr::Expression(expr.to_string()),
        },
        Expr::Nested(inner) => read_default(inner),
        other => DefaultExpr::Expression(other.to_string()),
    }
}

/// Last part of a possibly qualified name
fn object_name(name: &ObjectName) -> String {
    name.0
        .last()
        .and_then(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn index_column_name(column: &IndexColumn) -> String {
    match &column.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let sql = r#"
            CREATE TABLE t_client (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(100)
            );
        "#;

        let tables = parse_schema(sql).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "t_client");
        assert_eq!(tables[0].columns.len(), 3);

        let id = tables[0].get_column("id").unwrap();
        assert!(id.is_auto_increment);
        assert!(!id.nullable);
        assert!(tables[0].get_column("email").unwrap().nullable);
        assert!(tables[0].is_primary_key_column("id"));
    }

    #[test]
    fn test_parse_defaults() {
        let sql = r#"
            CREATE TABLE t_order (
                id BIGINT PRIMARY KEY,
                status INT NOT NULL DEFAULT 0,
                total_sum DECIMAL(16, 2) DEFAULT 0.00,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                memo VARCHAR(200) DEFAULT NULL
            );
        "#;

        let tables = parse_schema(sql).unwrap();
        let table = &tables[0];
        let default_of = |name: &str| table.get_column(name).unwrap().default_value.clone();

        assert_eq!(default_of("status"), Some(DefaultExpr::Number("0".into())));
        assert_eq!(default_of("total_sum"), Some(DefaultExpr::Number("0.00".into())));
        assert!(matches!(
            default_of("created_at"),
            Some(DefaultExpr::Expression(e)) if e.eq_ignore_ascii_case("CURRENT_TIMESTAMP")
        ));
        assert_eq!(default_of("memo"), Some(DefaultExpr::Null));
        assert_eq!(default_of("id"), None);
    }

    #[test]
    fn test_parse_literal_defaults() {
        let sql = r#"
            CREATE TABLE t_flags (
                id BIGINT PRIMARY KEY,
                quoted VARCHAR(10) DEFAULT "new",
                escaped VARCHAR(10) DEFAULT 'it''s',
                active TINYINT(1) DEFAULT TRUE,
                hidden TINYINT(1) DEFAULT FALSE,
                delta INT DEFAULT -5
            );
        "#;

        let tables = parse_schema(sql).unwrap();
        let table = &tables[0];
        let default_of = |name: &str| table.get_column(name).unwrap().default_value.clone();

        assert_eq!(default_of("quoted"), Some(DefaultExpr::String("new".into())));
        assert_eq!(default_of("escaped"), Some(DefaultExpr::String("it's".into())));
        assert_eq!(default_of("active"), Some(DefaultExpr::Boolean(true)));
        assert_eq!(default_of("hidden"), Some(DefaultExpr::Boolean(false)));
        assert_eq!(default_of("delta"), Some(DefaultExpr::Number("-5".into())));
    }

    #[test]
    fn test_parse_foreign_key() {
        let sql = r#"
            CREATE TABLE t_order (
                id BIGINT PRIMARY KEY,
                client_id BIGINT NOT NULL,
                FOREIGN KEY (client_id) REFERENCES t_client(id)
            );
        "#;

        let tables = parse_schema(sql).unwrap();
        assert_eq!(tables[0].foreign_keys.len(), 1);
        assert_eq!(tables[0].foreign_keys[0].column_name, "client_id");
        assert_eq!(tables[0].foreign_keys[0].referenced_table, "t_client");
        assert_eq!(tables[0].foreign_table_of("client_id"), Some("t_client"));
        assert_eq!(tables[0].foreign_table_of("id"), None);
    }

    #[test]
    fn test_parse_composite_primary_key() {
        let sql = r#"
            CREATE TABLE t_order_item (
                order_id BIGINT,
                product_id BIGINT,
                quantity INT NOT NULL,
                PRIMARY KEY (order_id, product_id)
            );
        "#;

        let tables = parse_schema(sql).unwrap();
        let pk = tables[0].primary_key.as_ref().unwrap();
        assert!(pk.is_composite());
        assert_eq!(pk.columns, vec!["order_id", "product_id"]);
        assert!(!tables[0].get_column("order_id").unwrap().nullable);
    }

    #[test]
    fn test_non_table_statements_are_skipped() {
        let sql = r#"
            CREATE TABLE t_a (id BIGINT PRIMARY KEY);
            INSERT INTO t_a (id) VALUES (1);
        "#;

        let tables = parse_schema(sql).unwrap();
        assert_eq!(tables.len(), 1);
    }
}
