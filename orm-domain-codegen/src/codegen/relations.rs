//! Relation resolution: decides, per table, which side of each relation it is
//! on and what that side has to emit.

use std::collections::BTreeSet;

use crate::error::{CodegenError, Result};
use crate::schema::{Column, Relation, RelationKind, Schema, Side, Table};

/// A managed collection on the "one" side of a relation
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<'a> {
    /// Property name; the member is `<property>_`
    pub property: &'a str,

    /// Class of the collected objects
    pub many_class: &'a str,

    /// Column in the many-side table holding this table's id
    pub fk_column: &'a Column,
}

/// Accessors on the "many" side of a relation
#[derive(Debug, Clone, PartialEq)]
pub struct Reference<'a> {
    pub property: &'a str,

    /// Class of the referenced parent
    pub one_class: &'a str,

    /// Column in this table holding the parent's id
    pub fk_column: &'a Column,

    /// Property of the parent's key column
    pub one_key_property: &'a str,

    /// Parent's collection property, kept in sync by the setter
    pub backref: Option<&'a str>,
}

/// Everything a table emits because of relations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRelations<'a> {
    pub collections: Vec<Collection<'a>>,
    pub references: Vec<Reference<'a>>,
}

impl<'a> TableRelations<'a> {
    /// Classify every relation touching `table`'s class, in schema order
    pub fn resolve(schema: &'a Schema, table: &'a Table) -> Result<Self> {
        let class = table.class_name.as_str();
        let mut resolved = TableRelations::default();

        for relation in schema.relations_for_class(class) {
            if relation.kind != RelationKind::OneToMany {
                continue;
            }
            if let Some(property) = relation.property_on(Side::One, class) {
                resolved
                    .collections
                    .push(resolve_collection(schema, table, relation, property)?);
            }
            if let Some(property) = relation.property_on(Side::Many, class) {
                resolved
                    .references
                    .push(resolve_reference(schema, table, relation, property)?);
            }
        }

        Ok(resolved)
    }

    /// Classes to forward-declare ahead of the class body, sorted and unique
    pub fn forward_declarations(&self) -> BTreeSet<&'a str> {
        self.collections.iter().map(|c| c.many_class).collect()
    }
}

fn resolve_collection<'a>(
    schema: &'a Schema,
    table: &'a Table,
    relation: &'a Relation,
    property: &'a str,
) -> Result<Collection<'a>> {
    let many_class = relation.many().class.as_str();
    let many_table = schema.find_table_by_class(many_class)?;
    let fk_column =
        many_table
            .find_fk_to(&table.name)
            .ok_or_else(|| CodegenError::MissingForeignKey {
                one: table.class_name.clone(),
                many: many_class.to_string(),
                one_table: table.name.clone(),
                many_table: many_table.name.clone(),
            })?;

    Ok(Collection {
        property,
        many_class,
        fk_column,
    })
}

fn resolve_reference<'a>(
    schema: &'a Schema,
    table: &'a Table,
    relation: &'a Relation,
    property: &'a str,
) -> Result<Reference<'a>> {
    let one_class = relation.one().class.as_str();
    let one_table = schema.find_table_by_class(one_class)?;
    let fk_column =
        table
            .find_fk_to(&one_table.name)
            .ok_or_else(|| CodegenError::MissingForeignKey {
                one: one_class.to_string(),
                many: table.class_name.clone(),
                one_table: one_table.name.clone(),
                many_table: table.name.clone(),
            })?;
    let key = one_table
        .key_shape()
        .key_column()
        .ok_or_else(|| CodegenError::RelationTargetNotStrong {
            one: one_class.to_string(),
            many: table.class_name.clone(),
            one_table: one_table.name.clone(),
        })?;

    Ok(Reference {
        property,
        one_class,
        fk_column,
        one_key_property: &key.property,
        backref: relation.one().property.as_deref(),
    })
}
