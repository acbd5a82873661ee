use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    #[default]
    OneToMany,
    /// Accepted in configuration; produces no code
    ManyToMany,
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationKind::OneToMany => f.write_str("one-to-many"),
            RelationKind::ManyToMany => f.write_str("many-to-many"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSide {
    pub class: String,

    /// Accessor generated on this side; a side without one emits nothing
    pub property: Option<String>,
}

impl RelationSide {
    pub fn new(class: impl Into<String>, property: Option<&str>) -> Self {
        Self {
            class: class.into(),
            property: property.map(str::to_string),
        }
    }
}

/// Which end of a one-to-many relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Parent; owns the collection
    One,
    /// Child; owns the foreign key
    Many,
}

/// A named relation between two classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    one: RelationSide,
    many: RelationSide,
}

impl Relation {
    pub fn new(kind: RelationKind, one: RelationSide, many: RelationSide) -> Self {
        Self { kind, one, many }
    }

    pub fn one_to_many(one: RelationSide, many: RelationSide) -> Self {
        Self::new(RelationKind::OneToMany, one, many)
    }

    pub fn one(&self) -> &RelationSide {
        &self.one
    }

    pub fn many(&self) -> &RelationSide {
        &self.many
    }

    pub fn side(&self, side: Side) -> &RelationSide {
        match side {
            Side::One => &self.one,
            Side::Many => &self.many,
        }
    }

    pub fn touches(&self, class: &str) -> bool {
        self.one.class == class || self.many.class == class
    }

    /// Accessor name on `side` when that side is `class`
    pub fn property_on(&self, side: Side, class: &str) -> Option<&str> {
        let side = self.side(side);
        if side.class == class {
            side.property.as_deref()
        } else {
            None
        }
    }
}
