//! Semantic type to runtime type mapping

use crate::schema::{Column, KeyShape, SemanticType};

/// A semantic type as seen by the generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
    /// Accessor return / parameter type
    pub declared: &'static str,

    /// `Yb::Value` method extracting the typed value
    pub extraction: &'static str,
}

impl MappedType {
    /// Parameter declaration for a setter argument named `param`
    ///
    /// Strings are passed by reference, everything else by value.
    pub fn param(&self, semantic_type: SemanticType, param: &str) -> String {
        if semantic_type == SemanticType::String {
            format!("{} &{}", self.declared, param)
        } else {
            format!("{} {}", self.declared, param)
        }
    }
}

/// Maps semantic column types onto the ORM runtime's value API
pub struct TypeMapper;

impl TypeMapper {
    pub fn map(semantic_type: SemanticType) -> MappedType {
        let (declared, extraction) = match semantic_type {
            SemanticType::Integer => ("Yb::LongInt", "as_longint()"),
            SemanticType::DateTime => ("Yb::DateTime", "as_date_time()"),
            SemanticType::String => ("const std::string", "as_string()"),
            SemanticType::Decimal => ("Yb::Decimal", "as_decimal()"),
            SemanticType::PkId => ("const Yb::PKIDValue", "as_pkid()"),
        };
        MappedType {
            declared,
            extraction,
        }
    }

    /// Type used by a column's getter: the strong key column is wrapped as a
    /// primary key id whatever its declared type
    pub fn getter_type(column: &Column, key: &KeyShape<'_>) -> SemanticType {
        match key.key_column() {
            Some(key_column) if key_column.name == column.name => SemanticType::PkId,
            _ => column.semantic_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_table() {
        let cases = [
            (SemanticType::Integer, "Yb::LongInt", "as_longint()"),
            (SemanticType::DateTime, "Yb::DateTime", "as_date_time()"),
            (SemanticType::String, "const std::string", "as_string()"),
            (SemanticType::Decimal, "Yb::Decimal", "as_decimal()"),
            (SemanticType::PkId, "const Yb::PKIDValue", "as_pkid()"),
        ];
        for (semantic_type, declared, extraction) in cases {
            let mapped = TypeMapper::map(semantic_type);
            assert_eq!(mapped.declared, declared);
            assert_eq!(mapped.extraction, extraction);
        }
    }

    #[test]
    fn test_param() {
        let string = TypeMapper::map(SemanticType::String);
        assert_eq!(
            string.param(SemanticType::String, "name__"),
            "const std::string &name__"
        );
        let int = TypeMapper::map(SemanticType::Integer);
        assert_eq!(int.param(SemanticType::Integer, "n__"), "Yb::LongInt n__");
    }

    #[test]
    fn test_getter_type_wraps_strong_key() {
        let id = Column::new("ID", SemanticType::Integer).primary_key();
        let name = Column::new("NAME", SemanticType::String);
        let strong = KeyShape::Strong(&id);

        assert_eq!(TypeMapper::getter_type(&id, &strong), SemanticType::PkId);
        assert_eq!(TypeMapper::getter_type(&name, &strong), SemanticType::String);
        assert_eq!(
            TypeMapper::getter_type(&id, &KeyShape::Ambiguous),
            SemanticType::Integer
        );
    }
}
