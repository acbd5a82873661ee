//! Naming utilities for generated C++ code

use heck::ToShoutySnakeCase;

/// Include guard for a class header
/// e.g., "OrderItem" -> "ORM_DOMAIN__ORDER_ITEM__INCLUDED"
pub fn header_guard(class_name: &str) -> String {
    format!("ORM_DOMAIN__{}__INCLUDED", class_name.to_shouty_snake_case())
}

/// Declaration unit file name
pub fn header_file_name(class_name: &str) -> String {
    format!("{}.h", class_name)
}

/// Definition unit file name
pub fn source_file_name(class_name: &str) -> String {
    format!("{}.cpp", class_name)
}

/// Error type thrown when an object of a strong class is missing
pub fn not_found_error_name(class_name: &str) -> String {
    format!("{}NotFoundByID", class_name)
}

/// Bootstrap type binding a class into the domain factory
pub fn registrator_name(class_name: &str) -> String {
    format!("{}Registrator", class_name)
}

/// Managed collection member for a relation property
pub fn collection_member(property: &str) -> String {
    format!("{}_", property)
}

/// Null-check predicate for a column
/// e.g., "CLOSED_AT" -> "is_closed_at_null"
pub fn null_checker_name(column_name: &str) -> String {
    format!("is_{}_null", column_name.to_lowercase())
}

/// Setter/relation parameter name, suffixed so it never shadows a member
pub fn param_name(property: &str) -> String {
    format!("{}__", property.to_lowercase())
}

/// Quote `value` as a C++ string literal
pub fn cpp_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_guard() {
        assert_eq!(header_guard("Client"), "ORM_DOMAIN__CLIENT__INCLUDED");
        assert_eq!(header_guard("OrderItem"), "ORM_DOMAIN__ORDER_ITEM__INCLUDED");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(header_file_name("Client"), "Client.h");
        assert_eq!(source_file_name("Client"), "Client.cpp");
    }

    #[test]
    fn test_member_names() {
        assert_eq!(not_found_error_name("Client"), "ClientNotFoundByID");
        assert_eq!(registrator_name("Client"), "ClientRegistrator");
        assert_eq!(collection_member("orders"), "orders_");
        assert_eq!(null_checker_name("CLOSED_AT"), "is_closed_at_null");
        assert_eq!(param_name("Owner"), "owner__");
    }

    #[test]
    fn test_cpp_string_literal() {
        assert_eq!(cpp_string_literal("abc"), "\"abc\"");
        assert_eq!(cpp_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(cpp_string_literal("a\\b\n"), "\"a\\\\b\\n\"");
    }
}
