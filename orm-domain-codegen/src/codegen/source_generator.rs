//! Source generator - emits the definition unit (`<Class>.cpp`) for a table

use super::context::TableContext;
use super::naming::{cpp_string_literal, registrator_name};
use crate::error::Result;
use crate::schema::DefaultValue;

/// Render the source for one table; tabs are left unexpanded
pub fn generate_source(ctx: &TableContext<'_>) -> Result<String> {
    let class_name = ctx.class_name();
    let table_name = cpp_string_literal(&ctx.table.name);
    let mut code = String::new();

    code.push_str(&format!(
        "#include \"{}\"\n\
         #include \"orm/DomainFactory.h\"\n\
         #include \"orm/MetaDataSingleton.h\"\n\n\
         namespace {} {{\n\n",
        ctx.include_path(class_name),
        ctx.options.namespace
    ));

    // Constructor for new objects, not yet bound to a session
    code.push_str(&format!(
        "{class_name}::{class_name}()\n\
         \t: Yb::DomainObject(Yb::theMetaData::instance(), {table_name})\n"
    ));
    write_ctor_body(ctx, &mut code);

    code.push_str(&format!(
        "\n{class_name}::{class_name}(Yb::SessionBase &session)\n\
         \t: Yb::DomainObject(session, {table_name})\n"
    ));
    write_ctor_body(ctx, &mut code);

    write_finder(ctx, &mut code);
    write_registrator(ctx, &mut code);

    code.push_str(&format!(
        "}} // end namespace {}\n\n// vim:ts=4:sts=4:sw=4:et:\n",
        ctx.options.namespace
    ));

    Ok(code)
}

/// Apply column defaults; weak tables get an empty body
fn write_ctor_body(ctx: &TableContext<'_>, code: &mut String) {
    if ctx.is_weak() {
        code.push_str("{}\n");
        return;
    }

    code.push_str("{\n");
    for column in ctx.table.columns.iter().filter(|c| !c.has_fk()) {
        let Some(default) = &column.default else {
            continue;
        };
        let value = match default {
            DefaultValue::Integer(n) => format!("(Yb::LongInt){}", n),
            DefaultValue::Decimal(d) => format!("Yb::Decimal({})", d),
            DefaultValue::CurrentTime => "Yb::now()".to_string(),
            DefaultValue::String(s) => format!("std::string({})", cpp_string_literal(s)),
        };
        code.push_str(&format!(
            "\tset_attr({}, Yb::Value({}));\n",
            cpp_string_literal(&column.name),
            value
        ));
    }
    code.push_str("}\n");
}

/// Static `find`: load rows through the session and wrap each one
fn write_finder(ctx: &TableContext<'_>, code: &mut String) {
    let class_name = ctx.class_name();
    let table_name = cpp_string_literal(&ctx.table.name);
    code.push_str(&format!(
        "\n{class_name}::ListPtr\n\
         {class_name}::find(Yb::SessionBase &session,\n\
         \t\tconst Yb::Filter &filter, const Yb::StrList order_by, int max_n)\n\
         {{\n\
         \t{class_name}::ListPtr lst(new {class_name}::List());\n\
         \tYb::LoadedRows rows = session.load_collection({table_name}, filter, order_by, max_n);\n\
         \tif (rows.get()) {{\n\
         \t\tstd::vector<Yb::RowData * > ::const_iterator it = rows->begin(), end = rows->end();\n\
         \t\tfor (; it != end; ++it)\n\
         \t\t\tlst->push_back({class_name}(session, **it));\n\
         \t}}\n\
         \treturn lst;\n\
         }}\n\n"
    ));
}

/// Registration binds the physical table name to a creator for this class
fn write_registrator(ctx: &TableContext<'_>, code: &mut String) {
    let class_name = ctx.class_name();
    let registrator = registrator_name(class_name);
    let table_name = cpp_string_literal(&ctx.table.name);
    code.push_str(&format!(
        "void {registrator}::register_domain(Yb::DomainFactory &factory)\n\
         {{\n\
         \tfactory.register_creator({table_name},\n\
         \t\tYb::CreatorPtr(new Yb::DomainCreator<{class_name}>()));\n\
         }}\n\n\
         {registrator}::{registrator}(Yb::DomainFactory &factory)\n\
         {{\n\
         \tregister_domain(factory);\n\
         }}\n\n"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::EmitOptions;
    use crate::schema::{Column, Schema, SemanticType, Table};
    use rust_decimal::Decimal;

    fn render(table: Table) -> String {
        let schema = Schema::new(vec![table], vec![]).unwrap();
        let options = EmitOptions::default();
        let table = schema.tables().next().unwrap();
        let ctx = TableContext::new(&schema, table, &options).unwrap();
        generate_source(&ctx).unwrap()
    }

    #[test]
    fn test_strong_defaults() {
        let code = render(
            Table::new("T_ORDER", "Order")
                .column(Column::new("ID", SemanticType::PkId).primary_key())
                .column(
                    Column::new("STATUS", SemanticType::Integer)
                        .default_value(DefaultValue::Integer(-1)),
                )
                .column(
                    Column::new("TOTAL", SemanticType::Decimal)
                        .default_value(DefaultValue::Decimal(Decimal::new(1050, 2))),
                )
                .column(
                    Column::new("CREATED_AT", SemanticType::DateTime)
                        .default_value(DefaultValue::CurrentTime),
                )
                .column(
                    Column::new("MEMO", SemanticType::String)
                        .default_value(DefaultValue::String("say \"hi\"".to_string())),
                )
                .column(Column::new("PLAIN", SemanticType::Integer)),
        );

        let body = "{\n\
            \tset_attr(\"STATUS\", Yb::Value((Yb::LongInt)-1));\n\
            \tset_attr(\"TOTAL\", Yb::Value(Yb::Decimal(10.50)));\n\
            \tset_attr(\"CREATED_AT\", Yb::Value(Yb::now()));\n\
            \tset_attr(\"MEMO\", Yb::Value(std::string(\"say \\\"hi\\\"\")));\n\
            }\n";
        assert!(code.contains(&format!(
            "Order::Order()\n\t: Yb::DomainObject(Yb::theMetaData::instance(), \"T_ORDER\")\n{}",
            body
        )));
        assert!(code.contains(&format!(
            "Order::Order(Yb::SessionBase &session)\n\t: Yb::DomainObject(session, \"T_ORDER\")\n{}",
            body
        )));
        assert!(!code.contains("PLAIN"));
    }

    #[test]
    fn test_weak_ctor_body_is_empty() {
        let code = render(
            Table::new("T_LOG", "Log").column(
                Column::new("N", SemanticType::Integer).default_value(DefaultValue::Integer(5)),
            ),
        );
        assert!(code.contains("Log::Log()\n\t: Yb::DomainObject(Yb::theMetaData::instance(), \"T_LOG\")\n{}\n"));
        assert!(code.contains("Log::Log(Yb::SessionBase &session)\n\t: Yb::DomainObject(session, \"T_LOG\")\n{}\n"));
        assert!(!code.contains("set_attr"));
    }

    #[test]
    fn test_finder_and_registrator() {
        let code = render(
            Table::new("T_CLIENT", "Client")
                .column(Column::new("ID", SemanticType::PkId).primary_key()),
        );
        assert!(code.starts_with("#include \"domain/Client.h\"\n"));
        assert!(code.contains("Client::ListPtr\nClient::find(Yb::SessionBase &session,\n"));
        assert!(code.contains(
            "\tYb::LoadedRows rows = session.load_collection(\"T_CLIENT\", filter, order_by, max_n);\n"
        ));
        assert!(code.contains("\t\t\tlst->push_back(Client(session, **it));\n"));
        assert!(code.contains(
            "void ClientRegistrator::register_domain(Yb::DomainFactory &factory)\n{\n\
             \tfactory.register_creator(\"T_CLIENT\",\n\
             \t\tYb::CreatorPtr(new Yb::DomainCreator<Client>()));\n}\n"
        ));
        assert!(code.contains("ClientRegistrator::ClientRegistrator(Yb::DomainFactory &factory)\n{\n\tregister_domain(factory);\n}\n"));
        assert!(code.ends_with("} // end namespace Domain\n\n// vim:ts=4:sts=4:sw=4:et:\n"));
    }
}
