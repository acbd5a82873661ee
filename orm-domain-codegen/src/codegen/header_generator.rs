//! Header generator - emits the declaration unit (`<Class>.h`) for a table

use std::collections::HashSet;

use super::context::TableContext;
use super::naming::{
    collection_member, cpp_string_literal, header_guard, not_found_error_name,
    null_checker_name, param_name, registrator_name,
};
use super::relations::{Collection, Reference};
use super::type_mapper::TypeMapper;
use crate::error::Result;
use crate::schema::SemanticType;

/// Render the header for one table; tabs are left unexpanded
pub fn generate_header(ctx: &TableContext<'_>) -> Result<String> {
    let mut code = String::new();

    write_prologue(ctx, &mut code)?;
    write_not_found_error(ctx, &mut code);
    write_forward_declarations(ctx, &mut code);
    write_class_open(ctx, &mut code);
    write_constructors(ctx, &mut code);
    write_attr_wrapper(ctx, &mut code);
    write_getters(ctx, &mut code);
    write_setters(ctx, &mut code);
    write_null_checkers(ctx, &mut code);
    write_relation_accessors(ctx, &mut code);
    write_footer(ctx, &mut code);

    Ok(code)
}

/// Include guard, includes and namespace
fn write_prologue(ctx: &TableContext<'_>, code: &mut String) -> Result<()> {
    let guard = header_guard(ctx.class_name());
    code.push_str(&format!("#ifndef {}\n#define {}\n\n", guard, guard));
    code.push_str("#include \"orm/DomainObj.h\"\n");

    // One include per foreign key column, in column order
    let mut seen = HashSet::new();
    for column in ctx.table.foreign_key_columns() {
        let Some(target) = column.foreign_key.as_deref() else {
            continue;
        };
        let class_name = &ctx.schema.find_table(target)?.class_name;
        if ctx.options.dedup_includes && !seen.insert(class_name.as_str()) {
            continue;
        }
        code.push_str(&format!("#include \"{}\"\n", ctx.include_path(class_name)));
    }

    code.push_str(&format!("\nnamespace {} {{\n\n", ctx.options.namespace));
    Ok(())
}

fn write_not_found_error(ctx: &TableContext<'_>, code: &mut String) {
    if ctx.is_weak() {
        return;
    }
    let class_name = ctx.class_name();
    let error_name = not_found_error_name(class_name);
    code.push_str(&format!(
        "class {error_name}: public Yb::ObjectNotFoundByKey\n\
         {{\n\
         public:\n\
         \t{error_name}(Yb::LongInt id)\n\
         \t\t: Yb::ObjectNotFoundByKey(\"{class_name} with ID = \" +\n\
         \t\t\tboost::lexical_cast<std::string>(id) + \" not found\")\n\
         \t{{}}\n\
         }};\n\n"
    ));
}

fn write_forward_declarations(ctx: &TableContext<'_>, code: &mut String) {
    for class_name in ctx.relations.forward_declarations() {
        code.push_str(&format!("class {};\n", class_name));
    }
    code.push('\n');
}

/// Class head, private collections and the static finder
fn write_class_open(ctx: &TableContext<'_>, code: &mut String) {
    let class_name = ctx.class_name();
    code.push_str(&format!(
        "class {}: public Yb::DomainObject\n{{\n",
        class_name
    ));

    // Collections stay private; the referenced classes may be incomplete here
    for collection in &ctx.relations.collections {
        code.push_str(&format!(
            "\tYb::ManagedList<{}> {};\n",
            collection.many_class,
            collection_member(collection.property)
        ));
    }

    code.push_str(&format!(
        "public:\n\
         \t// static method 'find'\n\
         \ttypedef std::vector<{class_name}> List;\n\
         \ttypedef std::auto_ptr<List> ListPtr;\n\
         \tstatic ListPtr find(Yb::SessionBase &session,\n\
         \t\t\tconst Yb::Filter &filter, const Yb::StrList order_by = \"\", int max_n = -1);\n"
    ));
}

fn write_constructors(ctx: &TableContext<'_>, code: &mut String) {
    let class_name = ctx.class_name();
    code.push_str("\t// constructors\n");
    code.push_str(&format!("\t{}();\n", class_name));
    code.push_str(&format!("\t{}(Yb::SessionBase &session);\n", class_name));

    code.push_str(&format!(
        "\t{}(Yb::SessionBase &session, const Yb::RowData &key)\n\
         \t\t: Yb::DomainObject(session, key)\n",
        class_name
    ));
    write_collection_inits(&ctx.relations.collections, "key.get_id()", code);
    code.push_str("\t{}\n");

    if ctx.key.is_strong() {
        code.push_str(&format!(
            "\t{}(Yb::SessionBase &session, Yb::LongInt id)\n\
             \t\t: Yb::DomainObject(session, {}, id)\n",
            class_name,
            cpp_string_literal(&ctx.table.name)
        ));
        write_collection_inits(&ctx.relations.collections, "id", code);
        code.push_str("\t{}\n");
    }
}

/// Bind each collection to the rows whose foreign key equals `id`
fn write_collection_inits(collections: &[Collection<'_>], id: &str, code: &mut String) {
    for collection in collections {
        code.push_str(&format!(
            "\t\t, {}(&session, Yb::filter_eq({}, {}))\n",
            collection_member(collection.property),
            cpp_string_literal(&collection.fk_column.name),
            id
        ));
    }
}

/// `get_attr_ex`: strong classes turn a generic miss into their own error
fn write_attr_wrapper(ctx: &TableContext<'_>, code: &mut String) {
    match ctx.key.key_column() {
        None => {
            code.push_str(
                "\tconst Yb::Value get_attr_ex(const std::string &field) const {\n\
                 \t\treturn get_attr(field);\n\
                 \t}\n",
            );
        }
        Some(key) => {
            code.push_str(&format!(
                "\tconst Yb::Value get_attr_ex(const std::string &field) const {{\n\
                 \t\ttry {{\n\
                 \t\t\treturn get_attr(field);\n\
                 \t\t}}\n\
                 \t\tcatch (const Yb::ObjectNotFoundByKey &) {{\n\
                 \t\t\tthrow {}(get_attr({}).as_longint());\n\
                 \t\t}}\n\
                 \t}}\n",
                not_found_error_name(ctx.class_name()),
                cpp_string_literal(&key.name)
            ));
        }
    }
}

fn write_getters(ctx: &TableContext<'_>, code: &mut String) {
    code.push_str("\t// getters\n");
    for column in ctx.table.columns.iter().filter(|c| !c.has_fk()) {
        let attr = cpp_string_literal(&column.name);
        if column.semantic_type == SemanticType::String {
            // Null strings read back as empty
            code.push_str(&format!(
                "\t{} get_{}() const {{\n\
                 \t\tYb::Value v(get_attr_ex({}));\n\
                 \t\treturn v.is_null()? std::string(): v.as_string();\n\
                 \t}}\n",
                TypeMapper::map(SemanticType::String).declared,
                column.property,
                attr
            ));
        } else {
            let mapped = TypeMapper::map(TypeMapper::getter_type(column, &ctx.key));
            code.push_str(&format!(
                "\t{} get_{}() const {{\n\
                 \t\treturn get_attr_ex({}).{};\n\
                 \t}}\n",
                mapped.declared, column.property, attr, mapped.extraction
            ));
        }
    }
}

fn write_setters(ctx: &TableContext<'_>, code: &mut String) {
    code.push_str("\t// setters\n");
    for column in ctx
        .table
        .columns
        .iter()
        .filter(|c| !c.has_fk() && !c.read_only && !c.primary_key)
    {
        let param = param_name(&column.property);
        code.push_str(&format!(
            "\tvoid set_{}({}) {{\n\
             \t\tset_attr({}, Yb::Value({}));\n\
             \t}}\n",
            column.property,
            TypeMapper::map(column.semantic_type).param(column.semantic_type, &param),
            cpp_string_literal(&column.name),
            param
        ));
    }
}

fn write_null_checkers(ctx: &TableContext<'_>, code: &mut String) {
    code.push_str("\t// on null checkers\n");
    for column in ctx
        .table
        .columns
        .iter()
        .filter(|c| c.nullable && !c.primary_key)
    {
        code.push_str(&format!(
            "\tbool {}() const {{\n\
             \t\treturn get_attr_ex({}).is_null();\n\
             \t}}\n",
            null_checker_name(&column.name),
            cpp_string_literal(&column.name)
        ));
    }
}

/// Many-side accessors first, then collection accessors
fn write_relation_accessors(ctx: &TableContext<'_>, code: &mut String) {
    code.push_str("\t// relations\n");
    for reference in &ctx.relations.references {
        write_reference_accessors(reference, code);
    }
    for collection in &ctx.relations.collections {
        code.push_str(&format!(
            "\tYb::ManagedList<{}> &get_{}() {{ return {}; }}\n",
            collection.many_class,
            collection.property,
            collection_member(collection.property)
        ));
    }
}

fn write_reference_accessors(reference: &Reference<'_>, code: &mut String) {
    let property = reference.property;
    let one_class = reference.one_class;
    let fk = cpp_string_literal(&reference.fk_column.name);
    let param = param_name(property);

    if reference.fk_column.nullable {
        code.push_str(&format!(
            "\tbool has_{property}() const {{\n\
             \t\treturn !get_attr_ex({fk}).is_null();\n\
             \t}}\n\
             \tvoid reset_{property}() {{\n\
             \t\tset_attr({fk}, Yb::Value());\n\
             \t}}\n"
        ));
    }

    code.push_str(&format!(
        "\tvoid set_{property}({one_class} &{param}) {{\n\
         \t\tset_attr({fk}, Yb::Value({param}.get_{}()));\n",
        reference.one_key_property
    ));
    if let Some(backref) = reference.backref {
        code.push_str(&format!("\t\t{param}.get_{backref}().insert(*this);\n"));
    }
    code.push_str("\t}\n");

    code.push_str(&format!(
        "\t{one_class} get_{property}() const {{\n\
         \t\treturn {one_class}(*get_session(), get_attr_ex({fk}).as_longint());\n\
         \t}}\n"
    ));
}

/// Class close, registrator and guard end
fn write_footer(ctx: &TableContext<'_>, code: &mut String) {
    let registrator = registrator_name(ctx.class_name());
    code.push_str(&format!(
        "}};\n\n\
         struct {registrator}\n\
         {{\n\
         \tstatic void register_domain(Yb::DomainFactory &factory);\n\
         \t{registrator}(Yb::DomainFactory &factory);\n\
         }};\n\n\
         }} // namespace {}\n\n\
         // vim:ts=4:sts=4:sw=4:et:\n\
         #endif\n",
        ctx.options.namespace
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::EmitOptions;
    use crate::schema::{Column, Relation, RelationSide, Schema, Table};

    fn schema(fk_nullable: bool) -> Schema {
        let client = Table::new("T_CLIENT", "Client")
            .column(Column::new("ID", SemanticType::PkId).primary_key())
            .column(Column::new("NAME", SemanticType::String).nullable())
            .column(Column::new("BUDGET", SemanticType::Decimal));
        let mut fk = Column::new("CLIENT_ID", SemanticType::Integer).references("T_CLIENT");
        fk.nullable = fk_nullable;
        let order = Table::new("T_ORDER", "Order")
            .column(Column::new("ID", SemanticType::PkId).primary_key())
            .column(fk)
            .column(Column::new("CREATED_AT", SemanticType::DateTime).read_only());
        let relation = Relation::one_to_many(
            RelationSide::new("Client", Some("orders")),
            RelationSide::new("Order", Some("owner")),
        );
        Schema::new(vec![client, order], vec![relation]).unwrap()
    }

    fn render(schema: &Schema, table: &str) -> String {
        let options = EmitOptions::default();
        let ctx = TableContext::new(schema, schema.find_table(table).unwrap(), &options).unwrap();
        generate_header(&ctx).unwrap()
    }

    #[test]
    fn test_one_side() {
        let code = render(&schema(true), "T_CLIENT");
        assert!(code.starts_with(
            "#ifndef ORM_DOMAIN__CLIENT__INCLUDED\n#define ORM_DOMAIN__CLIENT__INCLUDED\n"
        ));
        assert!(code.contains("class ClientNotFoundByID: public Yb::ObjectNotFoundByKey"));
        assert!(code.contains("class Order;\n"));
        assert!(code.contains("\tYb::ManagedList<Order> orders_;\npublic:\n"));
        assert!(code.contains("\tYb::ManagedList<Order> &get_orders() { return orders_; }\n"));
        assert!(code.contains("\t\t, orders_(&session, Yb::filter_eq(\"CLIENT_ID\", key.get_id()))\n"));
        assert!(code.contains("\t\t, orders_(&session, Yb::filter_eq(\"CLIENT_ID\", id))\n"));
        assert!(code.contains("\tClient(Yb::SessionBase &session, Yb::LongInt id)\n"));
        assert!(code.contains("throw ClientNotFoundByID(get_attr(\"ID\").as_longint());"));
        assert!(code.contains("\tconst Yb::PKIDValue get_id() const {\n\t\treturn get_attr_ex(\"ID\").as_pkid();\n"));
        assert!(code.contains("return v.is_null()? std::string(): v.as_string();"));
        assert!(code.contains("\tvoid set_name(const std::string &name__) {\n"));
        assert!(code.contains("\tvoid set_budget(Yb::Decimal budget__) {\n"));
        assert!(!code.contains("set_id("));
        assert!(code.contains("\tbool is_name_null() const {\n"));
        assert!(!code.contains("is_budget_null"));
        assert!(code.contains("struct ClientRegistrator\n{\n\tstatic void register_domain(Yb::DomainFactory &factory);\n"));
        assert!(code.ends_with("} // namespace Domain\n\n// vim:ts=4:sts=4:sw=4:et:\n#endif\n"));
    }

    #[test]
    fn test_many_side_nullable() {
        let code = render(&schema(true), "T_ORDER");
        assert!(code.contains("#include \"domain/Client.h\"\n"));
        assert!(code.contains("\tbool has_owner() const {\n\t\treturn !get_attr_ex(\"CLIENT_ID\").is_null();\n"));
        assert!(code.contains("\tvoid reset_owner() {\n\t\tset_attr(\"CLIENT_ID\", Yb::Value());\n"));
        assert!(code.contains(
            "\tvoid set_owner(Client &owner__) {\n\
             \t\tset_attr(\"CLIENT_ID\", Yb::Value(owner__.get_id()));\n\
             \t\towner__.get_orders().insert(*this);\n\
             \t}\n"
        ));
        assert!(code.contains(
            "\tClient get_owner() const {\n\
             \t\treturn Client(*get_session(), get_attr_ex(\"CLIENT_ID\").as_longint());\n"
        ));
        // FK columns get no scalar accessors, but still a null checker
        assert!(!code.contains("get_client_id"));
        assert!(!code.contains("set_client_id"));
        assert!(code.contains("is_client_id_null"));
        // Read-only column: getter only
        assert!(code.contains("\tYb::DateTime get_created_at() const {\n"));
        assert!(!code.contains("set_created_at"));
        assert!(!code.contains("ManagedList"));
    }

    #[test]
    fn test_many_side_required() {
        let code = render(&schema(false), "T_ORDER");
        assert!(code.contains("set_owner("));
        assert!(code.contains("get_owner()"));
        assert!(!code.contains("has_owner"));
        assert!(!code.contains("reset_owner"));
    }

    #[test]
    fn test_weak_table() {
        let link = Table::new("T_LINK", "Link")
            .column(Column::new("A", SemanticType::Integer).primary_key())
            .column(Column::new("B", SemanticType::Integer).primary_key())
            .column(Column::new("NOTE", SemanticType::String).nullable());
        let schema = Schema::new(vec![link], vec![]).unwrap();
        let code = render(&schema, "T_LINK");

        assert!(!code.contains("NotFoundByID"));
        assert!(!code.contains("Yb::LongInt id)"));
        assert!(!code.contains("catch"));
        assert!(code.contains(
            "\tconst Yb::Value get_attr_ex(const std::string &field) const {\n\t\treturn get_attr(field);\n\t}\n"
        ));
        // Without a strong key no column is wrapped as a key id
        assert!(code.contains("\tYb::LongInt get_a() const {\n"));
        assert!(!code.contains("PKIDValue"));
    }

    #[test]
    fn test_duplicate_includes() {
        let account = Table::new("T_ACCOUNT", "Account")
            .column(Column::new("ID", SemanticType::PkId).primary_key());
        let transfer = Table::new("T_TRANSFER", "Transfer")
            .column(Column::new("ID", SemanticType::PkId).primary_key())
            .column(Column::new("FROM_ID", SemanticType::Integer).references("T_ACCOUNT"))
            .column(Column::new("TO_ID", SemanticType::Integer).references("T_ACCOUNT"));
        let schema = Schema::new(vec![account, transfer], vec![]).unwrap();
        let table = schema.find_table("T_TRANSFER").unwrap();

        let literal = EmitOptions::default();
        let ctx = TableContext::new(&schema, table, &literal).unwrap();
        let code = generate_header(&ctx).unwrap();
        assert_eq!(code.matches("#include \"domain/Account.h\"").count(), 2);

        let dedup = EmitOptions {
            dedup_includes: true,
            ..Default::default()
        };
        let ctx = TableContext::new(&schema, table, &dedup).unwrap();
        let code = generate_header(&ctx).unwrap();
        assert_eq!(code.matches("#include \"domain/Account.h\"").count(), 1);
    }
}
