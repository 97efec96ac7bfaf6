use std::fs;
use std::path::Path;

use dbmlgen_core::{DefaultValue, Error, IndexPart, Relation, parse_dbml, parse_dbml_reader};

fn fixture() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shop.dbml");
    fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("missing fixture at {}", path.display()))
}

#[test]
fn parses_full_document_in_declaration_order() {
    let document = parse_dbml(&fixture()).expect("parse fixture");

    let project = document.project.as_ref().expect("project");
    assert_eq!(project.name.as_deref(), Some("shop"));
    assert_eq!(project.database_type.as_deref(), Some("PostgreSQL"));
    assert_eq!(project.note.as_deref(), Some("Storefront schema"));

    let names: Vec<&str> = document
        .tables
        .iter()
        .map(|table| table.name.as_str())
        .collect();
    assert_eq!(names, vec!["users", "orders", "order_item", "products"]);

    assert_eq!(document.enums.len(), 1);
    let status = &document.enums[0];
    assert_eq!(status.name, "order_status");
    let values: Vec<&str> = status.values.iter().map(|value| value.name.as_str()).collect();
    assert_eq!(values, vec!["pending", "paid", "shipped out"]);
    assert!(status.values[1].note.is_some());

    assert_eq!(document.refs.len(), 2);
    assert_eq!(document.table_groups[0].tables.len(), 3);
    assert_eq!(document.table_groups[0].tables[2], "catalog.products");
}

#[test]
fn keeps_column_settings() {
    let document = parse_dbml(&fixture()).expect("parse fixture");
    let users = document.table("users").expect("users");

    assert_eq!(users.alias.as_deref(), Some("U"));
    assert_eq!(users.note.as_deref(), Some("Registered customers"));

    let email = &users.columns[1];
    assert_eq!(email.column_type, "varchar(255)");
    assert!(email.settings.unique);
    assert!(!email.settings.null);
    assert_eq!(email.settings.note.as_deref(), Some("login email"));

    assert!(users.columns[2].settings.null);
    assert_eq!(
        users.columns[3].settings.default,
        Some(DefaultValue::Expression("now()".to_string()))
    );
}

#[test]
fn normalizes_type_tokens() {
    let document = parse_dbml(&fixture()).expect("parse fixture");
    let orders = document.table("orders").expect("orders");

    let types: Vec<&str> = orders
        .columns
        .iter()
        .map(|column| column.column_type.as_str())
        .collect();
    assert_eq!(
        types,
        vec!["bigint", "bigint", "order_status", "decimal(10,2)", "text[]"]
    );
    assert_eq!(
        orders.settings.get("headercolor").map(String::as_str),
        Some("#24BAB1")
    );
}

#[test]
fn collects_indexes_and_primary_keys() {
    let document = parse_dbml(&fixture()).expect("parse fixture");

    let orders = document.table("orders").expect("orders");
    assert_eq!(orders.indexes.len(), 3);
    assert_eq!(orders.indexes[1].name.as_deref(), Some("orders_user_status"));
    assert_eq!(orders.indexes[1].index_type.as_deref(), Some("btree"));
    assert_eq!(
        orders.indexes[2].columns,
        vec![IndexPart::Expression("lower(status)".to_string())]
    );
    assert_eq!(orders.primary_key_columns(), vec!["id"]);

    let items = document.table("order_item").expect("order_item");
    assert_eq!(items.primary_key_columns(), vec!["order_id", "product_id"]);

    let products = document.table("products").expect("products");
    assert_eq!(products.schema.as_deref(), Some("catalog"));
    assert_eq!(products.columns[1].name, "display name");
}

#[test]
fn resolves_ref_forms() {
    let document = parse_dbml(&fixture()).expect("parse fixture");

    let short = &document.refs[0];
    assert_eq!(short.from.table, "order_item");
    assert_eq!(short.to.table, "orders");
    assert_eq!(short.relation, Relation::ManyToOne);
    assert_eq!(short.on_delete.as_deref(), Some("cascade"));
    assert_eq!(short.on_update.as_deref(), Some("no action"));

    let long = &document.refs[1];
    assert_eq!(long.name.as_deref(), Some("order_products"));
    assert_eq!(long.to.columns, vec!["id".to_string()]);

    let orders = document.table("orders").expect("orders");
    assert_eq!(orders.columns[1].settings.refs[0].target.table, "users");
}

#[test]
fn reader_entry_point_matches_text_entry_point() {
    let text = fixture();
    let from_text = parse_dbml(&text).expect("parse text");
    let from_reader = parse_dbml_reader(text.as_bytes()).expect("parse reader");
    assert_eq!(from_text, from_reader);
}

#[test]
fn document_serializes_to_json() {
    let document = parse_dbml("Table t {\n  id int [default: 1]\n}").expect("parse");
    let json = serde_json::to_value(&document).expect("serialize");
    assert_eq!(json["tables"][0]["columns"][0]["column_type"], "int");
    assert_eq!(
        json["tables"][0]["columns"][0]["settings"]["default"],
        serde_json::json!({"kind": "number", "value": "1"})
    );
}

#[test]
fn unterminated_table_reports_position() {
    let err = parse_dbml("Table t {\n  id int\n").expect_err("must fail");
    assert!(matches!(err, Error::Parse { line: 3, .. }), "got {err:?}");
}
