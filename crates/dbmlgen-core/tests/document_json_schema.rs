use dbmlgen_core::DbmlDocument;
use schemars::schema_for;

#[test]
fn json_schema_describes_top_level_document() {
    let generated = schema_for!(DbmlDocument);
    let json = serde_json::to_value(&generated).expect("serialize generated schema");

    let properties = json
        .get("properties")
        .and_then(|value| value.as_object())
        .expect("document properties");
    for key in ["project", "tables", "enums", "refs", "table_groups"] {
        assert!(properties.contains_key(key), "missing property {key}");
    }

    let definitions = json
        .get("definitions")
        .and_then(|value| value.as_object())
        .expect("definitions");
    assert!(definitions.contains_key("Table"));
    assert!(definitions.contains_key("ColumnSettings"));
}
