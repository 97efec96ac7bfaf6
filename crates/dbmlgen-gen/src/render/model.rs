use crate::model::{EnumSpec, GenerateOptions, ModelSpec};
use crate::naming::{constant_name, rust_field_ident, rust_type_ident};

use super::{SourceBuilder, field_type, literal};

/// Render `model/<file>.rs` for one table.
pub fn render_model(spec: &ModelSpec, options: &GenerateOptions) -> String {
    let mut out = SourceBuilder::new();
    let struct_ident = rust_type_ident(&spec.struct_name);

    for path in &spec.import_paths {
        out.line(format!("use {path};"));
    }
    out.line("use serde::{Deserialize, Serialize};");
    out.blank();
    out.line("use super::ColumnMeta;");
    out.blank();

    if spec.comment.is_empty() {
        out.doc(&format!("Row of the `{}` table.", spec.qualified_table()));
    } else {
        out.doc(&spec.comment);
    }
    out.line("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]");
    out.open(format!("pub struct {struct_ident} {{"));
    for field in &spec.fields {
        if !field.comment.is_empty() {
            out.doc(&field.comment);
        }
        for (key, value) in &field.extra_tags {
            out.line(format!("// {key}: {value}"));
        }
        out.line(format!("#[serde(rename = {})]", literal(&field.json_tag)));
        out.line(format!("#[sqlx(rename = {})]", literal(&field.column_name)));
        out.line(format!(
            "pub {}: {},",
            rust_field_ident(&field.name),
            field_type(field, options)
        ));
    }
    out.close("}");
    out.blank();

    out.open(format!("impl {struct_ident} {{"));
    out.line(format!(
        "pub const TABLE_NAME: &'static str = {};",
        literal(&spec.table_name)
    ));
    match &spec.schema_name {
        Some(schema) => out.line(format!(
            "pub const SCHEMA_NAME: Option<&'static str> = Some({});",
            literal(schema)
        )),
        None => out.line("pub const SCHEMA_NAME: Option<&'static str> = None;"),
    }
    out.blank();
    out.open("pub const COLUMNS: &'static [ColumnMeta] = &[");
    for field in &spec.fields {
        out.open("ColumnMeta {");
        out.line(format!("field: {},", literal(&field.name)));
        out.line(format!("column: {},", literal(&field.column_name)));
        out.line(format!("tag: {},", literal(&field.persistence_tag)));
        out.close("},");
    }
    out.close("];");
    out.close("}");

    out.finish()
}

/// Render `model/mod.rs`: the shared column metadata type plus module
/// declarations and re-exports.
pub fn render_model_mod(specs: &[ModelSpec], has_enums: bool) -> String {
    let mut out = SourceBuilder::new();

    if has_enums {
        out.line("pub mod enums;");
    }
    for spec in specs {
        out.line(format!("pub mod {};", rust_field_ident(&spec.file_name)));
    }
    out.blank();
    for spec in specs {
        out.line(format!(
            "pub use {}::{};",
            rust_field_ident(&spec.file_name),
            rust_type_ident(&spec.struct_name)
        ));
    }
    out.blank();

    out.doc("Storage metadata for one generated field.");
    out.line("#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
    out.open("pub struct ColumnMeta {");
    out.doc("Generated field name.");
    out.line("pub field: &'static str,");
    out.doc("Column name in the database.");
    out.line("pub column: &'static str,");
    out.doc("`;`-separated persistence attributes.");
    out.line("pub tag: &'static str,");
    out.close("}");
    out.blank();

    out.open("impl ColumnMeta {");
    out.doc("Whether the tag carries `attribute` (e.g. `primaryKey`, `not null`).");
    out.open("pub fn has(&self, attribute: &str) -> bool {");
    out.line("self.tag.split(';').any(|part| part == attribute)");
    out.close("}");
    out.close("}");

    out.finish()
}

/// Render `model/enums.rs`: one string-slice constant per declared enum.
pub fn render_enums(enums: &[EnumSpec]) -> String {
    let mut out = SourceBuilder::new();
    for item in enums {
        out.doc(&format!("Members of the `{}` enum.", item.name));
        let values: Vec<String> = item.values.iter().map(|value| literal(value)).collect();
        out.line(format!(
            "pub const {}_VALUES: &[&str] = &[{}];",
            constant_name(&item.name),
            values.join(", ")
        ));
        out.blank();
    }
    out.finish()
}
