//! Schema adapter: exposes parsed tables and columns through the descriptor
//! traits the generator consumes.

use std::collections::BTreeMap;

use dbmlgen_core::{Column, Table};

use crate::context::TypeContext;
use crate::naming::{camel_name, underscore_name};
use crate::types::HostType;

/// Table-level facts the generator needs.
pub trait ModelObject {
    /// Storage name of the table.
    fn table_name(&self) -> String;
    /// Schema qualifier, when the table declares one.
    fn schema_name(&self) -> Option<String>;
    /// Name of the generated struct.
    fn struct_name(&self) -> String;
    /// Base name of the generated files.
    fn file_name(&self) -> String;
    /// Extra paths the generated model must import.
    fn import_paths(&self) -> Vec<String>;
    fn comment(&self) -> String;
    fn fields(&self) -> Vec<Box<dyn ModelField + '_>>;
}

/// Column-level facts the generator needs.
pub trait ModelField {
    /// Name of the generated field.
    fn name(&self) -> String;
    /// Storage name of the column.
    fn column_name(&self) -> String;
    fn field_type(&self) -> HostType;
    /// `;`-joined persistence attributes.
    fn persistence_tag(&self) -> String;
    /// Key used in the serialized representation.
    fn json_tag(&self) -> String;
    /// Additional free-form attributes.
    fn extra_tags(&self) -> BTreeMap<String, String>;
    fn comment(&self) -> String;
    fn is_primary_key(&self) -> bool;
    fn is_autoincrement(&self) -> bool;
    fn is_nullable(&self) -> bool;
}

/// Descriptor for one parsed table.
#[derive(Debug, Clone, Copy)]
pub struct DbmlObject<'a> {
    table: &'a Table,
    ctx: &'a TypeContext,
}

impl<'a> DbmlObject<'a> {
    pub fn new(table: &'a Table, ctx: &'a TypeContext) -> Self {
        Self { table, ctx }
    }

    /// Concrete field descriptors, one per column in declaration order.
    pub fn dbml_fields(&self) -> Vec<DbmlField<'a>> {
        let ctx = self.ctx;
        self.table
            .columns
            .iter()
            .map(|column| DbmlField::new(column, ctx))
            .collect()
    }

    fn is_table_key(&self, column: &str) -> bool {
        self.table.primary_key_columns().contains(&column)
    }
}

impl ModelObject for DbmlObject<'_> {
    fn table_name(&self) -> String {
        self.table.name.clone()
    }

    fn schema_name(&self) -> Option<String> {
        self.table.schema.clone()
    }

    fn struct_name(&self) -> String {
        match &self.table.alias {
            Some(alias) if !alias.is_empty() => alias.clone(),
            _ => camel_name(&self.table.name),
        }
    }

    fn file_name(&self) -> String {
        underscore_name(&self.table.name)
    }

    fn import_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .dbml_fields()
            .iter()
            .filter_map(|field| field.field_type().import_path())
            .map(str::to_string)
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }

    fn comment(&self) -> String {
        self.table.note.clone().unwrap_or_default()
    }

    fn fields(&self) -> Vec<Box<dyn ModelField + '_>> {
        self.dbml_fields()
            .into_iter()
            .map(|field| {
                let keyed = self.is_table_key(&field.column.name);
                Box::new(KeyedField { field, keyed }) as Box<dyn ModelField + '_>
            })
            .collect()
    }
}

/// Descriptor for one parsed column.
#[derive(Debug, Clone, Copy)]
pub struct DbmlField<'a> {
    column: &'a Column,
    ctx: &'a TypeContext,
}

impl<'a> DbmlField<'a> {
    pub fn new(column: &'a Column, ctx: &'a TypeContext) -> Self {
        Self { column, ctx }
    }
}

impl ModelField for DbmlField<'_> {
    fn name(&self) -> String {
        camel_name(&self.column.name)
    }

    fn column_name(&self) -> String {
        self.column.name.clone()
    }

    fn field_type(&self) -> HostType {
        self.ctx.resolve(&self.column.column_type)
    }

    fn persistence_tag(&self) -> String {
        build_tag(self.column, self.ctx.is_enum(&self.column.column_type))
    }

    fn json_tag(&self) -> String {
        self.column.name.clone()
    }

    fn extra_tags(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn comment(&self) -> String {
        self.column.settings.note.clone().unwrap_or_default()
    }

    fn is_primary_key(&self) -> bool {
        self.column.settings.pk
    }

    fn is_autoincrement(&self) -> bool {
        self.column.settings.increment
    }

    fn is_nullable(&self) -> bool {
        self.column.settings.null
    }
}

/// Field wrapper that also knows about table-level `[pk]` indexes. The tag
/// still reflects only the column's own settings.
struct KeyedField<'a> {
    field: DbmlField<'a>,
    keyed: bool,
}

impl ModelField for KeyedField<'_> {
    fn name(&self) -> String {
        self.field.name()
    }

    fn column_name(&self) -> String {
        self.field.column_name()
    }

    fn field_type(&self) -> HostType {
        self.field.field_type()
    }

    fn persistence_tag(&self) -> String {
        self.field.persistence_tag()
    }

    fn json_tag(&self) -> String {
        self.field.json_tag()
    }

    fn extra_tags(&self) -> BTreeMap<String, String> {
        self.field.extra_tags()
    }

    fn comment(&self) -> String {
        self.field.comment()
    }

    fn is_primary_key(&self) -> bool {
        self.keyed || self.field.is_primary_key()
    }

    fn is_autoincrement(&self) -> bool {
        self.field.is_autoincrement()
    }

    fn is_nullable(&self) -> bool {
        self.field.is_nullable()
    }
}

/// Build the persistence tag: storage type first, then in fixed order
/// `primaryKey`, `default:`, `comment:`, `autoincrement`, `not null`,
/// `unique`. Values are copied verbatim.
pub fn build_tag(column: &Column, is_enum: bool) -> String {
    let settings = &column.settings;
    let mut parts = vec![if is_enum {
        "type:varchar".to_string()
    } else {
        format!("type:{}", column.column_type)
    }];

    if settings.pk {
        parts.push("primaryKey".to_string());
    }
    if let Some(default) = &settings.default {
        let value = default.as_tag_value();
        if !value.is_empty() {
            parts.push(format!("default:{value}"));
        }
    }
    if let Some(note) = settings.note.as_deref().filter(|note| !note.is_empty()) {
        parts.push(format!("comment:{note}"));
    }
    if settings.increment {
        parts.push("autoincrement".to_string());
    }
    if !settings.null {
        parts.push("not null".to_string());
    }
    if settings.unique {
        parts.push("unique".to_string());
    }

    parts.join(";")
}
