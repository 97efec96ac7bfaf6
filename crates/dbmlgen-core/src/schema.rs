use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parsed DBML document. Every list keeps declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DbmlDocument {
    pub project: Option<Project>,
    pub tables: Vec<Table>,
    pub enums: Vec<Enum>,
    pub refs: Vec<Ref>,
    pub table_groups: Vec<TableGroup>,
}

impl DbmlDocument {
    /// Look up a table by its raw name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}

/// `Project` block metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    pub name: Option<String>,
    pub database_type: Option<String>,
    pub note: Option<String>,
    /// Any other `key: 'value'` pairs declared in the block.
    pub settings: BTreeMap<String, String>,
}

/// A `Table` definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    /// Schema qualifier (`core` in `Table core.users`).
    pub schema: Option<String>,
    pub name: String,
    /// Name given with `as`.
    pub alias: Option<String>,
    pub note: Option<String>,
    /// Header settings such as `headercolor`.
    pub settings: BTreeMap<String, String>,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
}

impl Table {
    /// Column names marked as primary key, either on the column or by a `[pk]` index.
    pub fn primary_key_columns(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .columns
            .iter()
            .filter(|column| column.settings.pk)
            .map(|column| column.name.as_str())
            .collect();

        for index in self.indexes.iter().filter(|index| index.pk) {
            for part in &index.columns {
                if let IndexPart::Column(name) = part {
                    if !keys.contains(&name.as_str()) {
                        keys.push(name.as_str());
                    }
                }
            }
        }

        keys
    }
}

/// Column definition inside a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub name: String,
    /// Raw type token as written, e.g. `bigint`, `varchar(255)`, `decimal(10,2)`.
    pub column_type: String,
    pub settings: ColumnSettings,
}

/// Settings from a column's `[...]` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSettings {
    pub pk: bool,
    /// True only when the column is explicitly declared `null`.
    pub null: bool,
    pub unique: bool,
    pub increment: bool,
    pub default: Option<DefaultValue>,
    pub note: Option<String>,
    pub refs: Vec<InlineRef>,
}

/// Value of a `default:` setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
    Expression(String),
}

impl DefaultValue {
    /// Text of the value without any quoting.
    pub fn as_tag_value(&self) -> String {
        match self {
            DefaultValue::String(value)
            | DefaultValue::Number(value)
            | DefaultValue::Expression(value) => value.clone(),
            DefaultValue::Boolean(value) => value.to_string(),
            DefaultValue::Null => "null".to_string(),
        }
    }
}

/// Index declared in an `indexes { ... }` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Index {
    pub columns: Vec<IndexPart>,
    pub pk: bool,
    pub unique: bool,
    pub name: Option<String>,
    pub index_type: Option<String>,
    pub note: Option<String>,
}

/// One member of an index: a column or a backtick expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum IndexPart {
    Column(String),
    Expression(String),
}

/// `Enum` definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Enum {
    pub schema: Option<String>,
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumValue {
    pub name: String,
    pub note: Option<String>,
}

/// Relationship cardinality written between two ref endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// `>`
    ManyToOne,
    /// `<`
    OneToMany,
    /// `-`
    OneToOne,
    /// `<>`
    ManyToMany,
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::ManyToOne => ">",
            Relation::OneToMany => "<",
            Relation::OneToOne => "-",
            Relation::ManyToMany => "<>",
        }
    }
}

/// `table.column` or `schema.table.(a, b)` side of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RefEndpoint {
    pub schema: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
}

/// Top-level `Ref` definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ref {
    pub name: Option<String>,
    pub from: RefEndpoint,
    pub to: RefEndpoint,
    pub relation: Relation,
    pub on_delete: Option<String>,
    pub on_update: Option<String>,
}

/// Column-level `ref:` setting; the source side is the owning column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InlineRef {
    pub relation: Relation,
    pub target: RefEndpoint,
}

/// `TableGroup` definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TableGroup {
    pub name: String,
    pub tables: Vec<String>,
}
