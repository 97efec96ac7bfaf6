use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::HostType;

/// What the generator writes besides the model structs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateMode {
    /// Model structs only.
    ModelsOnly,
    /// Model structs plus per-table CRUD query code.
    #[default]
    WithDefaultQuery,
}

/// Target database for generated query code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    #[default]
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Some(Dialect::Postgres),
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "sqlite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    /// sqlx database type used as `Executor::Database`.
    pub fn sqlx_database(self) -> &'static str {
        match self {
            Dialect::Postgres => "sqlx::Postgres",
            Dialect::MySql => "sqlx::MySql",
            Dialect::Sqlite => "sqlx::Sqlite",
        }
    }

    pub fn quote_ident(self, ident: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", ident.replace('`', "``")),
            Dialect::Postgres | Dialect::Sqlite => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    /// Bind placeholder for the 1-based parameter `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }
}

/// Options for the code generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory the generated tree is written to.
    pub out_dir: PathBuf,
    /// Render columns declared `null` as `Option<T>`.
    pub field_nullable: bool,
    pub mode: GenerateMode,
    pub dialect: Dialect,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("gen/crud"),
            field_nullable: false,
            mode: GenerateMode::WithDefaultQuery,
            dialect: Dialect::Postgres,
        }
    }
}

/// Owned snapshot of a model descriptor, taken when the model is handed to
/// the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub table_name: String,
    pub schema_name: Option<String>,
    pub struct_name: String,
    pub file_name: String,
    pub comment: String,
    pub import_paths: Vec<String>,
    pub fields: Vec<FieldSpec>,
}

impl ModelSpec {
    pub fn primary_keys(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|field| field.primary_key)
    }

    /// `schema.table` when a schema is declared, else the table name.
    pub fn qualified_table(&self) -> String {
        match &self.schema_name {
            Some(schema) => format!("{schema}.{}", self.table_name),
            None => self.table_name.clone(),
        }
    }
}

/// Owned snapshot of a field descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub column_name: String,
    pub field_type: HostType,
    pub persistence_tag: String,
    pub json_tag: String,
    pub extra_tags: BTreeMap<String, String>,
    pub comment: String,
    pub primary_key: bool,
    pub autoincrement: bool,
    pub nullable: bool,
}

/// A file written by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub sha256: String,
    pub bytes: u64,
}

/// Manifest written next to the generated tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub run_id: String,
    pub generated_at: String,
    pub tool_version: String,
    pub mode: GenerateMode,
    pub dialect: Dialect,
    pub field_nullable: bool,
    pub tables: usize,
    pub files: Vec<GeneratedFile>,
}

/// Enum members exported as string constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSpec {
    pub name: String,
    pub values: Vec<String>,
}
