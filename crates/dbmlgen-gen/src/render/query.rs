use crate::model::{Dialect, FieldSpec, GenerateOptions, ModelSpec};
use crate::naming::{rust_field_ident, rust_type_ident};

use super::{SourceBuilder, field_type, literal};

/// Render `query/<file>.rs`: a `<Struct>Query` type with CRUD helpers
/// generic over any sqlx executor of the configured dialect.
pub fn render_query(spec: &ModelSpec, options: &GenerateOptions) -> String {
    let dialect = options.dialect;
    let struct_ident = rust_type_ident(&spec.struct_name);
    let query_ident = format!("{struct_ident}Query");
    let module = rust_field_ident(&spec.file_name);
    let statements = Statements::build(spec, dialect);
    let keys: Vec<&FieldSpec> = spec.primary_keys().collect();

    let mut out = SourceBuilder::new();
    out.line("use sqlx::Executor;");
    out.blank();
    out.line(format!("use super::super::model::{module}::{struct_ident};"));
    out.blank();

    out.doc(&format!(
        "CRUD queries for [`{struct_ident}`] rows in `{}`.",
        spec.qualified_table()
    ));
    out.line(format!("pub struct {query_ident};"));
    out.blank();

    out.open(format!("impl {query_ident} {{"));
    out.line(format!(
        "pub const SELECT_ALL: &'static str = {};",
        literal(&statements.select_all)
    ));
    out.line(format!(
        "pub const COUNT: &'static str = {};",
        literal(&statements.count)
    ));
    out.line(format!(
        "pub const INSERT: &'static str = {};",
        literal(&statements.insert)
    ));
    if let Some(sql) = &statements.select_by_pk {
        out.line(format!("pub const SELECT_BY_PK: &'static str = {};", literal(sql)));
    }
    if let Some(sql) = &statements.update_by_pk {
        out.line(format!("pub const UPDATE_BY_PK: &'static str = {};", literal(sql)));
    }
    if let Some(sql) = &statements.delete_by_pk {
        out.line(format!("pub const DELETE_BY_PK: &'static str = {};", literal(sql)));
    }
    out.blank();

    let bound = format!("E: Executor<'e, Database = {}>,", dialect.sqlx_database());

    out.doc("Fetch every row.");
    open_fn(&mut out, "find_all", "executor", "", &format!("sqlx::Result<Vec<{struct_ident}>>"), &bound);
    out.line(format!("sqlx::query_as::<_, {struct_ident}>(Self::SELECT_ALL)"));
    out.line("    .fetch_all(executor)");
    out.line("    .await");
    out.close("}");
    out.blank();

    out.doc("Count rows.");
    open_fn(&mut out, "count", "executor", "", "sqlx::Result<i64>", &bound);
    out.line("sqlx::query_scalar::<_, i64>(Self::COUNT)");
    out.line("    .fetch_one(executor)");
    out.line("    .await");
    out.close("}");
    out.blank();

    out.doc("Insert `model`, leaving auto-increment columns to the database.");
    open_fn(
        &mut out,
        "create",
        "executor",
        &format!(", model: &{struct_ident}"),
        "sqlx::Result<u64>",
        &bound,
    );
    out.line("sqlx::query(Self::INSERT)");
    for field in spec.fields.iter().filter(|field| !field.autoincrement) {
        out.line(format!("    .bind(&model.{})", rust_field_ident(&field.name)));
    }
    out.line("    .execute(executor)");
    out.line("    .await");
    out.line("    .map(|result| result.rows_affected())");
    out.close("}");

    if !keys.is_empty() {
        let key_params: String = keys
            .iter()
            .map(|field| {
                format!(
                    ", {}: &{}",
                    rust_field_ident(&field.name),
                    field_type(field, options)
                )
            })
            .collect();

        let executor = executor_param(&keys);

        out.blank();
        out.doc("Fetch one row by primary key.");
        open_fn(
            &mut out,
            "find_by_pk",
            &executor,
            &key_params,
            &format!("sqlx::Result<Option<{struct_ident}>>"),
            &bound,
        );
        out.line(format!("sqlx::query_as::<_, {struct_ident}>(Self::SELECT_BY_PK)"));
        for field in &keys {
            out.line(format!("    .bind({})", rust_field_ident(&field.name)));
        }
        out.line(format!("    .fetch_optional({executor})"));
        out.line("    .await");
        out.close("}");

        if statements.update_by_pk.is_some() {
            out.blank();
            out.doc("Overwrite every non-key column of the row `model` points at.");
            open_fn(
                &mut out,
                "update_by_pk",
                "executor",
                &format!(", model: &{struct_ident}"),
                "sqlx::Result<u64>",
                &bound,
            );
            out.line("sqlx::query(Self::UPDATE_BY_PK)");
            for field in spec.fields.iter().filter(|field| !field.primary_key) {
                out.line(format!("    .bind(&model.{})", rust_field_ident(&field.name)));
            }
            for field in &keys {
                out.line(format!("    .bind(&model.{})", rust_field_ident(&field.name)));
            }
            out.line("    .execute(executor)");
            out.line("    .await");
            out.line("    .map(|result| result.rows_affected())");
            out.close("}");
        }

        out.blank();
        out.doc("Delete one row by primary key.");
        open_fn(
            &mut out,
            "delete_by_pk",
            &executor,
            &key_params,
            "sqlx::Result<u64>",
            &bound,
        );
        out.line("sqlx::query(Self::DELETE_BY_PK)");
        for field in &keys {
            out.line(format!("    .bind({})", rust_field_ident(&field.name)));
        }
        out.line(format!("    .execute({executor})"));
        out.line("    .await");
        out.line("    .map(|result| result.rows_affected())");
        out.close("}");
    }

    out.close("}");
    out.finish()
}

/// Executor parameter name for functions that also take key columns as
/// parameters; grows a trailing `_` until no key field uses it.
fn executor_param(keys: &[&FieldSpec]) -> String {
    let mut name = "executor".to_string();
    while keys.iter().any(|field| rust_field_ident(&field.name) == name) {
        name.push('_');
    }
    name
}

/// Render `query/mod.rs`.
pub fn render_query_mod(specs: &[ModelSpec]) -> String {
    let mut out = SourceBuilder::new();
    for spec in specs {
        out.line(format!("pub mod {};", rust_field_ident(&spec.file_name)));
    }
    out.blank();
    for spec in specs {
        out.line(format!(
            "pub use {}::{}Query;",
            rust_field_ident(&spec.file_name),
            rust_type_ident(&spec.struct_name)
        ));
    }
    out.finish()
}

fn open_fn(
    out: &mut SourceBuilder,
    name: &str,
    executor: &str,
    params: &str,
    ret: &str,
    bound: &str,
) {
    out.line(format!(
        "pub async fn {name}<'e, E>({executor}: E{params}) -> {ret}"
    ));
    out.line("where");
    out.line(format!("    {bound}"));
    out.open("{");
}

/// SQL text for one table. Statements needing a primary key are `None`
/// when the table has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub select_all: String,
    pub count: String,
    pub insert: String,
    pub select_by_pk: Option<String>,
    pub update_by_pk: Option<String>,
    pub delete_by_pk: Option<String>,
}

impl Statements {
    pub fn build(spec: &ModelSpec, dialect: Dialect) -> Self {
        let table = match &spec.schema_name {
            Some(schema) => format!(
                "{}.{}",
                dialect.quote_ident(schema),
                dialect.quote_ident(&spec.table_name)
            ),
            None => dialect.quote_ident(&spec.table_name),
        };
        let column_list = spec
            .fields
            .iter()
            .map(|field| dialect.quote_ident(&field.column_name))
            .collect::<Vec<_>>()
            .join(", ");
        let select_all = format!("SELECT {column_list} FROM {table}");
        let count = format!("SELECT COUNT(*) FROM {table}");

        let insertable: Vec<&FieldSpec> =
            spec.fields.iter().filter(|field| !field.autoincrement).collect();
        let insert = if insertable.is_empty() {
            match dialect {
                Dialect::MySql => format!("INSERT INTO {table} () VALUES ()"),
                Dialect::Postgres | Dialect::Sqlite => {
                    format!("INSERT INTO {table} DEFAULT VALUES")
                }
            }
        } else {
            let columns = insertable
                .iter()
                .map(|field| dialect.quote_ident(&field.column_name))
                .collect::<Vec<_>>()
                .join(", ");
            let values = (1..=insertable.len())
                .map(|index| dialect.placeholder(index))
                .collect::<Vec<_>>()
                .join(", ");
            format!("INSERT INTO {table} ({columns}) VALUES ({values})")
        };

        let keys: Vec<&FieldSpec> = spec.primary_keys().collect();
        if keys.is_empty() {
            return Self {
                select_all,
                count,
                insert,
                select_by_pk: None,
                update_by_pk: None,
                delete_by_pk: None,
            };
        }

        let key_filter = |offset: usize| {
            keys.iter()
                .enumerate()
                .map(|(index, field)| {
                    format!(
                        "{} = {}",
                        dialect.quote_ident(&field.column_name),
                        dialect.placeholder(offset + index + 1)
                    )
                })
                .collect::<Vec<_>>()
                .join(" AND ")
        };

        let values: Vec<&FieldSpec> = spec.fields.iter().filter(|field| !field.primary_key).collect();
        let update_by_pk = if values.is_empty() {
            None
        } else {
            let assignments = values
                .iter()
                .enumerate()
                .map(|(index, field)| {
                    format!(
                        "{} = {}",
                        dialect.quote_ident(&field.column_name),
                        dialect.placeholder(index + 1)
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            Some(format!(
                "UPDATE {table} SET {assignments} WHERE {}",
                key_filter(values.len())
            ))
        };

        Self {
            select_by_pk: Some(format!("{select_all} WHERE {}", key_filter(0))),
            update_by_pk,
            delete_by_pk: Some(format!("DELETE FROM {table} WHERE {}", key_filter(0))),
            select_all,
            count,
            insert,
        }
    }
}
