use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use dbmlgen_core::DbmlDocument;

use crate::adapter::{DbmlObject, ModelObject};
use crate::context::TypeContext;
use crate::errors::GenerationError;
use crate::model::{
    EnumSpec, FieldSpec, GenerateMode, GenerateOptions, GenerationManifest, ModelSpec,
};
use crate::naming::{rust_field_ident, rust_type_ident};
use crate::output::{OutputWriter, write_bytes_atomic};
use crate::render::{
    GENERATED_HEADER, render_enums, render_model, render_model_mod, render_query,
    render_query_mod,
};

/// File name of the run manifest inside the output directory.
pub const MANIFEST_FILE: &str = "dbmlgen.manifest.json";

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub manifest: GenerationManifest,
}

/// Collects model snapshots and writes the generated tree.
#[derive(Debug, Clone)]
pub struct Generator {
    options: GenerateOptions,
    models: Vec<ModelSpec>,
    enums: Vec<EnumSpec>,
}

impl Generator {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            models: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Snapshot a descriptor into an owned model spec.
    pub fn generate_model_from(&self, object: &dyn ModelObject) -> ModelSpec {
        let fields = object
            .fields()
            .iter()
            .map(|field| FieldSpec {
                name: field.name(),
                column_name: field.column_name(),
                field_type: field.field_type(),
                persistence_tag: field.persistence_tag(),
                json_tag: field.json_tag(),
                extra_tags: field.extra_tags(),
                comment: field.comment(),
                primary_key: field.is_primary_key(),
                autoincrement: field.is_autoincrement(),
                nullable: field.is_nullable(),
            })
            .collect();

        ModelSpec {
            table_name: object.table_name(),
            schema_name: object.schema_name(),
            struct_name: object.struct_name(),
            file_name: object.file_name(),
            comment: object.comment(),
            import_paths: object.import_paths(),
            fields,
        }
    }

    /// Queue models for rendering.
    pub fn apply_basic(&mut self, models: impl IntoIterator<Item = ModelSpec>) {
        self.models.extend(models);
    }

    /// Queue enums to export as string constants.
    pub fn apply_enums(&mut self, enums: impl IntoIterator<Item = EnumSpec>) {
        self.enums.extend(enums);
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    /// Render every queued model and write the tree plus its manifest.
    pub fn execute(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let out_dir = self.options.out_dir.clone();
        let mut writer = OutputWriter::new(&out_dir);

        info!(
            run_id = %run_id,
            tables = self.models.len(),
            enums = self.enums.len(),
            out_dir = %out_dir.display(),
            mode = ?self.options.mode,
            dialect = self.options.dialect.as_str(),
            "generation started"
        );

        let with_query = self.options.mode == GenerateMode::WithDefaultQuery;
        let has_enums = !self.enums.is_empty();
        check_names(&self.models, has_enums)?;

        for spec in &self.models {
            let stem = module_file_stem(spec);
            debug!(table = %spec.qualified_table(), file = %stem, "rendering model");
            writer.write(
                &format!("model/{stem}.rs"),
                render_model(spec, &self.options).as_bytes(),
            )?;
            if with_query {
                writer.write(
                    &format!("query/{stem}.rs"),
                    render_query(spec, &self.options).as_bytes(),
                )?;
            }
        }

        if has_enums {
            writer.write("model/enums.rs", render_enums(&self.enums).as_bytes())?;
        }
        writer.write(
            "model/mod.rs",
            render_model_mod(&self.models, has_enums).as_bytes(),
        )?;
        if with_query {
            writer.write("query/mod.rs", render_query_mod(&self.models).as_bytes())?;
        }
        writer.write("mod.rs", render_root_mod(with_query).as_bytes())?;

        let manifest = GenerationManifest {
            run_id: run_id.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            mode: self.options.mode,
            dialect: self.options.dialect,
            field_nullable: self.options.field_nullable,
            tables: self.models.len(),
            files: writer.into_written(),
        };
        let manifest_path = out_dir.join(MANIFEST_FILE);
        write_bytes_atomic(&manifest_path, &serde_json::to_vec_pretty(&manifest)?).map_err(
            |source| GenerationError::Write {
                path: manifest_path.clone(),
                source,
            },
        )?;

        info!(
            run_id = %run_id,
            files = manifest.files.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generation finished"
        );

        Ok(GenerationResult { out_dir, manifest })
    }
}

/// File stem (and module name without any `r#` prefix) for a model.
pub fn module_file_stem(spec: &ModelSpec) -> String {
    let ident = rust_field_ident(&spec.file_name);
    ident.trim_start_matches("r#").to_string()
}

/// Reject models whose module, struct or field names would clash in the
/// generated tree. Runs before anything is written.
fn check_names(models: &[ModelSpec], has_enums: bool) -> Result<(), GenerationError> {
    let mut stems: BTreeMap<String, Vec<String>> = BTreeMap::new();
    stems.insert("mod".to_string(), vec!["model/mod.rs".to_string()]);
    if has_enums {
        stems.insert("enums".to_string(), vec!["model/enums.rs".to_string()]);
    }
    let mut structs: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for spec in models {
        let table = spec.qualified_table();
        stems
            .entry(module_file_stem(spec))
            .or_default()
            .push(table.clone());
        structs
            .entry(rust_type_ident(&spec.struct_name))
            .or_default()
            .push(table.clone());

        let mut fields: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for field in &spec.fields {
            fields
                .entry(rust_field_ident(&field.name))
                .or_default()
                .push(&field.column_name);
        }
        if let Some((field, columns)) = fields.into_iter().find(|(_, columns)| columns.len() > 1) {
            return Err(GenerationError::DuplicateField {
                table,
                field,
                columns: columns.join(", "),
            });
        }
    }

    if let Some((stem, tables)) = stems.into_iter().find(|(_, tables)| tables.len() > 1) {
        return Err(GenerationError::DuplicateModule {
            stem,
            tables: tables.join(", "),
        });
    }
    if let Some((name, tables)) = structs.into_iter().find(|(_, tables)| tables.len() > 1) {
        return Err(GenerationError::DuplicateStruct {
            name,
            tables: tables.join(", "),
        });
    }
    Ok(())
}

fn render_root_mod(with_query: bool) -> String {
    let mut out = format!("{GENERATED_HEADER}\n\npub mod model;\n");
    if with_query {
        out.push_str("pub mod query;\n");
    }
    out
}

/// Parsed document bound to the run's type context.
#[derive(Debug, Clone, Copy)]
pub struct DbmlSource<'a> {
    document: &'a DbmlDocument,
    ctx: &'a TypeContext,
}

impl<'a> DbmlSource<'a> {
    pub fn new(document: &'a DbmlDocument, ctx: &'a TypeContext) -> Self {
        Self { document, ctx }
    }

    /// Adapt every table, in declaration order.
    pub fn objects(&self) -> Vec<DbmlObject<'a>> {
        let ctx = self.ctx;
        self.document
            .tables
            .iter()
            .map(|table| DbmlObject::new(table, ctx))
            .collect()
    }

    /// Snapshot every table through `generator`.
    pub fn all(&self, generator: &Generator) -> Vec<ModelSpec> {
        self.objects()
            .iter()
            .map(|object| generator.generate_model_from(object))
            .collect()
    }

    pub fn enums(&self) -> Vec<EnumSpec> {
        self.document
            .enums
            .iter()
            .map(|item| EnumSpec {
                name: item.name.clone(),
                values: item.values.iter().map(|value| value.name.clone()).collect(),
            })
            .collect()
    }
}
