mod config;
mod logging;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use config::{ConfigError, FileConfig, GenerateSettings, Overrides};
use dbmlgen_core::{DbmlDocument, Error as CoreError, parse_dbml_reader};
use dbmlgen_gen::{DbmlSource, GenerationError, Generator, TypeContext};
use logging::init_logging;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "dbmlgen", version, about = "Generate Rust models and sqlx queries from DBML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate model and query sources.
    Generate(GenerateArgs),
    /// Print the parsed document as JSON.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Path to the DBML schema.
    #[arg(long, value_name = "PATH")]
    dbml: Option<PathBuf>,
    /// Output directory (default ./gen/crud).
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Comma-separated schema_type=host_type overrides (default datetime=String).
    #[arg(long = "type", value_name = "LIST")]
    types: Option<String>,
    /// Render columns declared `null` as Option<T>.
    #[arg(long = "null", default_value_t = false)]
    field_nullable: bool,
    /// Target database for query code: postgres, mysql or sqlite.
    #[arg(long, value_name = "DIALECT")]
    dialect: Option<String>,
    /// Skip query code.
    #[arg(long, default_value_t = false)]
    models_only: bool,
    /// Optional TOML config file; flags win over its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Also append JSON logs to this file.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Path to the DBML schema.
    #[arg(long, value_name = "PATH", required_unless_present = "json_schema")]
    dbml: Option<PathBuf>,
    /// Print the document's JSON schema instead of the document.
    #[arg(long, default_value_t = false)]
    json_schema: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Inspect(args) => run_inspect(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        dbml,
        output,
        types,
        field_nullable,
        dialect,
        models_only,
        config,
        log_file,
    } = args;

    init_logging(log_file.as_deref())?;

    let file_config = match &config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let cwd = std::env::current_dir().map_err(|source| CliError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    let overrides = Overrides {
        dbml,
        output,
        types,
        field_nullable,
        dialect,
        models_only,
    };
    let settings = GenerateSettings::resolve(overrides, file_config, &cwd)?;

    for entry in &settings.rejected_types {
        tracing::warn!(event = "type_mapping_skipped", entry = %entry, "expected schema_type=host_type");
    }

    tracing::info!(
        event = "run_started",
        dbml = %settings.dbml.display(),
        out_dir = %settings.options.out_dir.display(),
        dialect = settings.options.dialect.as_str(),
        type_overrides = settings.types.len()
    );
    let timer = Instant::now();

    let document = read_document(&settings.dbml)?;
    tracing::info!(
        event = "schema_parsed",
        tables = document.tables.len(),
        enums = document.enums.len(),
        refs = document.refs.len()
    );

    let ctx = TypeContext::for_document(settings.types, &document);
    let source = DbmlSource::new(&document, &ctx);
    let mut generator = Generator::new(settings.options);
    let models = source.all(&generator);
    generator.apply_basic(models);
    generator.apply_enums(source.enums());

    let result = generator.execute()?;
    tracing::info!(
        event = "run_finished",
        status = "success",
        files = result.manifest.files.len(),
        out_dir = %result.out_dir.display(),
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let output = if args.json_schema {
        serde_json::to_string_pretty(&schemars::schema_for!(DbmlDocument))?
    } else {
        let path = args.dbml.ok_or(ConfigError::MissingDbml)?;
        let document = read_document(&path)?;
        serde_json::to_string_pretty(&document)?
    };
    println!("{output}");
    Ok(())
}

fn read_document(path: &Path) -> Result<DbmlDocument, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_dbml_reader(BufReader::new(file))?)
}
