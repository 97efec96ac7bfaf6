use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dbmlgen_gen::{Dialect, GenerateMode, GenerateOptions, TypeMap};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_OUTPUT: &str = "./gen/crud";
pub const DEFAULT_TYPES: &str = "datetime=String";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Decode(#[from] toml::de::Error),
    #[error("no DBML schema given (use --dbml or `dbml` in the config file)")]
    MissingDbml,
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Settings read from a `--config` TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub dbml: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub types: BTreeMap<String, String>,
    pub field_nullable: Option<bool>,
    pub dialect: Option<String>,
    pub models_only: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }
}

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dbml: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub types: Option<String>,
    pub field_nullable: bool,
    pub dialect: Option<String>,
    pub models_only: bool,
}

/// Fully merged settings for one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub dbml: PathBuf,
    pub types: TypeMap,
    /// `--type` entries that were not `key=value` pairs.
    pub rejected_types: Vec<String>,
    pub options: GenerateOptions,
}

impl GenerateSettings {
    /// Merge flags over the config file. Relative output paths are resolved
    /// against `cwd`.
    pub fn resolve(
        overrides: Overrides,
        file: FileConfig,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let dbml = overrides
            .dbml
            .or(file.dbml)
            .ok_or(ConfigError::MissingDbml)?;

        let output = overrides
            .output
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let out_dir = if output.is_absolute() {
            output
        } else {
            cwd.join(output)
        };

        let dialect = match overrides.dialect.or(file.dialect) {
            Some(name) => Dialect::parse(&name).ok_or(ConfigError::UnknownDialect(name))?,
            None => Dialect::default(),
        };

        let mut types: TypeMap = file.types.iter().collect();
        let list = match overrides.types {
            Some(list) => Some(list),
            None if file.types.is_empty() => Some(DEFAULT_TYPES.to_string()),
            None => None,
        };
        let mut rejected_types = Vec::new();
        if let Some(list) = list {
            let (parsed, rejected) = TypeMap::parse_list(&list);
            types.extend(&parsed);
            rejected_types = rejected;
        }

        let models_only = overrides.models_only || file.models_only.unwrap_or(false);
        let mode = if models_only {
            GenerateMode::ModelsOnly
        } else {
            GenerateMode::WithDefaultQuery
        };

        Ok(Self {
            dbml,
            types,
            rejected_types,
            options: GenerateOptions {
                out_dir,
                field_nullable: overrides.field_nullable
                    || file.field_nullable.unwrap_or(false),
                mode,
                dialect,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> PathBuf {
        PathBuf::from("/work")
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let overrides = Overrides {
            dbml: Some(PathBuf::from("schema.dbml")),
            ..Overrides::default()
        };
        let settings =
            GenerateSettings::resolve(overrides, FileConfig::default(), &cwd()).expect("resolve");

        assert_eq!(settings.dbml, PathBuf::from("schema.dbml"));
        assert_eq!(settings.options.out_dir, PathBuf::from("/work/./gen/crud"));
        assert_eq!(settings.types.get("datetime"), Some("String"));
        assert_eq!(settings.types.len(), 1);
        assert!(!settings.options.field_nullable);
        assert_eq!(settings.options.mode, GenerateMode::WithDefaultQuery);
        assert_eq!(settings.options.dialect, Dialect::Postgres);
    }

    #[test]
    fn missing_schema_is_a_configuration_error() {
        let err = GenerateSettings::resolve(Overrides::default(), FileConfig::default(), &cwd())
            .expect_err("no dbml");
        assert!(matches!(err, ConfigError::MissingDbml));
    }

    #[test]
    fn flags_win_over_file_values() {
        let file: FileConfig = toml::from_str(
            r#"
            dbml = "from_file.dbml"
            output = "/abs/out"
            dialect = "sqlite"
            models_only = true

            [types]
            timestamp = "String"
            "#,
        )
        .expect("decode");
        let overrides = Overrides {
            dbml: Some(PathBuf::from("from_flag.dbml")),
            dialect: Some("mysql".to_string()),
            types: Some("datetime=i64, bad, json=serde_json::Value".to_string()),
            ..Overrides::default()
        };

        let settings = GenerateSettings::resolve(overrides, file, &cwd()).expect("resolve");
        assert_eq!(settings.dbml, PathBuf::from("from_flag.dbml"));
        assert_eq!(settings.options.out_dir, PathBuf::from("/abs/out"));
        assert_eq!(settings.options.dialect, Dialect::MySql);
        assert_eq!(settings.options.mode, GenerateMode::ModelsOnly);
        assert_eq!(settings.types.get("timestamp"), Some("String"));
        assert_eq!(settings.types.get("datetime"), Some("i64"));
        assert_eq!(settings.types.get("json"), Some("serde_json::Value"));
        assert_eq!(settings.rejected_types, vec!["bad".to_string()]);
    }

    #[test]
    fn file_types_replace_the_default_list() {
        let file = FileConfig {
            dbml: Some(PathBuf::from("s.dbml")),
            types: BTreeMap::from([("uuid".to_string(), "String".to_string())]),
            field_nullable: Some(true),
            ..FileConfig::default()
        };
        let settings =
            GenerateSettings::resolve(Overrides::default(), file, &cwd()).expect("resolve");
        assert_eq!(settings.types.get("datetime"), None);
        assert_eq!(settings.types.get("uuid"), Some("String"));
        assert!(settings.options.field_nullable);
    }

    #[test]
    fn unknown_dialect_is_rejected() {
        let overrides = Overrides {
            dbml: Some(PathBuf::from("s.dbml")),
            dialect: Some("oracle".to_string()),
            ..Overrides::default()
        };
        let err = GenerateSettings::resolve(overrides, FileConfig::default(), &cwd())
            .expect_err("bad dialect");
        assert!(matches!(err, ConfigError::UnknownDialect(name) if name == "oracle"));
    }

    #[test]
    fn unknown_keys_fail_to_decode() {
        assert!(toml::from_str::<FileConfig>("colour = \"red\"").is_err());
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let path = std::env::temp_dir().join(format!("dbmlgen_cfg_{}.toml", uuid::Uuid::new_v4()));
        let err = FileConfig::load(&path).expect_err("missing");
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
