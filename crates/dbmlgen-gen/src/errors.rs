use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the code generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid output path: {0}")]
    InvalidPath(String),
    #[error("{tables} all map to module `{stem}`")]
    DuplicateModule { stem: String, tables: String },
    #[error("{tables} all generate struct `{name}`")]
    DuplicateStruct { name: String, tables: String },
    #[error("columns {columns} of `{table}` all map to field `{field}`")]
    DuplicateField {
        table: String,
        field: String,
        columns: String,
    },
}
