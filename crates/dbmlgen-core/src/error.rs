use thiserror::Error;

/// Core error type shared across dbmlgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not valid DBML.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    /// Reading the document failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}

/// Convenience alias for results returned by dbmlgen crates.
pub type Result<T> = std::result::Result<T, Error>;
