//! Error kinds surfaced by the collection pipeline.
//!
//! Every fatal condition has its own variant so a caller can tell
//! "nothing was scanned because the run is misconfigured" apart from
//! "the scan ran but a file could not be read".

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout `core`.
pub type CollectResult<T> = std::result::Result<T, CollectError>;

/// Misconfiguration detected before any file is scanned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("There is no locale specified in this application.")]
    MissingLocale,

    #[error("There is no catalog store registered.")]
    MissingCatalogStore,

    #[error("There is no template compiler registered.")]
    MissingTemplateCompiler,

    #[error("There is no file store registered.")]
    MissingFileStore,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// An unterminated string literal, reported at the offset of its opening quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated string literal starting at byte {offset}")]
pub struct LexError {
    pub offset: usize,
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{file}:{line}:{col}: unterminated string literal")]
    Lex {
        file: PathBuf,
        line: usize,
        col: usize,
        #[source]
        source: LexError,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog file {}: {reason}", path.display())]
    Catalog { path: PathBuf, reason: String },
}

impl CollectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CollectError::Config(_) => "config",
            CollectError::Lex { .. } => "lex",
            CollectError::Io { .. } => "io",
            CollectError::Catalog { .. } => "catalog",
        }
    }
}
