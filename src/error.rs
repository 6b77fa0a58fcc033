//! Error types for the annotator

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, transforming or writing a source file
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// Input file does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Read or write failure on a known path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not a JavaScript-family file
    #[error("unsupported language for extension: {extension}")]
    UnsupportedLanguage { extension: String },

    /// A function body never closed (strict mode only)
    #[error("unbalanced braces: body of `{name}` opened on line {line} never closes")]
    UnbalancedBraces { name: String, line: usize },

    /// Config file could not be read or parsed
    #[error("config error: {message}")]
    Config { message: String },

    /// Run summary could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnnotateError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::FileNotFound { .. }
            | Self::Io { .. }
            | Self::Config { .. }
            | Self::Json(_) => 1,
            Self::UnsupportedLanguage { .. } => 2,
            Self::UnbalancedBraces { .. } => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
