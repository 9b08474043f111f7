//! Error types for ministack.
//!
//! Only the outer shell of the tool can fail: loading a context file,
//! parsing a `key=value` override, or serializing the declared stack.
//! Configuration resolution and topology declaration are infallible by
//! design and never produce these errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ministack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for ministack.
#[derive(Error, Debug)]
pub enum Error {
    /// Context file could not be read.
    #[error("Failed to read context file '{path}': {source}")]
    ContextFileRead {
        /// Path to the context file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Context file is not valid JSON or has the wrong shape.
    #[error("Failed to parse context file '{path}': {message}")]
    ContextFileParse {
        /// Path to the context file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// A `-c` override was not of the form `key=value`.
    #[error("Invalid context override '{0}': expected key=value")]
    InvalidOverride(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ContextFileRead { .. } | Error::ContextFileParse { .. } => 3,
            Error::InvalidOverride(_) => 2,
            _ => 1,
        }
    }
}
