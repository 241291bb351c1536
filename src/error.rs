//! Crate-wide error type.
//!
//! Query-level problems (unknown artists, missing paths, unknown commands)
//! are not errors: they are rendered as output lines by the session. This
//! enum only covers failures that stop the program.

use std::path::PathBuf;

/// Errors raised while loading data, reading config, or writing output.
#[derive(Debug, thiserror::Error)]
pub enum SixDegreesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed dataset at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("{0}")]
    Other(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SixDegreesError>;
