//! Configuration data structures for SixDegrees.
//!
//! Defines the YAML config format. Every field has a default, so an empty
//! file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_TERMINATOR;
use crate::query::DEFAULT_SENTINEL;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for SixDegrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SixDegreesConfig {
    /// Config format version (currently "1.0").
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SixDegreesConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            dataset: DatasetConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetConfig
// ---------------------------------------------------------------------------

/// How record blocks and exclusion lists are delimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Line that ends an artist block in the dataset and an exclusion list
    /// in the command stream.
    #[serde(default = "default_terminator")]
    pub terminator: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            terminator: default_terminator(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Line printed after the last hop of a found path.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sentinel: default_sentinel(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is
    /// not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_version() -> String {
    "1.0".to_string()
}

fn default_terminator() -> String {
    DEFAULT_TERMINATOR.to_string()
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

fn default_log_filter() -> String {
    "sixdegrees=warn".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
