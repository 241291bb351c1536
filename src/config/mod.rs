//! Configuration loading.
//!
//! Sources, highest priority first:
//! 1. `SIXDEGREES_LOG` environment variable (logging filter only)
//! 2. An explicit `--config` file
//! 3. `config.yaml` in the platform config directory
//! 4. Built-in defaults

pub mod schema;

use std::path::{Path, PathBuf};

use crate::error::{Result, SixDegreesError};

pub use schema::SixDegreesConfig;

/// Environment variable that overrides `logging.filter`.
pub const LOG_ENV_VAR: &str = "SIXDEGREES_LOG";

/// `config.yaml` under the platform config dir, e.g.
/// `~/.config/sixdegrees/config.yaml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "sixdegrees")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
}

/// Parse a YAML config file.
pub fn load_config_file(path: &Path) -> Result<SixDegreesConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| SixDegreesError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(SixDegreesConfig::default());
    }
    let config: SixDegreesConfig = serde_yaml::from_str(&text)?;
    validate(&config)?;
    Ok(config)
}

/// Resolve the effective config.
///
/// An explicit path must exist; the default location is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<SixDegreesConfig> {
    let mut config = match explicit {
        Some(path) => load_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => load_config_file(&path)?,
            _ => SixDegreesConfig::default(),
        },
    };

    apply_env_overrides(&mut config, std::env::var(LOG_ENV_VAR).ok());
    Ok(config)
}

fn apply_env_overrides(config: &mut SixDegreesConfig, log_filter: Option<String>) {
    if let Some(filter) = log_filter.filter(|f| !f.trim().is_empty()) {
        config.logging.filter = filter;
    }
}

fn validate(config: &SixDegreesConfig) -> Result<()> {
    if config.dataset.terminator.is_empty() {
        return Err(SixDegreesError::Config(
            "dataset.terminator must not be empty".into(),
        ));
    }
    Ok(())
}
