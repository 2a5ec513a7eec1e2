//! Configuration loading from disk.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::NvtConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::model::{NetworkConfiguration, ProductConfiguration};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<NvtConfig, ConfigError> {
    let content = read(path)?;
    let config: NvtConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Replace the listener address (command-line override) and re-validate.
pub fn override_bind_address(mut config: NvtConfig, bind: String) -> Result<NvtConfig, ConfigError> {
    config.listener.bind_address = bind;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// The network configuration template, from file or built in.
pub fn load_template(path: Option<&Path>) -> Result<NetworkConfiguration, ConfigError> {
    match path {
        Some(path) => load_json(path),
        None => Ok(NetworkConfiguration::template()),
    }
}

/// The product catalogue, from file or built in.
pub fn load_products(path: Option<&Path>) -> Result<ProductConfiguration, ConfigError> {
    match path {
        Some(path) => load_json(path),
        None => Ok(ProductConfiguration::default()),
    }
}
