//! Generator configuration files

use std::path::Path;

use multilink_core::{DatasetConfig, InstanceMeta};

/// Load dataset options from a RON file; missing fields keep their defaults
pub fn load_config(path: impl AsRef<Path>) -> Result<DatasetConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
    ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
}

/// Load the per-instance metadata record from a JSON template
pub fn load_meta_template(path: impl AsRef<Path>) -> Result<InstanceMeta, ConfigError> {
    InstanceMeta::load(path).map_err(|e| ConfigError::Template(e.to_string()))
}

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Metadata template error: {0}")]
    Template(String),
}
