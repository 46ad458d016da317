use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings a pipe carries along its chain.
///
/// Every pipe produced by a step shares its predecessor's configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PiperConfig {
    /// Name recorded on the `pipe.step` tracing span.
    pub label: String,
    /// Emit the wrapped value on trace events. Off by default since values
    /// may be large.
    pub log_values: bool,
}

impl Default for PiperConfig {
    fn default() -> Self {
        Self {
            label: "pipe".to_string(),
            log_values: false,
        }
    }
}

impl PiperConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_log_values(mut self, log_values: bool) -> Self {
        self.log_values = log_values;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
