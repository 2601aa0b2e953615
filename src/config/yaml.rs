use serde::Deserialize;
use std::path::Path;

use crate::errors::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// override the environment.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///
/// voices:
///   languages:
///     - "en-US"
///     - "en-GB"
///   engine: "neural"
///
/// security:
///   cors_allowed_origins: "https://app.example.com"
/// ```
///
/// AWS credentials are read from the environment only.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub voices: Option<VoicesYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Voice catalog settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct VoicesYaml {
    pub languages: Option<Vec<String>>,
    /// Engine name, validated when merged.
    pub engine: Option<String>,
}

/// Security settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    pub cors_allowed_origins: Option<String>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::File {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&contents)
    }

    /// Parse YAML configuration from a string
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
