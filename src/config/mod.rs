//! Configuration module for the Voxify gateway
//!
//! Two independent pieces of configuration are loaded at startup:
//!
//! - [`Configuration`]: Amazon Polly credentials and region, read from the
//!   environment only. Missing credentials are fatal.
//! - [`ServerConfig`]: listen address, CORS, the voice language filter and the
//!   default engine. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Example
//! ```rust,no_run
//! use voxify_gateway::config::{self, ServerConfig};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = config::load()?;
//!
//! // Load from environment variables only
//! let server = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let server = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", server.address());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

mod credentials;
mod yaml;

pub use credentials::{
    ACCESS_KEY_ID_VAR, Configuration, REGION_VAR, SECRET_ACCESS_KEY_VAR, load,
};
pub use yaml::{SecurityYaml, ServerYaml, VoicesYaml, YamlConfig};

use crate::core::tts::{DEFAULT_LANGUAGES, PollyEngine};
use crate::errors::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Server configuration
///
/// Contains everything needed to run the HTTP surface except the provider
/// credentials, which live in [`Configuration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    /// Comma separated list of allowed origins, `*` for any. `None` disables
    /// cross-origin access.
    pub cors_allowed_origins: Option<String>,

    /// Language codes whose voices are offered.
    pub voice_languages: Vec<String>,
    /// Engine used when a request does not name one.
    pub default_engine: PollyEngine,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_allowed_origins: None,
            voice_languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            default_engine: PollyEngine::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `HOST`, `PORT`, `CORS_ALLOWED_ORIGINS`, `VOICE_LANGUAGES` and
    /// `POLLY_ENGINE`, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_sources(|key| std::env::var(key).ok(), None)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - The merged configuration is invalid
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml_config = YamlConfig::from_file(path)?;
        Self::from_sources(|key| std::env::var(key).ok(), Some(yaml_config))
    }

    /// Merge a variable lookup with optional YAML overrides, then validate.
    pub fn from_sources<F>(lookup: F, yaml: Option<YamlConfig>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let yaml = yaml.unwrap_or_default();
        let server = yaml.server.unwrap_or_default();
        let voices = yaml.voices.unwrap_or_default();
        let security = yaml.security.unwrap_or_default();

        let host = server
            .host
            .or_else(|| env("HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match server.port {
            Some(port) => port,
            None => match env("PORT") {
                Some(raw) => raw.parse::<u16>().map_err(|_| {
                    ConfigError::Invalid(format!("PORT must be a port number, got '{raw}'"))
                })?,
                None => DEFAULT_PORT,
            },
        };

        let cors_allowed_origins = security
            .cors_allowed_origins
            .or_else(|| env("CORS_ALLOWED_ORIGINS"));

        let voice_languages = match voices.languages {
            Some(languages) => languages,
            None => match env("VOICE_LANGUAGES") {
                Some(raw) => parse_language_list(&raw),
                None => DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            },
        };

        let default_engine = match voices.engine.or_else(|| env("POLLY_ENGINE")) {
            Some(raw) => PollyEngine::parse(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "Unknown Polly engine '{raw}', expected 'standard' or 'neural'"
                ))
            })?,
            None => PollyEngine::default(),
        };

        let config = Self {
            host,
            port,
            cors_allowed_origins,
            voice_languages,
            default_engine,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.voice_languages.iter().all(|l| l.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "At least one voice language must be configured".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
