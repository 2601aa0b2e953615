//! Provider credentials resolved from the process environment.

use crate::core::tts::DEFAULT_REGION;
use crate::errors::ConfigError;

pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const REGION_VAR: &str = "AWS_REGION";

/// Credentials and region used to reach Amazon Polly.
///
/// Read-only after loading. The secret never appears in `Debug` output and is
/// wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    access_key_id: String,
    secret_access_key: String,
    region: String,
}

impl Configuration {
    /// Resolve credentials from the process environment.
    ///
    /// Never contacts the network. `.env` values are visible here once
    /// `dotenvy` has run at startup.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve credentials through an arbitrary variable lookup.
    ///
    /// Blank values count as absent. The region falls back to
    /// [`DEFAULT_REGION`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let access_key_id = non_blank(ACCESS_KEY_ID_VAR).ok_or(ConfigError::MissingCredentials)?;
        let secret_access_key =
            non_blank(SECRET_ACCESS_KEY_VAR).ok_or(ConfigError::MissingCredentials)?;
        let region = non_blank(REGION_VAR).unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            access_key_id,
            secret_access_key,
            region,
        })
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("access_key_id", &"[redacted]")
            .field("secret_access_key", &"[redacted]")
            .field("region", &self.region)
            .finish()
    }
}

/// Zeroize the key pair when the configuration is dropped.
impl Drop for Configuration {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        self.access_key_id.zeroize();
        self.secret_access_key.zeroize();
    }
}

/// Load provider credentials from the environment.
pub fn load() -> Result<Configuration, ConfigError> {
    Configuration::load()
}
