//! Error taxonomy for the gateway.
//!
//! Three closed enumerations cover everything the core can report:
//!
//! - [`ConfigError`]: startup failures. These are fatal; the server refuses to
//!   offer synthesis until they are resolved.
//! - [`ProviderError`]: failures while listing voices.
//! - [`SynthesisError`]: failures of a single synthesis action, either rejected
//!   locally before any network call or reported by the provider.
//!
//! Provider SDK error types never cross this boundary. [`app_error::AppError`]
//! turns the last two into HTTP responses.

pub mod app_error;

use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The access key id or secret access key is empty or absent.
    #[error(
        "AWS credentials are missing: set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY before starting"
    )]
    MissingCredentials,

    /// The YAML configuration file could not be read.
    #[error("Failed to read config file {path}: {message}")]
    File { path: String, message: String },

    /// The YAML configuration file is malformed.
    #[error("Failed to parse YAML config: {0}")]
    Parse(String),

    /// A setting has an invalid value.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors returned by voice listing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("The speech provider rejected the configured credentials")]
    AuthFailure,

    #[error("The speech provider could not be reached")]
    Unreachable,

    #[error("Unexpected speech provider error: {0}")]
    Unexpected(String),
}

/// Errors returned by a synthesis action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Please enter some text")]
    EmptyInput,

    #[error("Text length {length} exceeds maximum {max} characters")]
    TextTooLong { length: usize, max: usize },

    #[error("Voice is not available for the requested engine: {0}")]
    InvalidVoice(String),

    #[error("The speech provider rejected the configured credentials")]
    AuthFailure,

    #[error("The speech provider could not be reached")]
    Unreachable,

    #[error("Unexpected speech provider error: {0}")]
    Unexpected(String),

    /// A synthesis for the same session is still pending.
    #[error("A synthesis request is already in progress for this session")]
    InProgress,
}

impl SynthesisError {
    /// Whether the request was rejected before reaching the provider.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::TextTooLong { .. } | Self::InvalidVoice(_) | Self::InProgress
        )
    }

    /// Stable machine-readable identifier, used in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::TextTooLong { .. } => "text_too_long",
            Self::InvalidVoice(_) => "invalid_voice",
            Self::AuthFailure => "auth_failure",
            Self::Unreachable => "unreachable",
            Self::Unexpected(_) => "unexpected",
            Self::InProgress => "in_progress",
        }
    }
}

impl From<ProviderError> for SynthesisError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::AuthFailure => Self::AuthFailure,
            ProviderError::Unreachable => Self::Unreachable,
            ProviderError::Unexpected(message) => Self::Unexpected(message),
        }
    }
}

impl ProviderError {
    /// Stable machine-readable identifier, used in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthFailure => "auth_failure",
            Self::Unreachable => "unreachable",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_errors() {
        assert!(SynthesisError::EmptyInput.is_local());
        assert!(SynthesisError::TextTooLong { length: 3001, max: 3000 }.is_local());
        assert!(SynthesisError::InvalidVoice("Nobody".into()).is_local());
        assert!(SynthesisError::InProgress.is_local());
        assert!(!SynthesisError::AuthFailure.is_local());
        assert!(!SynthesisError::Unexpected("boom".into()).is_local());
    }

    #[test]
    fn test_provider_error_conversion_keeps_message() {
        let err: SynthesisError = ProviderError::Unexpected("ServiceFailure: down".into()).into();
        assert_eq!(err, SynthesisError::Unexpected("ServiceFailure: down".into()));
        assert_eq!(
            SynthesisError::from(ProviderError::AuthFailure),
            SynthesisError::AuthFailure
        );
        assert_eq!(
            SynthesisError::from(ProviderError::Unreachable),
            SynthesisError::Unreachable
        );
    }

    #[test]
    fn test_text_too_long_message() {
        let err = SynthesisError::TextTooLong {
            length: 3500,
            max: 3000,
        };
        assert_eq!(
            err.to_string(),
            "Text length 3500 exceeds maximum 3000 characters"
        );
    }

    #[test]
    fn test_missing_credentials_message_is_explicit() {
        let msg = ConfigError::MissingCredentials.to_string();
        assert!(msg.contains("AWS_ACCESS_KEY_ID"));
        assert!(msg.contains("AWS_SECRET_ACCESS_KEY"));
    }
}
