//! The seam between the synthesis client and a concrete speech provider.
//!
//! [`SpeechProvider`] exposes the two remote operations the gateway consumes:
//! describing voices and synthesizing speech. Implementations classify their
//! native failures into a [`ProviderFault`]; the client turns faults into the
//! public error enums, so SDK types never travel further than the provider
//! module.

use async_trait::async_trait;
use bytes::Bytes;

use super::aws_polly::{PollyEngine, PollyOutputFormat};
use crate::errors::{ProviderError, SynthesisError};

/// A voice as reported by the provider, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderVoice {
    pub id: String,
    pub name: String,
    pub language_code: String,
    pub gender: Option<String>,
    /// Engines the voice can be used with. Engines unknown to the gateway are
    /// left out.
    pub engines: Vec<PollyEngine>,
}

/// Parameters of a single synthesis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechParams {
    pub text: String,
    pub voice_id: String,
    pub engine: PollyEngine,
    pub output_format: PollyOutputFormat,
}

/// Audio returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAudio {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Category of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Credentials were rejected.
    Auth,
    /// Network or transport failure; the provider was never reached or did
    /// not answer.
    Transport,
    /// The voice does not exist or does not support the engine.
    InvalidVoice,
    /// The provider refused the text as too long.
    TextTooLong,
    /// Any other provider-reported fault.
    Other,
}

/// A classified provider failure carrying the provider's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFault {
    pub kind: FaultKind,
    pub message: String,
}

impl ProviderFault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Error surfaced by voice listing.
    pub fn into_provider_error(self) -> ProviderError {
        match self.kind {
            FaultKind::Auth => ProviderError::AuthFailure,
            FaultKind::Transport => ProviderError::Unreachable,
            FaultKind::InvalidVoice | FaultKind::TextTooLong | FaultKind::Other => {
                ProviderError::Unexpected(self.message)
            }
        }
    }

    /// Error surfaced by synthesis. `max` is the limit that applied to the
    /// request, `length` its character count.
    pub fn into_synthesis_error(self, voice_id: &str, length: usize, max: usize) -> SynthesisError {
        match self.kind {
            FaultKind::Auth => SynthesisError::AuthFailure,
            FaultKind::Transport => SynthesisError::Unreachable,
            FaultKind::InvalidVoice => SynthesisError::InvalidVoice(voice_id.to_string()),
            FaultKind::TextTooLong => SynthesisError::TextTooLong { length, max },
            FaultKind::Other => SynthesisError::Unexpected(self.message),
        }
    }
}

impl std::fmt::Display for ProviderFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// A text-to-speech backend.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Describe the voices available for `engine`. Called once per listing.
    async fn describe_voices(&self, engine: PollyEngine)
    -> Result<Vec<ProviderVoice>, ProviderFault>;

    /// Synthesize `params` into a complete in-memory audio payload.
    async fn synthesize_speech(&self, params: &SpeechParams)
    -> Result<ProviderAudio, ProviderFault>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_to_provider_error() {
        assert_eq!(
            ProviderFault::new(FaultKind::Auth, "bad sig").into_provider_error(),
            ProviderError::AuthFailure
        );
        assert_eq!(
            ProviderFault::new(FaultKind::Transport, "dns").into_provider_error(),
            ProviderError::Unreachable
        );
        assert_eq!(
            ProviderFault::new(FaultKind::Other, "ServiceFailureException: oops")
                .into_provider_error(),
            ProviderError::Unexpected("ServiceFailureException: oops".into())
        );
    }

    #[test]
    fn test_fault_to_synthesis_error() {
        assert_eq!(
            ProviderFault::new(FaultKind::InvalidVoice, "no such voice")
                .into_synthesis_error("Joanna", 5, 3000),
            SynthesisError::InvalidVoice("Joanna".into())
        );
        assert_eq!(
            ProviderFault::new(FaultKind::TextTooLong, "too long")
                .into_synthesis_error("Joanna", 2900, 3000),
            SynthesisError::TextTooLong {
                length: 2900,
                max: 3000
            }
        );
        assert_eq!(
            ProviderFault::new(FaultKind::Other, "Throttling: slow down")
                .into_synthesis_error("Joanna", 5, 3000),
            SynthesisError::Unexpected("Throttling: slow down".into())
        );
    }
}
