//! Data model of the synthesis workflow.

use bytes::Bytes;
use serde::Serialize;

use super::aws_polly::{PollyEngine, PollyOutputFormat};
use super::provider::ProviderVoice;
use crate::errors::SynthesisError;

/// A provider voice offered to the UI.
///
/// Voices are only produced by the synthesis client from a provider listing;
/// there is no public constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    id: String,
    #[serde(rename = "name")]
    display_name: String,
    language_code: String,
    gender: Option<String>,
    engines: Vec<PollyEngine>,
}

impl Voice {
    pub(crate) fn from_provider(voice: ProviderVoice) -> Self {
        Self {
            id: voice.id,
            display_name: voice.name,
            language_code: voice.language_code,
            gender: voice.gender,
            engines: voice.engines,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn engines(&self) -> &[PollyEngine] {
        &self.engines
    }

    pub fn supports(&self, engine: PollyEngine) -> bool {
        self.engines.contains(&engine)
    }

    pub fn supports_neural(&self) -> bool {
        self.supports(PollyEngine::Neural)
    }

    /// Label for a selection control, e.g. `Joanna (en-US - Female)`.
    pub fn label(&self) -> String {
        match &self.gender {
            Some(gender) => format!("{} ({} - {})", self.display_name, self.language_code, gender),
            None => format!("{} ({})", self.display_name, self.language_code),
        }
    }
}

/// One unit of synthesis work.
///
/// Built from a [`Voice`] so a request can never name a voice the provider
/// did not list, and never pairs a voice with an engine it lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    text: String,
    voice_id: String,
    engine: PollyEngine,
    output_format: PollyOutputFormat,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        voice: &Voice,
        engine: PollyEngine,
    ) -> Result<Self, SynthesisError> {
        if !voice.supports(engine) {
            return Err(SynthesisError::InvalidVoice(format!(
                "{} does not support the {} engine",
                voice.id(),
                engine
            )));
        }

        Ok(Self {
            text: text.into(),
            voice_id: voice.id().to_string(),
            engine,
            output_format: PollyOutputFormat::default(),
        })
    }

    pub fn with_output_format(mut self, output_format: PollyOutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice_id(&self) -> &str {
        &self.voice_id
    }

    pub fn engine(&self) -> PollyEngine {
        self.engine
    }

    pub fn output_format(&self) -> PollyOutputFormat {
        self.output_format
    }

    /// Length as counted against the provider limit.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Reject text that is blank or longer than `engine` accepts.
///
/// Needs neither the catalog nor the network.
pub fn check_text(text: &str, engine: PollyEngine) -> Result<(), SynthesisError> {
    if text.trim().is_empty() {
        return Err(SynthesisError::EmptyInput);
    }

    let length = text.chars().count();
    let max = engine.max_text_length();
    if length > max {
        return Err(SynthesisError::TextTooLong { length, max });
    }
    Ok(())
}

/// Synthesized audio, exactly as the provider emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    pub bytes: Bytes,
    pub mime_type: String,
    pub format: PollyOutputFormat,
}

impl AudioPayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn download_file_name(&self) -> &'static str {
        self.format.download_file_name()
    }
}

/// Progress of one synthesis action.
///
/// `Idle -> Validating -> (Requesting -> {Succeeded | Failed}) | RejectedLocally`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthesisState {
    #[default]
    Idle,
    Validating,
    Requesting,
    Succeeded,
    Failed,
    RejectedLocally,
}

impl SynthesisState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::RejectedLocally)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: SynthesisState) -> bool {
        use SynthesisState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Requesting)
                | (Validating, RejectedLocally)
                | (Requesting, Succeeded)
                | (Requesting, Failed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, engines: Vec<PollyEngine>) -> Voice {
        Voice::from_provider(ProviderVoice {
            id: id.to_string(),
            name: id.to_string(),
            language_code: "en-US".to_string(),
            gender: Some("Female".to_string()),
            engines,
        })
    }

    #[test]
    fn test_request_requires_engine_support() {
        let standard_only = voice("Ivy", vec![PollyEngine::Standard]);
        let result = SynthesisRequest::new("Hello", &standard_only, PollyEngine::Neural);
        assert!(matches!(result, Err(SynthesisError::InvalidVoice(_))));

        let request = SynthesisRequest::new("Hello", &standard_only, PollyEngine::Standard).unwrap();
        assert_eq!(request.voice_id(), "Ivy");
        assert_eq!(request.output_format(), PollyOutputFormat::Mp3);
    }

    #[test]
    fn test_char_count_uses_characters() {
        let joanna = voice("Joanna", vec![PollyEngine::Neural]);
        let request = SynthesisRequest::new("héllo", &joanna, PollyEngine::Neural).unwrap();
        assert_eq!(request.char_count(), 5);
    }

    #[test]
    fn test_voice_label() {
        let joanna = voice("Joanna", vec![PollyEngine::Neural]);
        assert_eq!(joanna.label(), "Joanna (en-US - Female)");
        assert!(joanna.supports_neural());
    }

    #[test]
    fn test_state_transitions() {
        use SynthesisState::*;
        assert!(Idle.can_transition_to(Validating));
        assert!(Validating.can_transition_to(RejectedLocally));
        assert!(Requesting.can_transition_to(Failed));
        assert!(!Idle.can_transition_to(Requesting));
        assert!(!Succeeded.can_transition_to(Validating));
        assert!(RejectedLocally.is_terminal());
        assert!(!Requesting.is_terminal());
    }

    #[test]
    fn test_check_text() {
        assert_eq!(check_text(" \n\t", PollyEngine::Neural), Err(SynthesisError::EmptyInput));
        assert_eq!(check_text("Hello", PollyEngine::Neural), Ok(()));

        let max = PollyEngine::Neural.max_text_length();
        assert_eq!(check_text(&"é".repeat(max), PollyEngine::Neural), Ok(()));
        assert_eq!(
            check_text(&"a".repeat(max + 1), PollyEngine::Neural),
            Err(SynthesisError::TextTooLong { length: max + 1, max })
        );
    }
}
