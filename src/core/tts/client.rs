//! Synthesis client: the only component that talks to the speech provider.
//!
//! The client owns request shaping, the local validation that must happen
//! before any network call, and the translation of provider faults into the
//! closed [`ProviderError`] / [`SynthesisError`] enums.
//!
//! No retry is attempted and no timeout is imposed beyond the transport
//! default. A failed attempt is surfaced to the caller immediately.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::aws_polly::{AwsPollyProvider, PollyEngine};
use super::provider::{SpeechParams, SpeechProvider};
use super::types::{AudioPayload, SynthesisRequest, SynthesisState, Voice, check_text};
use crate::config::Configuration;
use crate::errors::{ProviderError, SynthesisError};

/// Tracks the state machine of one synthesis action.
struct Attempt {
    id: u64,
    state: SynthesisState,
}

impl Attempt {
    fn new(id: u64) -> Self {
        Self {
            id,
            state: SynthesisState::Idle,
        }
    }

    fn advance(&mut self, next: SynthesisState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!(request_id = self.id, from = ?self.state, to = ?next, "Synthesis state");
        self.state = next;
    }
}

pub struct SynthesisClient {
    provider: Arc<dyn SpeechProvider>,
    /// Most recently fetched voice list.
    catalog: RwLock<Option<Arc<Vec<Voice>>>>,
    request_counter: AtomicU64,
}

impl SynthesisClient {
    /// Create a client backed by Amazon Polly with the given credentials.
    pub fn new(config: &Configuration) -> Self {
        Self::with_provider(Arc::new(AwsPollyProvider::new(config)))
    }

    /// Create a client backed by an arbitrary provider.
    pub fn with_provider(provider: Arc<dyn SpeechProvider>) -> Self {
        Self {
            provider,
            catalog: RwLock::new(None),
            request_counter: AtomicU64::new(0),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// List neural-capable voices whose language code is in `languages`,
    /// sorted by display name (ties broken by id).
    ///
    /// Calls the provider exactly once and records the result as the current
    /// catalog. An empty result is not an error.
    pub async fn list_voices<S: AsRef<str>>(
        &self,
        languages: &[S],
    ) -> Result<Vec<Voice>, ProviderError> {
        let voices = self.fetch_voices(languages).await?;
        *self.catalog.write().await = Some(Arc::new(voices.clone()));
        Ok(voices)
    }

    /// Return the current catalog, fetching it once if nothing has been
    /// fetched yet.
    ///
    /// Concurrent first callers share a single provider call.
    pub async fn catalog<S: AsRef<str>>(
        &self,
        languages: &[S],
    ) -> Result<Arc<Vec<Voice>>, ProviderError> {
        if let Some(voices) = self.catalog.read().await.as_ref() {
            return Ok(voices.clone());
        }

        let mut slot = self.catalog.write().await;
        if let Some(voices) = slot.as_ref() {
            return Ok(voices.clone());
        }
        let voices = Arc::new(self.fetch_voices(languages).await?);
        *slot = Some(voices.clone());
        Ok(voices)
    }

    async fn fetch_voices<S: AsRef<str>>(
        &self,
        languages: &[S],
    ) -> Result<Vec<Voice>, ProviderError> {
        let described = self
            .provider
            .describe_voices(PollyEngine::Neural)
            .await
            .map_err(|fault| {
                warn!(provider = self.provider.name(), error = %fault, "Voice listing failed");
                fault.into_provider_error()
            })?;

        let total = described.len();
        let mut voices: Vec<Voice> = described
            .into_iter()
            .filter(|v| {
                languages
                    .iter()
                    .any(|lang| lang.as_ref().eq_ignore_ascii_case(&v.language_code))
            })
            .filter(|v| v.engines.contains(&PollyEngine::Neural))
            .map(Voice::from_provider)
            .collect();

        voices.sort_by(|a, b| {
            a.display_name()
                .cmp(b.display_name())
                .then_with(|| a.id().cmp(b.id()))
        });

        info!(
            provider = self.provider.name(),
            described = total,
            offered = voices.len(),
            "Fetched voice catalog"
        );
        Ok(voices)
    }

    /// Look up a voice in the current catalog.
    pub async fn find_voice(&self, voice_id: &str) -> Option<Voice> {
        self.catalog
            .read()
            .await
            .as_ref()
            .and_then(|voices| voices.iter().find(|v| v.id() == voice_id).cloned())
    }

    /// Build a request for `voice_id` from the current catalog.
    pub async fn request(
        &self,
        text: impl Into<String>,
        voice_id: &str,
        engine: PollyEngine,
    ) -> Result<SynthesisRequest, SynthesisError> {
        let voice = self
            .find_voice(voice_id)
            .await
            .ok_or_else(|| SynthesisError::InvalidVoice(voice_id.to_string()))?;
        SynthesisRequest::new(text, &voice, engine)
    }

    /// Synthesize `request` into an audio payload.
    pub async fn synthesize(
        &self,
        request: &SynthesisRequest,
    ) -> Result<AudioPayload, SynthesisError> {
        self.synthesize_traced(request).await.0
    }

    /// Like [`synthesize`](Self::synthesize), also returning the terminal
    /// state the action reached.
    pub async fn synthesize_traced(
        &self,
        request: &SynthesisRequest,
    ) -> (Result<AudioPayload, SynthesisError>, SynthesisState) {
        let request_id = self.request_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let mut attempt = Attempt::new(request_id);

        attempt.advance(SynthesisState::Validating);
        if let Err(err) = self.validate(request).await {
            debug!(request_id, error = %err, "Synthesis rejected locally");
            attempt.advance(SynthesisState::RejectedLocally);
            return (Err(err), attempt.state);
        }

        attempt.advance(SynthesisState::Requesting);
        let result = self.send(request_id, request).await;
        attempt.advance(if result.is_ok() {
            SynthesisState::Succeeded
        } else {
            SynthesisState::Failed
        });
        (result, attempt.state)
    }

    async fn validate(&self, request: &SynthesisRequest) -> Result<(), SynthesisError> {
        check_text(request.text(), request.engine())?;

        match self.find_voice(request.voice_id()).await {
            Some(voice) if voice.supports(request.engine()) => Ok(()),
            _ => Err(SynthesisError::InvalidVoice(request.voice_id().to_string())),
        }
    }

    async fn send(
        &self,
        request_id: u64,
        request: &SynthesisRequest,
    ) -> Result<AudioPayload, SynthesisError> {
        debug!(
            request_id,
            text_len = request.char_count(),
            voice = request.voice_id(),
            engine = %request.engine(),
            "Synthesizing text"
        );

        let params = SpeechParams {
            text: request.text().to_string(),
            voice_id: request.voice_id().to_string(),
            engine: request.engine(),
            output_format: request.output_format(),
        };

        let audio = self.provider.synthesize_speech(&params).await.map_err(|fault| {
            warn!(request_id, provider = self.provider.name(), error = %fault, "Synthesis failed");
            fault.into_synthesis_error(
                request.voice_id(),
                request.char_count(),
                request.engine().max_text_length(),
            )
        })?;

        debug!(
            request_id,
            audio_bytes = audio.bytes.len(),
            "Successfully synthesized audio"
        );

        Ok(AudioPayload {
            mime_type: audio
                .content_type
                .unwrap_or_else(|| request.output_format().mime_type().to_string()),
            bytes: audio.bytes,
            format: request.output_format(),
        })
    }
}
