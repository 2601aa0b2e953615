//! Shared fakes for integration tests.
//!
//! [`FakeProvider`] stands in for Amazon Polly: it returns a fixed voice list
//! and a fixed audio payload, counts every call, and can hold a synthesis open
//! until the test releases it.

// Allow dead code in test infrastructure - each test binary uses a subset
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;

use voxify_gateway::core::tts::{
    FaultKind, PollyEngine, ProviderAudio, ProviderFault, ProviderVoice, SpeechParams,
    SpeechProvider, SynthesisClient,
};

/// Audio bytes returned by default. Not valid MP3; nothing here decodes it.
pub const FAKE_AUDIO: &[u8] = b"ID3\x04\x00fake-mp3-frames\xff\xfb\x90\x00";

/// Holds a synthesis open until released.
#[derive(Clone, Default)]
pub struct Gate {
    /// Signalled when the provider receives a synthesis call.
    pub entered: Arc<Notify>,
    /// Signal to let the pending synthesis finish.
    pub release: Arc<Notify>,
}

pub struct FakeProvider {
    voices: Mutex<Vec<ProviderVoice>>,
    describe_fault: Mutex<Option<ProviderFault>>,
    synth_result: Mutex<Result<ProviderAudio, ProviderFault>>,
    gate: Option<Gate>,
    describe_delay: Option<Duration>,
    describe_calls: AtomicUsize,
    synth_calls: AtomicUsize,
    last_params: Mutex<Option<SpeechParams>>,
}

impl FakeProvider {
    pub fn new(voices: Vec<ProviderVoice>) -> Self {
        Self {
            voices: Mutex::new(voices),
            describe_fault: Mutex::new(None),
            synth_result: Mutex::new(Ok(ProviderAudio {
                bytes: Bytes::from_static(FAKE_AUDIO),
                content_type: Some("audio/mpeg".to_string()),
            })),
            gate: None,
            describe_delay: None,
            describe_calls: AtomicUsize::new(0),
            synth_calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
        }
    }

    pub fn with_audio(self, bytes: &'static [u8], content_type: Option<&str>) -> Self {
        *self.synth_result.lock().unwrap() = Ok(ProviderAudio {
            bytes: Bytes::from_static(bytes),
            content_type: content_type.map(str::to_string),
        });
        self
    }

    pub fn failing_synthesis(self, kind: FaultKind, message: &str) -> Self {
        *self.synth_result.lock().unwrap() = Err(ProviderFault::new(kind, message));
        self
    }

    pub fn failing_describe(self, kind: FaultKind, message: &str) -> Self {
        *self.describe_fault.lock().unwrap() = Some(ProviderFault::new(kind, message));
        self
    }

    /// Make every voice listing take `delay` before answering.
    pub fn slow_describe(mut self, delay: Duration) -> Self {
        self.describe_delay = Some(delay);
        self
    }

    /// Make every synthesis wait on the returned gate.
    pub fn gated(mut self) -> (Self, Gate) {
        let gate = Gate::default();
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn set_voices(&self, voices: Vec<ProviderVoice>) {
        *self.voices.lock().unwrap() = voices;
    }

    pub fn describe_calls(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }

    pub fn synth_calls(&self) -> usize {
        self.synth_calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<SpeechParams> {
        self.last_params.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn describe_voices(
        &self,
        _engine: PollyEngine,
    ) -> Result<Vec<ProviderVoice>, ProviderFault> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.describe_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(fault) = self.describe_fault.lock().unwrap().clone() {
            return Err(fault);
        }
        Ok(self.voices.lock().unwrap().clone())
    }

    async fn synthesize_speech(
        &self,
        params: &SpeechParams,
    ) -> Result<ProviderAudio, ProviderFault> {
        self.synth_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.synth_result.lock().unwrap().clone()
    }
}

pub fn voice(id: &str, language_code: &str, engines: &[PollyEngine]) -> ProviderVoice {
    named_voice(id, id, language_code, engines)
}

pub fn named_voice(
    id: &str,
    name: &str,
    language_code: &str,
    engines: &[PollyEngine],
) -> ProviderVoice {
    ProviderVoice {
        id: id.to_string(),
        name: name.to_string(),
        language_code: language_code.to_string(),
        gender: Some("Female".to_string()),
        engines: engines.to_vec(),
    }
}

/// A scrambled mix of languages and engines.
pub fn mixed_voices() -> Vec<ProviderVoice> {
    use PollyEngine::{Neural, Standard};
    vec![
        voice("Matthew", "en-US", &[Standard, Neural]),
        voice("Raveena", "en-IN", &[Neural]),
        voice("Joanna", "en-US", &[Neural, Standard]),
        voice("Celine", "fr-FR", &[Standard, Neural]),
        voice("Amy", "en-GB", &[Neural]),
        voice("Joey", "en-US", &[Standard]),
        voice("Brian", "en-GB", &[Standard]),
    ]
}

pub fn english() -> Vec<String> {
    vec!["en-US".to_string(), "en-GB".to_string()]
}

/// A client over `provider` with its catalog already fetched for
/// [`english`].
pub async fn client_with_catalog(provider: Arc<FakeProvider>) -> Arc<SynthesisClient> {
    let client = Arc::new(SynthesisClient::with_provider(provider));
    client
        .list_voices(&english())
        .await
        .expect("fake voice listing");
    client
}
