//! Text-to-speech core: voice catalog, request validation, synthesis and
//! per-session serialisation.

pub mod aws_polly;
mod client;
pub mod provider;
mod session;
mod types;

pub use aws_polly::{
    AWS_POLLY_TTS_URL, AwsPollyProvider, DEFAULT_LANGUAGES, DEFAULT_REGION, MAX_TEXT_LENGTH,
    PollyEngine, PollyOutputFormat,
};
pub use client::SynthesisClient;
pub use provider::{
    FaultKind, ProviderAudio, ProviderFault, ProviderVoice, SpeechParams, SpeechProvider,
};
pub use session::SynthesisSession;
pub use types::{AudioPayload, SynthesisRequest, SynthesisState, Voice, check_text};
