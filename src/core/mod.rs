pub mod tts;

// Re-export commonly used types for convenience
pub use tts::{
    AudioPayload, PollyEngine, SpeechProvider, SynthesisClient, SynthesisRequest,
    SynthesisSession, SynthesisState, Voice,
};
