//! Amazon Polly TTS provider module.
//!
//! This module provides text-to-speech synthesis using Amazon Polly.
//! It supports:
//!
//! - Voice discovery via DescribeVoices, filtered by engine
//! - Standard and neural engines
//! - MP3 output, returned as one complete payload
//! - Explicit AWS credentials supplied by [`crate::config::Configuration`]
//!
//! # Architecture
//!
//! The provider uses the AWS SDK for Rust to communicate with Amazon Polly.
//! The SDK handles request signing; [`AwsPollyProvider`] shapes requests and
//! classifies SDK failures into [`crate::core::tts::provider::ProviderFault`].
//!
//! # Example
//!
//! ```rust,ignore
//! use voxify_gateway::config::Configuration;
//! use voxify_gateway::core::tts::{PollyEngine, SynthesisClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Configuration::load()?;
//!     let client = SynthesisClient::new(&config);
//!
//!     let voices = client.list_voices(&["en-US", "en-GB"]).await?;
//!     let request = client.request("Hello from Amazon Polly!", voices[0].id(), PollyEngine::Neural).await?;
//!     let audio = client.synthesize(&request).await?;
//!     std::fs::write(audio.download_file_name(), &audio.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! # Pricing Considerations
//!
//! - Neural voices cost more than standard voices
//! - Pricing is per character synthesized

mod config;
mod provider;


pub use config::{
    DEFAULT_LANGUAGES, DEFAULT_REGION, MAX_TEXT_LENGTH, PollyEngine, PollyOutputFormat,
};
pub use provider::{AWS_POLLY_TTS_URL, AwsPollyProvider};
