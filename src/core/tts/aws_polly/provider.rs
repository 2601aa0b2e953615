//! Amazon Polly provider implementation.
//!
//! Implements [`SpeechProvider`] on top of the AWS SDK for Rust, using the
//! static credentials from [`Configuration`].
//!
//! # API Reference
//!
//! - Service: Amazon Polly
//! - Operations: DescribeVoices, SynthesizeSpeech
//! - Engines used here: standard, neural
//! - Output format used here: mp3
//!
//! SDK errors are classified into a [`ProviderFault`] in this module and go no
//! further.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::config::Builder as PollyConfigBuilder;
use aws_sdk_polly::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_polly::types::{Engine, OutputFormat, TextType, VoiceId};
use tracing::{debug, info};

use super::config::{PollyEngine, PollyOutputFormat};
use crate::config::Configuration;
use crate::core::tts::provider::{
    FaultKind, ProviderAudio, ProviderFault, ProviderVoice, SpeechParams, SpeechProvider,
};

/// Amazon Polly API base URL (for documentation purposes)
pub const AWS_POLLY_TTS_URL: &str = "https://polly.{region}.amazonaws.com/v1/speech";

/// Service error codes meaning the credentials were rejected.
const AUTH_ERROR_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "SignatureDoesNotMatch",
    "AccessDeniedException",
    "ExpiredTokenException",
    "InvalidClientTokenId",
    "MissingAuthenticationToken",
];

// =============================================================================
// Helper Functions
// =============================================================================

/// Convert PollyEngine to AWS SDK Engine type
fn engine_to_sdk(engine: PollyEngine) -> Engine {
    match engine {
        PollyEngine::Standard => Engine::Standard,
        PollyEngine::Neural => Engine::Neural,
    }
}

/// Convert an AWS SDK Engine to PollyEngine; engines the gateway does not
/// offer map to `None`.
fn engine_from_sdk(engine: &Engine) -> Option<PollyEngine> {
    match engine {
        Engine::Standard => Some(PollyEngine::Standard),
        Engine::Neural => Some(PollyEngine::Neural),
        _ => None,
    }
}

/// Convert PollyOutputFormat to AWS SDK OutputFormat type
fn output_format_to_sdk(format: PollyOutputFormat) -> OutputFormat {
    match format {
        PollyOutputFormat::Mp3 => OutputFormat::Mp3,
    }
}

/// Classify a service error from its AWS error code and message.
pub(crate) fn classify_service_error(code: Option<&str>, message: Option<&str>) -> ProviderFault {
    let code = code.unwrap_or("Unknown");
    let message = message.unwrap_or("no message");
    let full = format!("{code}: {message}");

    let kind = if AUTH_ERROR_CODES.contains(&code) {
        FaultKind::Auth
    } else {
        match code {
            "TextLengthExceededException" => FaultKind::TextTooLong,
            "EngineNotSupportedException" | "LanguageNotSupportedException" => {
                FaultKind::InvalidVoice
            }
            "ValidationException" if message.to_lowercase().contains("voice") => {
                FaultKind::InvalidVoice
            }
            _ => FaultKind::Other,
        }
    };

    ProviderFault::new(kind, full)
}

/// Classify any SDK error returned by a Polly operation.
fn classify<E, R>(err: &SdkError<E, R>) -> ProviderFault
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            ProviderFault::new(FaultKind::Transport, DisplayErrorContext(err).to_string())
        }
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            classify_service_error(service_err.code(), service_err.message())
        }
        _ => ProviderFault::new(FaultKind::Other, DisplayErrorContext(err).to_string()),
    }
}

// =============================================================================
// Amazon Polly Provider
// =============================================================================

/// Amazon Polly provider using the AWS SDK.
///
/// The SDK handles request signing; this type only shapes requests and
/// classifies failures.
pub struct AwsPollyProvider {
    client: PollyClient,
    region: String,
}

impl AwsPollyProvider {
    /// Build a Polly client from explicit credentials. Does not touch the
    /// network.
    pub fn new(config: &Configuration) -> Self {
        let credentials = Credentials::new(
            config.access_key_id(),
            config.secret_access_key(),
            None,
            None,
            "voxify",
        );

        let polly_config = PollyConfigBuilder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region().to_string()))
            .credentials_provider(credentials)
            .build();

        info!(region = config.region(), "Amazon Polly client initialised");

        Self {
            client: PollyClient::from_conf(polly_config),
            region: config.region().to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl SpeechProvider for AwsPollyProvider {
    fn name(&self) -> &'static str {
        "aws-polly"
    }

    async fn describe_voices(
        &self,
        engine: PollyEngine,
    ) -> Result<Vec<ProviderVoice>, ProviderFault> {
        let output = self
            .client
            .describe_voices()
            .engine(engine_to_sdk(engine))
            .include_additional_language_codes(false)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let voices: Vec<ProviderVoice> = output
            .voices()
            .iter()
            .filter_map(|voice| {
                let id = voice.id()?.as_str().to_string();
                let language_code = voice.language_code()?.as_str().to_string();
                Some(ProviderVoice {
                    name: voice.name().map(str::to_string).unwrap_or_else(|| id.clone()),
                    id,
                    language_code,
                    gender: voice.gender().map(|g| g.as_str().to_string()),
                    engines: voice
                        .supported_engines()
                        .iter()
                        .filter_map(engine_from_sdk)
                        .collect(),
                })
            })
            .collect();

        debug!(count = voices.len(), engine = %engine, "Polly described voices");
        Ok(voices)
    }

    async fn synthesize_speech(
        &self,
        params: &SpeechParams,
    ) -> Result<ProviderAudio, ProviderFault> {
        let response = self
            .client
            .synthesize_speech()
            .text(params.text.as_str())
            .voice_id(VoiceId::from(params.voice_id.as_str()))
            .engine(engine_to_sdk(params.engine))
            .output_format(output_format_to_sdk(params.output_format))
            .text_type(TextType::Text)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let content_type = response.content_type().map(str::to_string);
        let audio = response.audio_stream.collect().await.map_err(|e| {
            ProviderFault::new(
                FaultKind::Transport,
                format!("Failed to read audio stream: {e}"),
            )
        })?;

        Ok(ProviderAudio {
            bytes: audio.into_bytes(),
            content_type,
        })
    }
}
