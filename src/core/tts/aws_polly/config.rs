//! Configuration types for Amazon Polly.
//!
//! Defines the engine and output format choices exposed to callers, plus the
//! provider limits enforced before any request leaves the process.

use serde::{Deserialize, Serialize};

/// Maximum text length for SynthesizeSpeech with the standard and neural
/// engines (characters).
pub const MAX_TEXT_LENGTH: usize = 3000;

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Languages offered when no filter is configured.
pub const DEFAULT_LANGUAGES: &[&str] = &["en-US", "en-GB"];

// =============================================================================
// Polly Engine
// =============================================================================

/// Amazon Polly synthesis engine options.
///
/// - **Standard**: concatenative voices, cheapest
/// - **Neural**: higher-fidelity neural voices (default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PollyEngine {
    #[serde(rename = "standard")]
    Standard,
    #[default]
    #[serde(rename = "neural")]
    Neural,
}

impl PollyEngine {
    /// Convert to AWS API string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Neural => "neural",
        }
    }

    /// Strict parse; unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "neural" => Some(Self::Neural),
            _ => None,
        }
    }

    /// Maximum number of characters accepted per request with this engine.
    #[inline]
    pub fn max_text_length(&self) -> usize {
        match self {
            Self::Standard | Self::Neural => MAX_TEXT_LENGTH,
        }
    }
}

impl std::fmt::Display for PollyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Polly Output Format
// =============================================================================

/// Audio output formats offered to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PollyOutputFormat {
    #[default]
    #[serde(rename = "mp3")]
    Mp3,
}

impl PollyOutputFormat {
    /// Convert to AWS API string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }

    /// Get the MIME type for this format.
    #[inline]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }

    /// File name offered when the audio is downloaded.
    #[inline]
    pub fn download_file_name(&self) -> &'static str {
        match self {
            Self::Mp3 => "polly_output.mp3",
        }
    }
}

impl std::fmt::Display for PollyOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
