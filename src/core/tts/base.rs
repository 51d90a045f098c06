//! Shared TTS types: errors, per-call options, synthesis results and the
//! health probe outcome.

use bytes::Bytes;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Sample rate of every payload this provider returns.
pub const PCM_SAMPLE_RATE: u32 = 24000;

/// Bytes per sample for 16-bit PCM.
pub const PCM_BYTES_PER_SAMPLE: u32 = 2;

/// Channel count of the PCM payload (mono).
pub const PCM_CHANNELS: u16 = 1;

/// Result type for TTS operations
pub type TTSResult<T> = Result<T, TTSError>;

/// Errors raised by the TTS provider.
///
/// The first four variants are configuration defects found during
/// validation and are never retried. `SynthesisFailed` carries the HTTP
/// status and the server's error text verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TTSError {
    #[error("OpenAI API key is required (set api_key or the {env_var} environment variable)")]
    MissingCredential { env_var: &'static str },

    #[error("Invalid voice '{voice}'. Valid voices: {valid}")]
    InvalidVoice { voice: String, valid: String },

    #[error("Invalid speed {speed}. Speed must be between {min} and {max}")]
    InvalidSpeed { speed: f32, min: f32, max: f32 },

    #[error("Invalid model '{model}'. Valid models: {valid}")]
    InvalidModel { model: String, valid: String },

    #[error("OpenAI TTS failed: {status} {body}")]
    SynthesisFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl TTSError {
    /// Whether this error is a configuration defect (operator must fix it).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::InvalidVoice { .. }
                | Self::InvalidSpeed { .. }
                | Self::InvalidModel { .. }
                | Self::InvalidConfiguration(_)
        )
    }
}

/// Audio format tag attached to every synthesis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AudioFormatTag {
    /// Raw signed 16-bit little-endian PCM, mono.
    #[default]
    #[serde(rename = "pcm_s16le")]
    Pcm16Le,
}

impl AudioFormatTag {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pcm16Le => "pcm_s16le",
        }
    }

    #[inline]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pcm16Le => "audio/pcm",
        }
    }
}

impl std::fmt::Display for AudioFormatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-call synthesis options. Every field falls back to the provider's
/// stored default when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisOptions {
    /// Voice id override
    #[serde(default)]
    pub voice: Option<String>,

    /// Speed override
    #[serde(default)]
    pub speed: Option<f32>,

    /// Style instructions override (only honoured by gpt-4o-mini-tts)
    #[serde(default)]
    pub instructions: Option<String>,

    /// Output format requested by the caller. The provider always returns
    /// raw PCM; any other value is logged and substituted.
    #[serde(default)]
    pub format: Option<String>,
}

impl SynthesisOptions {
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Decoded synthesis output.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    /// Raw audio bytes
    pub audio: Bytes,
    /// Encoding of `audio`
    pub format: AudioFormatTag,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Playback duration derived from the byte length
    pub duration_ms: u64,
}

/// Stream of audio chunks produced by `stream_synthesize`.
pub type AudioChunkStream<'a> = BoxStream<'a, TTSResult<Bytes>>;

/// Outcome of a reachability probe against the OpenAI API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The API answered with a success status
    Reachable,
    /// The probe failed (transport error, timeout or non-success status)
    Unreachable { reason: String },
}

impl HealthStatus {
    #[inline]
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reachable => write!(f, "reachable"),
            Self::Unreachable { reason } => write!(f, "unreachable: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_failed_message_contains_status() {
        let err = TTSError::SynthesisFailed {
            status: 401,
            body: "Incorrect API key provided".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("OpenAI TTS failed: 401"));
        assert!(msg.contains("Incorrect API key provided"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_missing_credential_mentions_required() {
        let err = TTSError::MissingCredential {
            env_var: "OPENAI_API_KEY",
        };
        assert!(err.to_string().contains("required"));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_options_builder() {
        let options = SynthesisOptions::default()
            .with_voice("nova")
            .with_speed(1.5)
            .with_instructions("Whisper")
            .with_format("mp3");
        assert_eq!(options.voice.as_deref(), Some("nova"));
        assert_eq!(options.speed, Some(1.5));
        assert_eq!(options.instructions.as_deref(), Some("Whisper"));
        assert_eq!(options.format.as_deref(), Some("mp3"));
    }

    #[test]
    fn test_health_status() {
        assert!(HealthStatus::Reachable.is_reachable());
        let down = HealthStatus::Unreachable {
            reason: "timeout".to_string(),
        };
        assert!(!down.is_reachable());
        assert_eq!(down.to_string(), "unreachable: timeout");
    }

    #[test]
    fn test_format_tag() {
        assert_eq!(AudioFormatTag::Pcm16Le.as_str(), "pcm_s16le");
        assert_eq!(AudioFormatTag::default(), AudioFormatTag::Pcm16Le);
        assert_eq!(AudioFormatTag::Pcm16Le.mime_type(), "audio/pcm");
    }
}
