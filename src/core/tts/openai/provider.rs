//! OpenAI TTS provider implementation.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.openai.com/v1/audio/speech`
//! - Models: gpt-4o-mini-tts, tts-1, tts-1-hd
//! - Voices: alloy, ash, ballad, cedar, coral, echo, fable, marin, nova, onyx, sage, shimmer, verse
//! - Output: always requested as `pcm` (24kHz 16-bit mono little-endian)
//! - Speed: 0.25 to 4.0

use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use super::config::{AudioOutputFormat, OpenAITTSModel, OpenAIVoice};
use super::messages::SpeechRequest;
use crate::config::{MAX_SPEED, MIN_SPEED, ProviderConfig, RedactedConfig};
use crate::core::tts::base::{
    AudioChunkStream, AudioFormatTag, HealthStatus, PCM_BYTES_PER_SAMPLE, PCM_SAMPLE_RATE,
    SynthesisOptions, SynthesisResult, TTSError, TTSResult,
};

/// OpenAI TTS API endpoint
pub const OPENAI_TTS_URL: &str = "https://api.openai.com/v1/audio/speech";

/// Timeout for a single synthesis request
pub const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for a health check probe
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Response Decoding
// =============================================================================

/// Duration in milliseconds of a 16-bit mono PCM payload.
///
/// `round(byte_len / 2 / sample_rate * 1000)`
pub fn pcm_duration_ms(byte_len: usize, sample_rate: u32) -> u64 {
    if sample_rate == 0 {
        return 0;
    }
    let samples = byte_len as f64 / f64::from(PCM_BYTES_PER_SAMPLE);
    (samples / f64::from(sample_rate) * 1000.0).round() as u64
}

/// Wrap a successful response body in a `SynthesisResult`.
///
/// The body is known to be raw PCM at 24kHz because that is what the
/// request asked for, so the payload itself is never inspected.
pub fn decode_pcm(audio: Bytes) -> SynthesisResult {
    let duration_ms = pcm_duration_ms(audio.len(), PCM_SAMPLE_RATE);
    SynthesisResult {
        audio,
        format: AudioFormatTag::Pcm16Le,
        sample_rate: PCM_SAMPLE_RATE,
        duration_ms,
    }
}

// =============================================================================
// OpenAI TTS Provider
// =============================================================================

/// OpenAI TTS provider using the OpenAI Audio Speech API.
///
/// The configuration is validated in [`OpenAITTS::new`] and never changes
/// afterwards. Calls share nothing but the HTTP connection pool, so one
/// instance can serve concurrent callers behind an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use waav_openai_tts::config::{ProviderConfig, ProviderOverrides};
/// use waav_openai_tts::core::tts::{OpenAITTS, SynthesisOptions};
///
/// #[tokio::main]
/// async fn main() {
///     let config = ProviderConfig::from_overrides(ProviderOverrides {
///         voice: Some("nova".to_string()),
///         ..Default::default()
///     });
///
///     let tts = OpenAITTS::new(config).unwrap();
///     let result = tts
///         .synthesize("Hello, world!", &SynthesisOptions::default())
///         .await
///         .unwrap();
///     println!("{} ms of audio", result.duration_ms);
/// }
/// ```
pub struct OpenAITTS {
    /// Validated provider configuration
    config: ProviderConfig,
    /// Parsed model
    model: OpenAITTSModel,
    /// Parsed default voice
    voice: OpenAIVoice,
    /// HTTP client (reused for connection pooling)
    http_client: Client,
}

impl std::fmt::Debug for OpenAITTS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAITTS")
            .field("model", &self.model)
            .field("voice", &self.voice)
            .field("speed", &self.config.speed)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl OpenAITTS {
    /// Create a new OpenAI TTS instance from a resolved configuration.
    pub fn new(config: ProviderConfig) -> TTSResult<Self> {
        config.validate()?;

        let model = OpenAITTSModel::from_id(&config.model).unwrap_or_default();
        let voice = OpenAIVoice::from_id(&config.voice).unwrap_or_default();

        let http_client = Client::builder()
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                TTSError::InvalidConfiguration(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!(
            model = %model,
            voice = %voice,
            speed = config.speed,
            "OpenAI TTS provider created"
        );

        Ok(Self {
            config,
            model,
            voice,
            http_client,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Get the configured model
    pub fn model(&self) -> OpenAITTSModel {
        self.model
    }

    /// Get the configured default voice
    pub fn voice(&self) -> OpenAIVoice {
        self.voice
    }

    /// Build the request body for `text`, resolving per-call options over
    /// the stored defaults.
    ///
    /// Instructions are only carried when they are non-empty and the model
    /// is `gpt-4o-mini-tts`. The encoding is always `pcm`.
    pub fn build_request(&self, text: &str, options: &SynthesisOptions) -> SpeechRequest {
        let voice = options
            .voice
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(self.voice.as_str());

        if let Some(speed) = options.speed {
            if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
                debug!(
                    speed,
                    min = MIN_SPEED,
                    max = MAX_SPEED,
                    "Per-call speed outside the supported range, forwarding as given"
                );
            }
        }
        let speed = options.speed.unwrap_or(self.config.speed);

        let instructions = options
            .instructions
            .as_ref()
            .or(self.config.instructions.as_ref())
            .filter(|s| !s.is_empty() && self.model.supports_instructions())
            .cloned();

        SpeechRequest {
            model: self.model.as_str().to_string(),
            input: text.to_string(),
            voice: voice.to_string(),
            response_format: AudioOutputFormat::Pcm.as_str().to_string(),
            speed,
            instructions,
        }
    }

    /// Synthesize `text` into 24kHz 16-bit PCM.
    ///
    /// A non-success HTTP status becomes `TTSError::SynthesisFailed` with the
    /// response body verbatim. Transport failures and timeouts surface as
    /// `TTSError::NetworkError`. Nothing is retried.
    pub async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> TTSResult<SynthesisResult> {
        if let Some(requested) = options.format.as_deref() {
            if AudioOutputFormat::parse(requested) != Some(AudioOutputFormat::Pcm) {
                warn!(
                    requested_format = %requested,
                    "OpenAI TTS only returns raw PCM, ignoring requested output format"
                );
            }
        }

        let request = self.build_request(text, options);

        debug!(
            model = %request.model,
            voice = %request.voice,
            speed = request.speed,
            chars = request.input.len(),
            instructions = request.instructions.is_some(),
            "Sending OpenAI TTS request"
        );

        let response = self
            .http_client
            .post(self.config.speech_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose()),
            )
            .timeout(SYNTHESIS_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %body,
                "OpenAI TTS request failed"
            );
            return Err(TTSError::SynthesisFailed {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TTSError::NetworkError(format!("Failed to read response: {e}")))?;

        let result = decode_pcm(audio);

        info!(
            bytes = result.audio.len(),
            duration_ms = result.duration_ms,
            voice = %request.voice,
            "OpenAI TTS synthesis complete"
        );

        Ok(result)
    }

    /// Stream variant of [`OpenAITTS::synthesize`].
    ///
    /// The OpenAI endpoint returns the whole payload at once, so this is NOT
    /// incremental: the stream performs one full synthesis when first polled
    /// and yields exactly one chunk holding all of the audio.
    pub fn stream_synthesize<'a>(
        &'a self,
        text: &'a str,
        options: SynthesisOptions,
    ) -> AudioChunkStream<'a> {
        stream::once(async move {
            self.synthesize(text, &options)
                .await
                .map(|result| result.audio)
        })
        .boxed()
    }

    /// Probe the models endpoint. Never fails; every error is folded into
    /// `HealthStatus::Unreachable`.
    pub async fn health_check(&self) -> HealthStatus {
        let response = self
            .http_client
            .get(self.config.models_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose()),
            )
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await;

        let status = match response {
            Ok(resp) if resp.status().is_success() => HealthStatus::Reachable,
            Ok(resp) => HealthStatus::Unreachable {
                reason: format!("HTTP {}", resp.status().as_u16()),
            },
            Err(e) => HealthStatus::Unreachable {
                reason: e.to_string(),
            },
        };

        if let HealthStatus::Unreachable { reason } = &status {
            warn!(reason = %reason, "OpenAI TTS health check failed");
        }

        status
    }

    /// Static description of the provider and its current configuration.
    pub fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": "openai",
            "version": env!("CARGO_PKG_VERSION"),
            "api_type": "HTTP REST",
            "output_format": AudioFormatTag::Pcm16Le.as_str(),
            "mime_type": AudioFormatTag::Pcm16Le.mime_type(),
            "sample_rate": PCM_SAMPLE_RATE,
            "supported_models": OpenAITTSModel::all().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
            "supported_voices": OpenAIVoice::all().iter().map(|v| v.as_str()).collect::<Vec<_>>(),
            "speed_range": {
                "min": MIN_SPEED,
                "max": MAX_SPEED,
                "default": crate::config::DEFAULT_SPEED
            },
            "endpoint": self.config.speech_url(),
            "config": RedactedConfig::from(&self.config),
            "documentation": "https://platform.openai.com/docs/api-reference/audio/createSpeech",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;

    fn config_with(model: &str, instructions: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_key: ApiKey::new("test_key"),
            model: model.to_string(),
            voice: "nova".to_string(),
            speed: 1.25,
            instructions: instructions.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_openai_tts_creation() {
        let tts = OpenAITTS::new(config_with("tts-1-hd", None)).unwrap();
        assert_eq!(tts.model(), OpenAITTSModel::Tts1Hd);
        assert_eq!(tts.voice(), OpenAIVoice::Nova);
        assert_eq!(tts.config().speed, 1.25);
    }

    #[test]
    fn test_creation_rejects_invalid_config() {
        let config = ProviderConfig {
            speed: 4.5,
            ..config_with("tts-1", None)
        };
        assert!(matches!(
            OpenAITTS::new(config),
            Err(TTSError::InvalidSpeed { .. })
        ));

        assert!(matches!(
            OpenAITTS::new(ProviderConfig::default()),
            Err(TTSError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_build_request_uses_defaults() {
        let tts = OpenAITTS::new(config_with("tts-1", None)).unwrap();
        let request = tts.build_request("Hello", &SynthesisOptions::default());

        assert_eq!(request.model, "tts-1");
        assert_eq!(request.input, "Hello");
        assert_eq!(request.voice, "nova");
        assert_eq!(request.speed, 1.25);
        assert_eq!(request.response_format, "pcm");
        assert!(request.instructions.is_none());
    }

    #[test]
    fn test_build_request_options_override_defaults() {
        let tts = OpenAITTS::new(config_with("gpt-4o-mini-tts", Some("Calm"))).unwrap();
        let options = SynthesisOptions::default()
            .with_voice("onyx")
            .with_speed(2.0)
            .with_instructions("Excited");
        let request = tts.build_request("Hello", &options);

        assert_eq!(request.voice, "onyx");
        assert_eq!(request.speed, 2.0);
        assert_eq!(request.instructions.as_deref(), Some("Excited"));
    }

    #[test]
    fn test_out_of_range_per_call_speed_is_forwarded() {
        let tts = OpenAITTS::new(config_with("tts-1", None)).unwrap();

        let request = tts.build_request("Hello", &SynthesisOptions::default().with_speed(8.0));
        assert_eq!(request.speed, 8.0);

        let request = tts.build_request("Hello", &SynthesisOptions::default().with_speed(0.1));
        assert_eq!(request.speed, 0.1);
    }

    #[test]
    fn test_build_request_round_trip() {
        let tts = OpenAITTS::new(config_with("tts-1", None)).unwrap();

        let options = SynthesisOptions::default().with_voice("sage").with_speed(0.5);
        let body = serde_json::to_string(&tts.build_request("Hi", &options)).unwrap();
        let parsed: SpeechRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.voice, "sage");
        assert_eq!(parsed.speed, 0.5);

        let body = serde_json::to_string(&tts.build_request("Hi", &SynthesisOptions::default()))
            .unwrap();
        let parsed: SpeechRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.voice, "nova");
        assert_eq!(parsed.speed, 1.25);
    }

    #[test]
    fn test_instructions_only_for_mini_tts() {
        let mini = OpenAITTS::new(config_with("gpt-4o-mini-tts", Some("Whisper softly"))).unwrap();
        let request = mini.build_request("Hi", &SynthesisOptions::default());
        assert_eq!(request.instructions.as_deref(), Some("Whisper softly"));

        let tts1 = OpenAITTS::new(config_with("tts-1", Some("Whisper softly"))).unwrap();
        let request = tts1.build_request("Hi", &SynthesisOptions::default());
        assert!(request.instructions.is_none());
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("instructions").is_none());

        let request = tts1.build_request(
            "Hi",
            &SynthesisOptions::default().with_instructions("Shout"),
        );
        assert!(request.instructions.is_none());
    }

    #[test]
    fn test_empty_instructions_dropped() {
        let mini = OpenAITTS::new(config_with("gpt-4o-mini-tts", None)).unwrap();
        let request = mini.build_request("Hi", &SynthesisOptions::default().with_instructions(""));
        assert!(request.instructions.is_none());
    }

    #[test]
    fn test_requested_format_is_ignored() {
        let tts = OpenAITTS::new(config_with("tts-1", None)).unwrap();
        let request = tts.build_request("Hi", &SynthesisOptions::default().with_format("mp3"));
        assert_eq!(request.response_format, "pcm");
    }

    #[test]
    fn test_decode_duration() {
        let result = decode_pcm(Bytes::from(vec![0u8; 48000]));
        assert_eq!(result.duration_ms, 1000);
        assert_eq!(result.sample_rate, 24000);
        assert_eq!(result.format, AudioFormatTag::Pcm16Le);
        assert_eq!(result.audio.len(), 48000);

        assert_eq!(decode_pcm(Bytes::new()).duration_ms, 0);
    }

    #[test]
    fn test_pcm_duration_rounding() {
        // 480 bytes = 240 samples = 10ms
        assert_eq!(pcm_duration_ms(480, 24000), 10);
        // 26 bytes = 13 samples = 0.54ms
        assert_eq!(pcm_duration_ms(26, 24000), 1);
        // 22 bytes = 11 samples = 0.46ms
        assert_eq!(pcm_duration_ms(22, 24000), 0);
        // 1 hour
        assert_eq!(pcm_duration_ms(172_800_000, 24000), 3_600_000);
        assert_eq!(pcm_duration_ms(100, 0), 0);
    }

    #[test]
    fn test_provider_info() {
        let tts = OpenAITTS::new(config_with("tts-1", None)).unwrap();
        let info = tts.get_provider_info();

        assert_eq!(info["provider"], "openai");
        assert_eq!(info["sample_rate"], 24000);
        assert_eq!(info["output_format"], "pcm_s16le");
        assert_eq!(info["mime_type"], "audio/pcm");
        assert_eq!(info["supported_voices"].as_array().unwrap().len(), 13);
        assert_eq!(info["config"]["has_api_key"], true);
        assert!(!info.to_string().contains("test_key"));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let tts = OpenAITTS::new(config_with("tts-1", None)).unwrap();
        assert!(!format!("{tts:?}").contains("test_key"));
    }
}
