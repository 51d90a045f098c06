//! Provider configuration.
//!
//! Configuration is assembled in three layers, highest priority first:
//! 1. Caller-supplied overrides (`ProviderOverrides`, from host JSON or YAML)
//! 2. Environment variables (`OPENAI_API_KEY`, `OPENAI_BASE_URL`)
//! 3. Built-in defaults
//!
//! The resolved `ProviderConfig` is immutable. `ProviderConfig::validate`
//! must pass before a provider is built from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::tts::openai::{OpenAITTSModel, OpenAIVoice};
use crate::core::tts::{TTSError, TTSResult};

/// Environment variable supplying the credential when none is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini-tts";
pub const DEFAULT_VOICE: &str = "coral";
pub const DEFAULT_SPEED: f32 = 1.0;
pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;

/// OpenAI API key. Zeroized when dropped and redacted in debug output.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key for building the `Authorization` header.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "ApiKey(<empty>)")
        } else {
            write!(f, "ApiKey(<redacted>)")
        }
    }
}

/// Caller-supplied configuration. Every field is optional; missing values
/// fall back to the environment and then to built-in defaults.
///
/// # Example YAML structure
/// ```yaml
/// api_key: "sk-..."
/// model: "gpt-4o-mini-tts"
/// voice: "coral"
/// speed: 1.0
/// instructions: "Speak in a cheerful and positive tone."
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderOverrides {
    #[serde(default, alias = "apiKey", alias = "OPENAI_API_KEY")]
    pub api_key: Option<String>,

    #[serde(default, alias = "OPENAI_TTS_MODEL")]
    pub model: Option<String>,

    #[serde(default, alias = "voice_id", alias = "OPENAI_TTS_VOICE")]
    pub voice: Option<String>,

    #[serde(default, alias = "speaking_rate", alias = "OPENAI_TTS_SPEED")]
    pub speed: Option<f32>,

    #[serde(default, alias = "OPENAI_TTS_INSTRUCTIONS")]
    pub instructions: Option<String>,

    #[serde(default, alias = "baseUrl", alias = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,
}

impl ProviderOverrides {
    /// Parse overrides from a host-provided JSON value. `null` yields no
    /// overrides.
    pub fn from_json(value: &serde_json::Value) -> TTSResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
            .map_err(|e| TTSError::InvalidConfiguration(format!("Invalid provider config: {e}")))
    }

    /// Load overrides from a YAML file.
    pub fn from_yaml_file(path: &Path) -> TTSResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TTSError::InvalidConfiguration(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        serde_yaml::from_str(&contents).map_err(|e| {
            TTSError::InvalidConfiguration(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: ProviderOverrides) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            voice: other.voice.or(self.voice),
            speed: other.speed.or(self.speed),
            instructions: other.instructions.or(self.instructions),
            base_url: other.base_url.or(self.base_url),
        }
    }
}

/// Resolved provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// OpenAI API key
    pub api_key: ApiKey,
    /// Model id (validated against `OpenAITTSModel`)
    pub model: String,
    /// Default voice id (validated against the voice catalog)
    pub voice: String,
    /// Default speaking speed, 0.25 to 4.0
    pub speed: f32,
    /// Default style instructions (gpt-4o-mini-tts only)
    pub instructions: Option<String>,
    /// API base URL without trailing slash
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            speed: DEFAULT_SPEED,
            instructions: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Resolve overrides against the process environment and defaults.
    pub fn from_overrides(overrides: ProviderOverrides) -> Self {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve overrides against an arbitrary environment lookup and the
    /// built-in defaults. Empty strings count as absent.
    pub fn resolve<F>(overrides: ProviderOverrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let defaults = Self::default();

        let api_key = non_empty(overrides.api_key)
            .or_else(|| non_empty(env(API_KEY_ENV)))
            .map(ApiKey::new)
            .unwrap_or_default();

        let base_url = non_empty(overrides.base_url)
            .or_else(|| non_empty(env(BASE_URL_ENV)))
            .unwrap_or_else(|| defaults.base_url.clone());

        Self {
            api_key,
            model: non_empty(overrides.model).unwrap_or_else(|| defaults.model.clone()),
            voice: non_empty(overrides.voice).unwrap_or_else(|| defaults.voice.clone()),
            speed: overrides.speed.unwrap_or(defaults.speed),
            instructions: non_empty(overrides.instructions),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Check the configuration, reporting only the first defect found.
    pub fn validate(&self) -> TTSResult<()> {
        if self.api_key.is_empty() {
            return Err(TTSError::MissingCredential {
                env_var: API_KEY_ENV,
            });
        }

        if OpenAIVoice::from_id(&self.voice).is_none() {
            return Err(TTSError::InvalidVoice {
                voice: self.voice.clone(),
                valid: OpenAIVoice::valid_ids(),
            });
        }

        // NaN fails the range check as well
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(TTSError::InvalidSpeed {
                speed: self.speed,
                min: MIN_SPEED,
                max: MAX_SPEED,
            });
        }

        if OpenAITTSModel::from_id(&self.model).is_none() {
            return Err(TTSError::InvalidModel {
                model: self.model.clone(),
                valid: OpenAITTSModel::valid_ids(),
            });
        }

        Ok(())
    }

    /// `POST` target for speech generation.
    pub fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.base_url)
    }

    /// `GET` target used by health checks.
    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }
}

/// JSON Schema of the configuration surface, for host UIs.
pub fn config_schema() -> serde_json::Value {
    serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "OpenAI TTS",
        "type": "object",
        "required": ["api_key"],
        "properties": {
            "api_key": {
                "type": "string",
                "description": format!("OpenAI API key (falls back to {API_KEY_ENV})"),
                "writeOnly": true,
                "x-secret": true
            },
            "model": {
                "type": "string",
                "enum": OpenAITTSModel::all().iter().map(|m| m.as_str()).collect::<Vec<_>>(),
                "default": DEFAULT_MODEL
            },
            "voice": {
                "type": "string",
                "enum": OpenAIVoice::all().iter().map(|v| v.as_str()).collect::<Vec<_>>(),
                "default": DEFAULT_VOICE
            },
            "speed": {
                "type": "number",
                "minimum": MIN_SPEED,
                "maximum": MAX_SPEED,
                "default": DEFAULT_SPEED
            },
            "instructions": {
                "type": "string",
                "description": "Style instructions, only used by gpt-4o-mini-tts"
            },
            "base_url": {
                "type": "string",
                "default": DEFAULT_BASE_URL
            }
        }
    })
}

/// Serializable view of a config with the credential redacted.
#[derive(Debug, Clone, Serialize)]
pub struct RedactedConfig<'a> {
    pub model: &'a str,
    pub voice: &'a str,
    pub speed: f32,
    pub instructions: Option<&'a str>,
    pub base_url: &'a str,
    pub has_api_key: bool,
}

impl<'a> From<&'a ProviderConfig> for RedactedConfig<'a> {
    fn from(config: &'a ProviderConfig) -> Self {
        Self {
            model: &config.model,
            voice: &config.voice,
            speed: config.speed,
            instructions: config.instructions.as_deref(),
            base_url: &config.base_url,
            has_api_key: !config.api_key.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn valid_config() -> ProviderConfig {
        ProviderConfig {
            api_key: ApiKey::new("sk-test"),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::resolve(ProviderOverrides::default(), no_env);
        assert_eq!(config.model, "gpt-4o-mini-tts");
        assert_eq!(config.voice, "coral");
        assert_eq!(config.speed, 1.0);
        assert!(config.instructions.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_env_fallback_for_credential() {
        let env: HashMap<&str, &str> = [(API_KEY_ENV, "sk-from-env")].into_iter().collect();
        let config = ProviderConfig::resolve(ProviderOverrides::default(), |k| {
            env.get(k).map(|v| v.to_string())
        });
        assert_eq!(config.api_key.expose(), "sk-from-env");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_credential_wins_over_env() {
        let overrides = ProviderOverrides {
            api_key: Some("sk-explicit".to_string()),
            ..Default::default()
        };
        let config = ProviderConfig::resolve(overrides, |_| Some("sk-env".to_string()));
        assert_eq!(config.api_key.expose(), "sk-explicit");
    }

    #[test]
    fn test_empty_credential_falls_back_to_env() {
        let overrides = ProviderOverrides {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        let config = ProviderConfig::resolve(overrides, |k| {
            (k == API_KEY_ENV).then(|| "sk-env".to_string())
        });
        assert_eq!(config.api_key.expose(), "sk-env");
    }

    #[test]
    fn test_missing_credential() {
        let config = ProviderConfig::resolve(ProviderOverrides::default(), no_env);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TTSError::MissingCredential { .. }));
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn test_invalid_voice_lists_catalog() {
        let config = ProviderConfig {
            voice: "robot".to_string(),
            ..valid_config()
        };
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("robot"));
        for voice in OpenAIVoice::all() {
            assert!(msg.contains(voice.as_str()), "missing {voice} in {msg}");
        }
    }

    #[test]
    fn test_speed_bounds() {
        for speed in [0.25, 1.0, 4.0] {
            let config = ProviderConfig {
                speed,
                ..valid_config()
            };
            assert!(config.validate().is_ok(), "speed {speed} should be valid");
        }

        for speed in [0.0, 0.24, 4.01, -1.0, f32::NAN] {
            let config = ProviderConfig {
                speed,
                ..valid_config()
            };
            let err = config.validate().unwrap_err();
            assert!(matches!(err, TTSError::InvalidSpeed { .. }));
        }

        let config = ProviderConfig {
            speed: 5.0,
            ..valid_config()
        };
        assert!(config.validate().unwrap_err().to_string().contains('5'));
    }

    #[test]
    fn test_invalid_model_lists_models() {
        let config = ProviderConfig {
            model: "whisper-1".to_string(),
            ..valid_config()
        };
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("gpt-4o-mini-tts"));
        assert!(msg.contains("tts-1"));
        assert!(msg.contains("tts-1-hd"));
    }

    #[test]
    fn test_validation_reports_first_failure_only() {
        let config = ProviderConfig {
            api_key: ApiKey::default(),
            voice: "robot".to_string(),
            speed: 9.0,
            model: "nope".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TTSError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_overrides_from_json_aliases() {
        let value = serde_json::json!({
            "apiKey": "sk-json",
            "voice_id": "nova",
            "speed": 1.25,
            "model": "tts-1"
        });
        let overrides = ProviderOverrides::from_json(&value).unwrap();
        assert_eq!(overrides.api_key.as_deref(), Some("sk-json"));
        assert_eq!(overrides.voice.as_deref(), Some("nova"));
        assert_eq!(overrides.speed, Some(1.25));
        assert_eq!(overrides.model.as_deref(), Some("tts-1"));

        assert!(ProviderOverrides::from_json(&serde_json::Value::Null).is_ok());
        assert!(ProviderOverrides::from_json(&serde_json::json!({"speed": "fast"})).is_err());
    }

    #[test]
    fn test_overrides_merge() {
        let base = ProviderOverrides {
            voice: Some("nova".to_string()),
            speed: Some(2.0),
            ..Default::default()
        };
        let top = ProviderOverrides {
            voice: Some("onyx".to_string()),
            ..Default::default()
        };
        let merged = base.merge(top);
        assert_eq!(merged.voice.as_deref(), Some("onyx"));
        assert_eq!(merged.speed, Some(2.0));
    }

    #[test]
    fn test_base_url_trailing_slash_and_endpoints() {
        let overrides = ProviderOverrides {
            base_url: Some("http://localhost:8080/v1/".to_string()),
            ..Default::default()
        };
        let config = ProviderConfig::resolve(overrides, no_env);
        assert_eq!(config.speech_url(), "http://localhost:8080/v1/audio/speech");
        assert_eq!(config.models_url(), "http://localhost:8080/v1/models");
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let config = valid_config();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-test"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_yaml_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "voice: sage\nspeed: 0.5\ninstructions: Calm").unwrap();
        let overrides = ProviderOverrides::from_yaml_file(file.path()).unwrap();
        assert_eq!(overrides.voice.as_deref(), Some("sage"));
        assert_eq!(overrides.speed, Some(0.5));
        assert_eq!(overrides.instructions.as_deref(), Some("Calm"));
    }

    #[test]
    fn test_config_schema_surface() {
        let schema = config_schema();
        assert_eq!(schema["required"][0], "api_key");
        assert_eq!(schema["properties"]["model"]["default"], "gpt-4o-mini-tts");
        assert_eq!(schema["properties"]["voice"]["default"], "coral");
        assert_eq!(
            schema["properties"]["voice"]["enum"].as_array().unwrap().len(),
            13
        );
        assert_eq!(schema["properties"]["speed"]["default"], 1.0);
    }
}
