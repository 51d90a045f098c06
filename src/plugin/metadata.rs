//! Plugin and Provider Metadata Types
//!
//! Metadata the host uses for discovery, listing and documentation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Plugin manifest containing metadata about a plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Unique plugin identifier (e.g., "openai-tts")
    pub id: String,

    /// Human-readable plugin name
    pub name: String,

    /// Semantic version of the plugin
    pub version: semver::Version,

    /// Plugin author or organization
    pub author: String,

    /// Brief description of the plugin
    pub description: String,
}

impl PluginManifest {
    /// Create a new plugin manifest.
    ///
    /// `version` falls back to 1.0.0 if it is not valid semver.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: &str) -> Self {
        let parsed_version = match semver::Version::parse(version) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    version = %version,
                    error = %e,
                    "Invalid plugin version, falling back to 1.0.0"
                );
                semver::Version::new(1, 0, 0)
            }
        };

        Self {
            id: id.into(),
            name: name.into(),
            version: parsed_version,
            author: String::new(),
            description: String::new(),
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Provider metadata for discovery and documentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Provider identifier (e.g., "openai")
    pub name: String,

    /// Display name (e.g., "OpenAI TTS")
    pub display_name: String,

    /// Brief description
    pub description: String,

    /// Version string
    pub version: String,

    /// Required configuration keys (for validation)
    pub required_config_keys: Vec<String>,

    /// Optional configuration keys
    pub optional_config_keys: Vec<String>,

    /// Provider aliases
    pub aliases: Vec<String>,

    /// Supported models
    #[serde(default)]
    pub supported_models: Vec<String>,

    /// Provider features (e.g., "instructions", "speed-control")
    #[serde(default)]
    pub features: HashSet<String>,

    /// Provider type
    pub provider_type: ProviderType,
}

impl ProviderMetadata {
    /// Create TTS provider metadata
    pub fn tts(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            version: "1.0.0".to_string(),
            required_config_keys: vec!["api_key".to_string()],
            provider_type: ProviderType::TTS,
            ..Default::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Add multiple aliases
    pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Set optional config keys
    pub fn with_optional_config(
        mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.optional_config_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Add multiple features
    pub fn with_features(mut self, features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    /// Set supported models
    pub fn with_models(mut self, models: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.supported_models = models.into_iter().map(Into::into).collect();
        self
    }
}

/// Provider type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    TTS,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::TTS => write!(f, "tts"),
        }
    }
}
