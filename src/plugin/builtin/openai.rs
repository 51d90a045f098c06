//! OpenAI TTS plugin.
//!
//! Wraps [`OpenAITTS`] in the plugin lifecycle: `init` turns host JSON into a
//! validated provider and registers it, `shutdown` removes it again.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{ProviderConfig, ProviderOverrides, config_schema};
use crate::core::tts::OpenAITTS;
use crate::core::tts::openai::OpenAITTSModel;
use crate::plugin::capabilities::TTSCapability;
use crate::plugin::error::PluginError;
use crate::plugin::lifecycle::{
    PluginContext, PluginEntry, PluginHealth, PluginLifecycle, PluginState,
};
use crate::plugin::metadata::{PluginManifest, ProviderMetadata};
use crate::plugin::registry::PluginRegistry;

/// Plugin id announced in the manifest.
pub const OPENAI_PLUGIN_ID: &str = "openai-tts";

/// Id the TTS capability is registered under.
pub const OPENAI_PROVIDER_ID: &str = "openai";

/// Metadata describing the OpenAI TTS provider.
pub fn openai_tts_metadata() -> ProviderMetadata {
    ProviderMetadata::tts(OPENAI_PROVIDER_ID, "OpenAI TTS")
        .with_description("Text-to-speech via the OpenAI Audio Speech API (24kHz 16-bit PCM)")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_aliases([OPENAI_PLUGIN_ID])
        .with_optional_config(["model", "voice", "speed", "instructions", "base_url"])
        .with_models(OpenAITTSModel::all().iter().map(|m| m.as_str()))
        .with_features(["instructions", "speed-control", "pcm-output"])
}

/// The OpenAI TTS plugin.
pub struct OpenAITTSPlugin {
    manifest: PluginManifest,
    entry: PluginEntry,
    provider: Option<Arc<OpenAITTS>>,
    registry: Option<Arc<PluginRegistry>>,
}

impl OpenAITTSPlugin {
    pub fn new() -> Self {
        Self {
            manifest: PluginManifest::new(
                OPENAI_PLUGIN_ID,
                "OpenAI TTS",
                env!("CARGO_PKG_VERSION"),
            )
            .with_author("WaaV")
            .with_description("Text-to-speech via the OpenAI Audio Speech API"),
            entry: PluginEntry::new(),
            provider: None,
            registry: None,
        }
    }

    /// Why the last `init` failed, if it did.
    pub fn last_error(&self) -> Option<&str> {
        self.entry.last_error.as_deref()
    }

    /// The live provider while the plugin is active.
    pub fn provider(&self) -> Option<&Arc<OpenAITTS>> {
        self.provider.as_ref()
    }

    fn start(&self, ctx: &PluginContext) -> Result<Arc<OpenAITTS>, PluginError> {
        let overrides = ProviderOverrides::from_json(&ctx.config)?;
        let config = ProviderConfig::resolve(overrides, |name| (ctx.env)(name));
        let provider = Arc::new(OpenAITTS::new(config)?);

        let capability: Arc<dyn TTSCapability> = provider.clone();
        ctx.registry.register_tts(OPENAI_PROVIDER_ID, capability)?;

        Ok(provider)
    }
}

impl Default for OpenAITTSPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginLifecycle for OpenAITTSPlugin {
    fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    fn state(&self) -> PluginState {
        self.entry.state
    }

    fn init(&mut self, ctx: &PluginContext) -> PluginState {
        if !self.entry.state.can_init() {
            tracing::warn!(
                plugin_id = %ctx.plugin_id,
                state = %self.entry.state,
                "Ignoring init outside the uninitialized state"
            );
            return self.entry.state;
        }

        match self.start(ctx) {
            Ok(provider) => {
                tracing::info!(
                    plugin_id = %ctx.plugin_id,
                    model = %provider.model().as_str(),
                    voice = %provider.voice().as_str(),
                    "OpenAI TTS plugin initialized"
                );
                self.provider = Some(provider);
                self.registry = Some(ctx.registry.clone());
                self.entry.transition(PluginState::Active);
            }
            Err(e) => {
                tracing::error!(
                    plugin_id = %ctx.plugin_id,
                    error = %e,
                    config_error = e.is_config_error(),
                    "OpenAI TTS plugin failed to initialize"
                );
                self.entry.record_error(e.to_string());
                self.entry.transition(PluginState::Failed);
            }
        }

        self.entry.state
    }

    fn shutdown(&mut self) {
        if self.entry.state == PluginState::ShutDown {
            return;
        }

        if let Some(registry) = self.registry.take() {
            registry.unregister_tts(OPENAI_PROVIDER_ID);
        }
        self.provider = None;

        tracing::info!(
            plugin_id = %self.manifest.id,
            uptime_ms = self.entry.uptime().as_millis() as u64,
            "OpenAI TTS plugin shut down"
        );
        self.entry.transition(PluginState::ShutDown);
    }

    async fn health(&self) -> PluginHealth {
        if !self.entry.state.can_process() {
            return PluginHealth::Unknown;
        }

        match &self.provider {
            Some(provider) if provider.health_check().await.is_reachable() => {
                PluginHealth::Healthy
            }
            Some(_) => PluginHealth::Unhealthy,
            None => PluginHealth::Unknown,
        }
    }

    fn config_schema(&self) -> Option<serde_json::Value> {
        Some(config_schema())
    }
}
