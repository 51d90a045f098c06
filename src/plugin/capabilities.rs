//! Plugin Capability Traits
//!
//! A capability is the service object a plugin registers with the host.
//! Hosts only see the trait object; the concrete provider stays private to
//! the plugin.

use async_trait::async_trait;

use super::builtin::openai_tts_metadata;
use super::metadata::ProviderMetadata;
use crate::config::ProviderConfig;
use crate::core::tts::openai::{VOICE_CATALOG, VoiceCatalogEntry};
use crate::core::tts::{
    AudioChunkStream, HealthStatus, OpenAITTS, SynthesisOptions, SynthesisResult, TTSResult,
};

/// TTS (Text-to-Speech) provider capability
///
/// Implement this trait to register a TTS provider with the host.
#[async_trait]
pub trait TTSCapability: Send + Sync + 'static {
    /// Provider metadata for discovery and documentation
    fn metadata(&self) -> ProviderMetadata;

    /// Voices the provider can synthesize with
    fn voices(&self) -> &'static [VoiceCatalogEntry];

    /// Check a configuration without building a provider from it
    fn validate_config(&self, config: &ProviderConfig) -> TTSResult<()>;

    /// Synthesize `text` into a complete audio payload
    async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> TTSResult<SynthesisResult>;

    /// Synthesize `text` as a stream of audio chunks
    fn stream_synthesize<'a>(
        &'a self,
        text: &'a str,
        options: SynthesisOptions,
    ) -> AudioChunkStream<'a>;

    /// Probe the remote service. Never fails.
    async fn health_check(&self) -> HealthStatus;
}

#[async_trait]
impl TTSCapability for OpenAITTS {
    fn metadata(&self) -> ProviderMetadata {
        openai_tts_metadata()
    }

    fn voices(&self) -> &'static [VoiceCatalogEntry] {
        &VOICE_CATALOG
    }

    fn validate_config(&self, config: &ProviderConfig) -> TTSResult<()> {
        config.validate()
    }

    async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> TTSResult<SynthesisResult> {
        OpenAITTS::synthesize(self, text, options).await
    }

    fn stream_synthesize<'a>(
        &'a self,
        text: &'a str,
        options: SynthesisOptions,
    ) -> AudioChunkStream<'a> {
        OpenAITTS::stream_synthesize(self, text, options)
    }

    async fn health_check(&self) -> HealthStatus {
        OpenAITTS::health_check(self).await
    }
}
