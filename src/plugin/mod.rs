//! Plugin System
//!
//! The host-facing side of the crate. A plugin is initialized with a
//! [`PluginContext`] carrying the host registry and its JSON configuration;
//! on success it registers a [`TTSCapability`] that the host looks up by id.
//!
//! ```text
//! host JSON ──▶ OpenAITTSPlugin::init ──▶ PluginRegistry ──▶ dyn TTSCapability
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use waav_openai_tts::plugin::prelude::*;
//!
//! let registry = Arc::new(PluginRegistry::new());
//! let ctx = PluginContext::new(registry.clone(), "openai-tts", json!({ "voice": "nova" }));
//!
//! let mut plugin = OpenAITTSPlugin::new();
//! if plugin.init(&ctx) == PluginState::Active {
//!     let tts = registry.require_tts("openai")?;
//!     let audio = tts.synthesize("Hello", &SynthesisOptions::default()).await?;
//! }
//! ```

pub mod builtin;
pub mod capabilities;
pub mod error;
pub mod lifecycle;
pub mod metadata;
pub mod registry;

// Re-exports for convenience
pub use builtin::{OPENAI_PLUGIN_ID, OPENAI_PROVIDER_ID, OpenAITTSPlugin, openai_tts_metadata};
pub use capabilities::TTSCapability;
pub use error::PluginError;
pub use lifecycle::{PluginContext, PluginHealth, PluginLifecycle, PluginState};
pub use metadata::{PluginManifest, ProviderMetadata, ProviderType};
pub use registry::PluginRegistry;

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::builtin::{OPENAI_PROVIDER_ID, OpenAITTSPlugin};
    pub use super::capabilities::TTSCapability;
    pub use super::error::PluginError;
    pub use super::lifecycle::{PluginContext, PluginHealth, PluginLifecycle, PluginState};
    pub use super::metadata::{PluginManifest, ProviderMetadata};
    pub use super::registry::PluginRegistry;

    pub use async_trait::async_trait;
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;

    pub use crate::core::tts::{
        HealthStatus, SynthesisOptions, SynthesisResult, TTSError, TTSResult,
    };
}
