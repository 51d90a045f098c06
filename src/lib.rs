pub mod config;
pub mod core;
pub mod plugin;

// Re-export commonly used items for convenience
pub use config::{ApiKey, ProviderConfig, ProviderOverrides};
pub use core::*;
pub use plugin::{
    OpenAITTSPlugin, PluginContext, PluginError, PluginLifecycle, PluginRegistry, PluginState,
    TTSCapability,
};
