//! Plugin Lifecycle Management
//!
//! This module defines the plugin lifecycle states and transitions.
//!
//! # Lifecycle State Machine
//!
//! ```text
//!     +---------------+
//!     | Uninitialized |
//!     +-------+-------+
//!             | init()
//!      +------+------+
//!      |             |
//!      v             v
//! +----+---+    +----+---+
//! | Active |    | Failed |
//! +----+---+    +----+---+
//!      |             |
//!      +------+------+
//!             | shutdown()
//!             v
//!       +-----+----+
//!       | ShutDown |
//!       +----------+
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use super::metadata::PluginManifest;
use super::registry::PluginRegistry;

/// Plugin lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginState {
    /// `init` has not been called yet
    #[default]
    Uninitialized,

    /// Capability is registered and serving requests
    Active,

    /// `init` rejected the configuration; nothing is registered
    Failed,

    /// `shutdown` has run; terminal
    ShutDown,
}

impl std::fmt::Display for PluginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginState::Uninitialized => write!(f, "uninitialized"),
            PluginState::Active => write!(f, "active"),
            PluginState::Failed => write!(f, "failed"),
            PluginState::ShutDown => write!(f, "shut-down"),
        }
    }
}

impl PluginState {
    /// Check if the plugin can accept requests
    pub fn can_process(&self) -> bool {
        matches!(self, PluginState::Active)
    }

    /// Check if `init` may run from this state
    pub fn can_init(&self) -> bool {
        matches!(self, PluginState::Uninitialized)
    }
}

/// Plugin health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluginHealth {
    /// Plugin is functioning normally
    Healthy,

    /// Plugin is not functioning correctly
    Unhealthy,

    /// Plugin health is unknown (not active)
    #[default]
    Unknown,
}

impl std::fmt::Display for PluginHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginHealth::Healthy => write!(f, "healthy"),
            PluginHealth::Unhealthy => write!(f, "unhealthy"),
            PluginHealth::Unknown => write!(f, "unknown"),
        }
    }
}

/// Environment variable lookup handed to plugins.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Context provided to plugins during lifecycle operations
#[derive(Clone)]
pub struct PluginContext {
    /// Host registry the plugin registers its capabilities with
    pub registry: Arc<PluginRegistry>,

    /// Plugin-specific configuration (host JSON)
    pub config: serde_json::Value,

    /// Plugin ID
    pub plugin_id: String,

    /// Environment lookup used for credential fallback
    pub env: EnvLookup,
}

impl PluginContext {
    /// Create a new plugin context reading the process environment
    pub fn new(
        registry: Arc<PluginRegistry>,
        plugin_id: impl Into<String>,
        config: serde_json::Value,
    ) -> Self {
        Self {
            registry,
            plugin_id: plugin_id.into(),
            config,
            env: Arc::new(|name| std::env::var(name).ok()),
        }
    }

    /// Create a context with default (empty) plugin config
    pub fn with_default_config(registry: Arc<PluginRegistry>, plugin_id: impl Into<String>) -> Self {
        Self::new(registry, plugin_id, serde_json::Value::Null)
    }

    /// Replace the environment lookup
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(env);
        self
    }
}

/// Plugin lifecycle trait
///
/// `init` and `shutdown` never fail towards the host: a plugin that cannot
/// start logs the reason, stays unregistered and reports `Failed`.
#[async_trait]
pub trait PluginLifecycle: Send + Sync {
    /// Returns the plugin manifest
    fn manifest(&self) -> &PluginManifest;

    /// Current lifecycle state
    fn state(&self) -> PluginState;

    /// Parse and validate configuration, then register capabilities.
    fn init(&mut self, ctx: &PluginContext) -> PluginState;

    /// Unregister capabilities and release resources. Idempotent.
    fn shutdown(&mut self);

    /// Health check
    async fn health(&self) -> PluginHealth {
        PluginHealth::Unknown
    }

    /// Get configuration schema (JSON Schema)
    fn config_schema(&self) -> Option<serde_json::Value> {
        None
    }
}

/// Bookkeeping for a plugin's lifecycle
#[derive(Debug)]
pub struct PluginEntry {
    /// Current plugin state
    pub state: PluginState,

    /// Time when the plugin entry was created
    pub loaded_at: Instant,

    /// Last error message (if any)
    pub last_error: Option<String>,
}

impl PluginEntry {
    /// Create a new plugin entry
    pub fn new() -> Self {
        Self {
            state: PluginState::Uninitialized,
            loaded_at: Instant::now(),
            last_error: None,
        }
    }

    /// Record an error
    pub fn record_error(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    /// Transition to a new state
    pub fn transition(&mut self, new_state: PluginState) {
        tracing::debug!(
            from = %self.state,
            to = %new_state,
            "Plugin state transition"
        );
        self.state = new_state;
    }

    /// Get uptime since loading
    pub fn uptime(&self) -> std::time::Duration {
        self.loaded_at.elapsed()
    }
}

impl Default for PluginEntry {
    fn default() -> Self {
        Self::new()
    }
}
