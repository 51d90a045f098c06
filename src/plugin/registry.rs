//! Plugin Registry
//!
//! Host-side registry of live capabilities. A plugin registers its
//! capability object during `init` and removes it again on `shutdown`.
//!
//! # Architecture
//!
//! The registry uses DashMap for concurrent O(1) amortized provider lookup.
//! Aliases from the provider metadata resolve to the same capability.
//!
//! # Usage
//!
//! ```ignore
//! use waav_openai_tts::plugin::PluginRegistry;
//!
//! let registry = Arc::new(PluginRegistry::new());
//! let tts = registry.get_tts("openai").expect("registered");
//! let result = tts.synthesize("Hello", &SynthesisOptions::default()).await?;
//! ```

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use super::capabilities::TTSCapability;
use super::error::PluginError;
use super::metadata::ProviderMetadata;

#[derive(Clone)]
struct TTSEntry {
    capability: Arc<dyn TTSCapability>,
    metadata: ProviderMetadata,
    /// Id passed to `register_tts`; alias keys point back to it
    provider_id: String,
}

/// Central capability registry
pub struct PluginRegistry {
    /// TTS capabilities indexed by provider ID (aliases included)
    tts_providers: DashMap<String, TTSEntry>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tts_providers: DashMap::new(),
        }
    }

    /// Register a TTS capability under `provider_id` and its metadata aliases.
    ///
    /// Fails if the id or any alias is already taken, in which case nothing
    /// stays registered. Each key is claimed atomically, so of two concurrent
    /// registrations for the same id exactly one succeeds.
    pub fn register_tts(
        &self,
        provider_id: &str,
        capability: Arc<dyn TTSCapability>,
    ) -> Result<(), PluginError> {
        let metadata = capability.metadata();
        let id = provider_id.to_lowercase();

        let mut aliases: Vec<String> = metadata
            .aliases
            .iter()
            .map(|a| a.to_lowercase())
            .filter(|a| *a != id)
            .collect();
        aliases.sort();
        aliases.dedup();

        let entry = TTSEntry {
            capability,
            metadata,
            provider_id: id.clone(),
        };

        self.claim(&id, &entry)?;
        for (claimed, alias) in aliases.iter().enumerate() {
            if let Err(e) = self.claim(alias, &entry) {
                self.release(&id, std::iter::once(&id).chain(&aliases[..claimed]));
                return Err(e);
            }
        }

        tracing::debug!(
            provider_id = %provider_id,
            aliases = ?aliases,
            "Registered TTS provider"
        );

        Ok(())
    }

    /// Remove a TTS capability together with its primary id and every alias.
    /// `provider` may be either. Returns the capability if it was registered.
    pub fn unregister_tts(&self, provider: &str) -> Option<Arc<dyn TTSCapability>> {
        let entry = self
            .tts_providers
            .get(&provider.to_lowercase())
            .map(|e| e.value().clone())?;

        let keys = std::iter::once(entry.provider_id.clone())
            .chain(entry.metadata.aliases.iter().map(|a| a.to_lowercase()))
            .collect::<Vec<_>>();
        if !self.release(&entry.provider_id, keys.iter()) {
            // lost a race with another unregister
            return None;
        }

        tracing::debug!(
            provider = %provider,
            provider_id = %entry.provider_id,
            "Unregistered TTS provider"
        );

        Some(entry.capability)
    }

    /// Look up a TTS capability by id or alias (case-insensitive)
    pub fn get_tts(&self, provider: &str) -> Option<Arc<dyn TTSCapability>> {
        self.tts_providers
            .get(&provider.to_lowercase())
            .map(|entry| entry.capability.clone())
    }

    /// Look up a TTS capability, failing with `PluginError::NotFound`
    pub fn require_tts(&self, provider: &str) -> Result<Arc<dyn TTSCapability>, PluginError> {
        self.get_tts(provider).ok_or_else(|| {
            PluginError::NotFound(format!(
                "TTS provider '{}'. Available providers: {:?}",
                provider,
                self.tts_provider_names()
            ))
        })
    }

    /// Whether a TTS capability is registered under `provider`
    pub fn is_registered(&self, provider: &str) -> bool {
        self.tts_providers.contains_key(&provider.to_lowercase())
    }

    /// Primary names of all registered TTS providers, sorted
    pub fn tts_provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tts_providers
            .iter()
            .map(|entry| entry.metadata.name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Metadata of all registered TTS providers, one entry per provider
    pub fn tts_providers(&self) -> Vec<ProviderMetadata> {
        let mut seen = std::collections::HashSet::new();
        self.tts_providers
            .iter()
            .filter(|entry| seen.insert(entry.provider_id.clone()))
            .map(|entry| entry.metadata.clone())
            .collect()
    }

    /// Number of registered keys, aliases included
    pub fn len(&self) -> usize {
        self.tts_providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tts_providers.is_empty()
    }

    fn claim(&self, key: &str, entry: &TTSEntry) -> Result<(), PluginError> {
        match self.tts_providers.entry(key.to_string()) {
            Entry::Occupied(_) => Err(PluginError::AlreadyRegistered(key.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(entry.clone());
                Ok(())
            }
        }
    }

    /// Remove every key in `keys` still owned by `provider_id`. Returns
    /// whether anything was removed.
    fn release<'a>(&self, provider_id: &str, keys: impl Iterator<Item = &'a String>) -> bool {
        let mut removed = false;
        for key in keys {
            removed |= self
                .tts_providers
                .remove_if(key, |_, entry| entry.provider_id == provider_id)
                .is_some();
        }
        removed
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
