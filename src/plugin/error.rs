use crate::core::tts::TTSError;

/// Plugin-specific error type
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin initialization failed
    #[error("Plugin initialization failed: {0}")]
    InitializationFailed(#[from] TTSError),

    /// A capability is already registered under this id
    #[error("Provider already registered: {0}")]
    AlreadyRegistered(String),

    /// Plugin not found
    #[error("Plugin not found: {0}")]
    NotFound(String),
}

impl PluginError {
    /// Whether the operator has to fix the plugin configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InitializationFailed(e) if e.is_config_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_classification() {
        let err = PluginError::from(TTSError::MissingCredential {
            env_var: "OPENAI_API_KEY",
        });
        assert!(err.is_config_error());
        assert!(err.to_string().contains("required"));

        let err = PluginError::from(TTSError::NetworkError("timed out".to_string()));
        assert!(!err.is_config_error());

        assert!(!PluginError::AlreadyRegistered("openai".to_string()).is_config_error());
    }
}
