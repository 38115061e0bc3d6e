//! Startup validation
//!
//! Commands that talk to the collaborators call
//! [`DelveConfig::validate_for_research`] before any work begins. Queue-only
//! commands only need [`DelveConfig::vault_path`].

use crate::config::{ConfigError, DelveConfig};
use std::path::Path;

/// API key value shipped in the example `.env`
pub const API_KEY_PLACEHOLDER: &str = "your_openai_api_key_here";
/// Vault path value shipped in the example `.env` and config
pub const VAULT_PATH_PLACEHOLDER: &str = "/path/to/your/obsidian/vault";

impl DelveConfig {
    /// Configured vault directory, rejecting unset and placeholder values
    pub fn vault_path(&self) -> Result<&Path, ConfigError> {
        let path = self
            .vault
            .path
            .as_deref()
            .ok_or(ConfigError::MissingVaultPath)?;
        if path == Path::new(VAULT_PATH_PLACEHOLDER) {
            return Err(ConfigError::Placeholder { key: "PATH_TO_SAVE" });
        }
        Ok(path)
    }

    /// Configured API key, rejecting unset and placeholder values
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        let key = self
            .llm
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)?;
        if key == API_KEY_PLACEHOLDER {
            return Err(ConfigError::Placeholder { key: "OPENAI_API_KEY" });
        }
        Ok(key)
    }

    /// Everything `research` and `pop` need before the first request
    pub fn validate_for_research(&self) -> Result<(), ConfigError> {
        self.api_key()?;
        self.vault_path()?;
        if !self.vault.template.is_file() {
            return Err(ConfigError::MissingTemplate(self.vault.template.clone()));
        }
        Ok(())
    }
}
