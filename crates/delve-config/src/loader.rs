//! Config file discovery, environment overlay and CLI overrides

use crate::config::{ConfigError, DelveConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming the vault directory
pub const ENV_VAULT_PATH: &str = "PATH_TO_SAVE";
/// Environment variable carrying the API key
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the API endpoint
pub const ENV_ENDPOINT: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the queue file
pub const ENV_QUEUE_FILE: &str = "DELVE_QUEUE_FILE";
/// Environment variable overriding the template file
pub const ENV_TEMPLATE: &str = "DELVE_TEMPLATE";
/// Environment variable overriding the research model
pub const ENV_RESEARCH_MODEL: &str = "DELVE_RESEARCH_MODEL";
/// Environment variable overriding the classification model
pub const ENV_CLASSIFY_MODEL: &str = "DELVE_CLASSIFY_MODEL";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT: &str = "DELVE_TIMEOUT";
/// When set, the user-level config file is never read
pub const ENV_TEST_MODE: &str = "DELVE_TEST_MODE";

/// Command-line overrides (highest priority)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--vault`
    pub vault_path: Option<PathBuf>,
    /// `--queue`
    pub queue_path: Option<PathBuf>,
}

impl DelveConfig {
    /// Load configuration with precedence: defaults < file < env < args
    pub fn load(
        config_file: Option<PathBuf>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::from_file_or_default(config_file)?;
        config.apply_env();
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Overlay values from the process environment
    pub fn apply_env(&mut self) {
        if let Some(path) = env_var(ENV_VAULT_PATH) {
            self.vault.path = Some(PathBuf::from(path));
        }
        if let Some(key) = env_var(ENV_API_KEY) {
            self.llm.api_key = Some(key);
        }
        if let Some(endpoint) = env_var(ENV_ENDPOINT) {
            self.llm.endpoint = endpoint;
        }
        if let Some(queue) = env_var(ENV_QUEUE_FILE) {
            self.queue.path = PathBuf::from(queue);
        }
        if let Some(template) = env_var(ENV_TEMPLATE) {
            self.vault.template = PathBuf::from(template);
        }
        if let Some(model) = env_var(ENV_RESEARCH_MODEL) {
            self.llm.research_model = model;
        }
        if let Some(model) = env_var(ENV_CLASSIFY_MODEL) {
            self.llm.classification_model = model;
        }
        if let Some(timeout) = env_var(ENV_TIMEOUT) {
            match timeout.parse() {
                Ok(secs) => self.llm.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT, timeout),
            }
        }
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides.vault_path {
            self.vault.path = Some(path);
        }
        if let Some(path) = overrides.queue_path {
            self.queue.path = path;
        }
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default config file location (`<config_dir>/delve/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("delve").join("config.toml"))
    }

    /// Load config from file or return default
    fn from_file_or_default(config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) => Some(path),
            None if std::env::var_os(ENV_TEST_MODE).is_some() => None,
            None => Self::default_config_path(),
        };

        match path.filter(|p| p.exists()) {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Render the effective configuration as TOML with the API key redacted
    pub fn display_as_toml(&self) -> Result<String, ConfigError> {
        let mut redacted = self.clone();
        if redacted.llm.api_key.is_some() {
            redacted.llm.api_key = Some("<redacted>".to_string());
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }

    /// Write a commented example config file
    pub fn create_example(path: &Path) -> Result<(), ConfigError> {
        let example = r#"# delve configuration
# Location: ~/.config/delve/config.toml

[vault]
# Directory notes are written to (also: PATH_TO_SAVE)
path = "/path/to/your/obsidian/vault"

# Note template; a file with this name in the vault is never treated as a note
template = "Simple_Note_Template.md"

[queue]
# One topic per line (also: DELVE_QUEUE_FILE)
path = "queue.txt"

[llm]
# OpenAI-compatible endpoint (also: OPENAI_BASE_URL)
endpoint = "https://api.openai.com/v1"

# API key (prefer the OPENAI_API_KEY environment variable)
# api_key = "sk-..."

# Model used for research (Responses API with web search)
research_model = "o4-mini-deep-research"

# Model used to pick concepts and related notes
classification_model = "gpt-4o-mini"
temperature = 0.1
concept_max_tokens = 300
link_max_tokens = 200

# Request timeout in seconds
timeout_secs = 600
"#;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, example)?;
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        for key in [
            ENV_VAULT_PATH,
            ENV_API_KEY,
            ENV_ENDPOINT,
            ENV_QUEUE_FILE,
            ENV_TEMPLATE,
            ENV_RESEARCH_MODEL,
            ENV_CLASSIFY_MODEL,
            ENV_TIMEOUT,
        ] {
            std::env::remove_var(key);
        }
        std::env::set_var(ENV_TEST_MODE, "1");
    }

    #[test]
    #[serial]
    fn test_load_from_nonexistent_file_falls_back_to_defaults() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let config =
            DelveConfig::load(Some(temp.path().join("missing.toml")), ConfigOverrides::default())
                .unwrap();
        assert_eq!(config, DelveConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_invalid_toml_is_error() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        let err = DelveConfig::load(Some(path), ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    #[serial]
    fn test_precedence_file_env_args() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[vault]
path = "/from/file"

[queue]
path = "file-queue.txt"

[llm]
research_model = "file-model"
"#,
        )
        .unwrap();

        std::env::set_var(ENV_VAULT_PATH, "/from/env");
        std::env::set_var(ENV_RESEARCH_MODEL, "env-model");

        let config = DelveConfig::load(
            Some(path),
            ConfigOverrides {
                vault_path: Some(PathBuf::from("/from/args")),
                queue_path: None,
            },
        )
        .unwrap();

        assert_eq!(config.vault.path, Some(PathBuf::from("/from/args")));
        assert_eq!(config.queue.path, PathBuf::from("file-queue.txt"));
        assert_eq!(config.llm.research_model, "env-model");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_env_is_ignored() {
        clear_env();
        std::env::set_var(ENV_TIMEOUT, "soon");
        let config = DelveConfig::load(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config.llm.timeout_secs, 600);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_env_values_are_ignored() {
        clear_env();
        std::env::set_var(ENV_API_KEY, "   ");
        let config = DelveConfig::load(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config.llm.api_key, None);
        clear_env();
    }

    #[test]
    fn test_display_redacts_api_key() {
        let mut config = DelveConfig::default();
        config.llm.api_key = Some("sk-secret".to_string());
        let rendered = config.display_as_toml().unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_example_config_parses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");
        DelveConfig::create_example(&path).unwrap();

        let config = DelveConfig::from_file(&path).unwrap();
        assert_eq!(
            config.vault.path,
            Some(PathBuf::from("/path/to/your/obsidian/vault"))
        );
        assert_eq!(config.llm.link_max_tokens, 200);
    }
}
