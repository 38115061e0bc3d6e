//! Configuration types and defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
///
/// All of these are fatal at startup: the binary exits before touching the
/// vault or the queue.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`DelveConfig`]
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Offending file
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// Config could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Generic I/O error (writing example configs)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No vault directory configured
    #[error("PATH_TO_SAVE not set (configure [vault].path or the PATH_TO_SAVE environment variable)")]
    MissingVaultPath,

    /// No API key configured
    #[error("OPENAI_API_KEY not set (configure [llm].api_key or the OPENAI_API_KEY environment variable)")]
    MissingApiKey,

    /// A setting still carries the value from the example config
    #[error("{key} is still set to its placeholder value")]
    Placeholder {
        /// Name of the setting
        key: &'static str,
    },

    /// Note template file is missing
    #[error("Note template not found: {0}")]
    MissingTemplate(PathBuf),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DelveConfig {
    /// Note storage
    #[serde(default)]
    pub vault: VaultConfig,

    /// Work queue
    #[serde(default)]
    pub queue: QueueConfig,

    /// Research and classification collaborators
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Vault (note storage) configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaultConfig {
    /// Directory notes are written to. Required for any command that
    /// touches notes.
    pub path: Option<PathBuf>,

    /// Note template file. Must exist before research runs; a file with the
    /// same name inside the vault is never treated as a note.
    #[serde(default = "default_template")]
    pub template: PathBuf,
}

/// Queue configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueueConfig {
    /// Plain-text queue file, one identifier per line
    #[serde(default = "default_queue_path")]
    pub path: PathBuf,
}

/// LLM collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key (usually supplied through `OPENAI_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for the research call
    #[serde(default = "default_research_model")]
    pub research_model: String,

    /// Model used for concept and existing-link classification
    #[serde(default = "default_classification_model")]
    pub classification_model: String,

    /// Sampling temperature for classification calls
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Token cap for the concept discovery call
    #[serde(default = "default_concept_max_tokens")]
    pub concept_max_tokens: u32,

    /// Token cap for the existing-link discovery call
    #[serde(default = "default_link_max_tokens")]
    pub link_max_tokens: u32,

    /// Per-request timeout in seconds. Deep research runs are slow.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: None,
            template: default_template(),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            path: default_queue_path(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            research_model: default_research_model(),
            classification_model: default_classification_model(),
            temperature: default_temperature(),
            concept_max_tokens: default_concept_max_tokens(),
            link_max_tokens: default_link_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl VaultConfig {
    /// File name of the template, used to exclude it from the note listing
    pub fn template_name(&self) -> Option<&str> {
        self.template.file_name().and_then(|n| n.to_str())
    }
}

impl DelveConfig {
    /// Queue file path
    pub fn queue_path(&self) -> &Path {
        &self.queue.path
    }
}

fn default_template() -> PathBuf {
    PathBuf::from("Simple_Note_Template.md")
}

fn default_queue_path() -> PathBuf {
    PathBuf::from("queue.txt")
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_research_model() -> String {
    "o4-mini-deep-research".to_string()
}

fn default_classification_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.1
}

fn default_concept_max_tokens() -> u32 {
    300
}

fn default_link_max_tokens() -> u32 {
    200
}

fn default_timeout_secs() -> u64 {
    600
}
