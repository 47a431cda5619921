//! Configuration management for the inciq CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables (`INCIQ_*`)
//! - Command-line flags
//! - An optional YAML config file (`inciq.yaml`)
//!
//! Credentials are never stored in code or config files: the API key is
//! resolved from the environment at process start.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default chat-completions endpoint (OpenAI-compatible).
pub const DEFAULT_API_BASE: &str = "https://api.x.ai/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "grok-3-mini";

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible API (chat + embeddings)
    pub api_base: String,

    /// Chat model identifier
    pub model: String,

    /// API key, resolved from the environment (never hardcoded)
    pub api_key: Option<String>,

    /// Embedding provider ("hashed" for local deterministic vectors,
    /// "remote" for the hosted embeddings endpoint)
    pub embed_provider: String,

    /// Embedding model identifier (remote provider only)
    pub embed_model: String,

    /// Embedding vector dimension
    pub embed_dimensions: usize,

    /// Number of documents to retrieve per query
    pub top_k: usize,

    /// Character budget for the assembled context block
    pub max_context_chars: usize,

    /// Sampling temperature for generation
    pub temperature: f32,

    /// Maximum tokens to generate per answer
    pub max_tokens: u32,

    /// Request timeout in seconds for network calls
    pub timeout_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    api: Option<ApiConfig>,
    embedding: Option<EmbeddingFileConfig>,
    retrieval: Option<RetrievalConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiConfig {
    base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    max_tokens: Option<u32>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EmbeddingFileConfig {
    provider: Option<String>,
    model: Option<String>,
    dimensions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalConfig {
    #[serde(rename = "topK")]
    top_k: Option<usize>,
    #[serde(rename = "maxContextChars")]
    max_context_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            embed_provider: "hashed".to_string(), // Works offline by default
            embed_model: "text-embedding-3-small".to_string(),
            embed_dimensions: 384,
            top_k: 6,
            max_context_chars: 12_000,
            temperature: 0.3,
            max_tokens: 4096,
            timeout_secs: 90,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `INCIQ_CONFIG`: Path to config file
    /// - `INCIQ_API_BASE`: API base URL
    /// - `INCIQ_MODEL`: Chat model identifier
    /// - `INCIQ_API_KEY`: API key (bearer credential)
    /// - `INCIQ_EMBED_PROVIDER`: Embedding provider ("hashed" or "remote")
    /// - `INCIQ_EMBED_MODEL`: Embedding model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("INCIQ_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            PathBuf::from("inciq.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(api_base) = std::env::var("INCIQ_API_BASE") {
            config.api_base = api_base;
        }

        if let Ok(model) = std::env::var("INCIQ_MODEL") {
            config.model = model;
        }

        if let Ok(provider) = std::env::var("INCIQ_EMBED_PROVIDER") {
            config.embed_provider = provider;
        }

        if let Ok(embed_model) = std::env::var("INCIQ_EMBED_MODEL") {
            config.embed_model = embed_model;
        }

        config.api_key = std::env::var("INCIQ_API_KEY").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(api) = config_file.api {
            if let Some(base) = api.base {
                result.api_base = base;
            }
            if let Some(model) = api.model {
                result.model = model;
            }
            if let Some(temperature) = api.temperature {
                result.temperature = temperature;
            }
            if let Some(max_tokens) = api.max_tokens {
                result.max_tokens = max_tokens;
            }
            if let Some(timeout_secs) = api.timeout_secs {
                result.timeout_secs = timeout_secs;
            }
        }

        if let Some(embedding) = config_file.embedding {
            if let Some(provider) = embedding.provider {
                result.embed_provider = provider;
            }
            if let Some(model) = embedding.model {
                result.embed_model = model;
            }
            if let Some(dimensions) = embedding.dimensions {
                result.embed_dimensions = dimensions;
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            if let Some(top_k) = retrieval.top_k {
                result.top_k = top_k;
            }
            if let Some(max_context_chars) = retrieval.max_context_chars {
                result.max_context_chars = max_context_chars;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        api_base: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(api_base) = api_base {
            self.api_base = api_base;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration before running a command.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["hashed", "remote"];
        if !known_providers.contains(&self.embed_provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embed_provider,
                known_providers.join(", ")
            )));
        }

        if self.top_k == 0 {
            return Err(AppError::Config(
                "top_k must be at least 1".to_string(),
            ));
        }

        if self.embed_dimensions == 0 {
            return Err(AppError::Config(
                "embedding dimensions must be positive".to_string(),
            ));
        }

        if self.embed_provider == "remote" && self.api_key.is_none() {
            return Err(AppError::Config(
                "Remote embedding provider requires INCIQ_API_KEY".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.embed_provider, "hashed");
        assert_eq!(config.top_k, 6);
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            Some("http://localhost:8080/v1".to_string()),
            Some("grok-3".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.api_base, "http://localhost:8080/v1");
        assert_eq!(overridden.model, "grok-3");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("inciq.yaml");
        std::fs::write(
            &path,
            r#"
api:
  model: grok-3
  temperature: 0.1
retrieval:
  topK: 8
logging:
  level: warn
"#,
        )
        .unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();

        assert_eq!(merged.model, "grok-3");
        assert_eq!(merged.temperature, 0.1);
        assert_eq!(merged.top_k, 8);
        assert_eq!(merged.log_level, Some("warn".to_string()));
        // Untouched fields keep defaults
        assert_eq!(merged.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_validate_unknown_embed_provider() {
        let mut config = AppConfig::default();
        config.embed_provider = "quantum".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_k() {
        let mut config = AppConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_remote_requires_key() {
        let mut config = AppConfig::default();
        config.embed_provider = "remote".to_string();
        config.api_key = None;
        assert!(config.validate().is_err());

        config.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }
}
