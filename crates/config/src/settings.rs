//! Application settings
//!
//! Defaults, overridable by an optional TOML file and `SCHOLARBOT_`
//! environment variables (e.g. `SCHOLARBOT_SERVER__PORT=8080`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub llm: LlmSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Scholarship dataset location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scholarship_dataset_combined.csv"),
        }
    }
}

/// Generative model settings
///
/// The API key itself is never part of the settings file; it is read from
/// the environment variable named by `api_key_env` at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub endpoint: String,
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gemini-pro".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

impl LlmSettings {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key from the environment.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env).map_err(|_| {
            ConfigError::Environment(format!(
                "{} not found in environment variables",
                self.api_key_env
            ))
        })
    }
}

/// Load settings: defaults, then an optional TOML file, then environment
/// overrides with the `SCHOLARBOT_` prefix.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder =
        config::Config::builder().add_source(config::Config::try_from(&Settings::default())?);

    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            builder = builder.add_source(config::File::from(path));
        }
        None => {
            builder = builder.add_source(config::File::with_name("scholarbot").required(false));
        }
    }

    let settings = builder
        .add_source(config::Environment::with_prefix("SCHOLARBOT").separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
