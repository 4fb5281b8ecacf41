//! Configuration management for the scholarship recommendation backend
//!
//! Supports loading configuration from:
//! - TOML files
//! - Environment variables (SCHOLARBOT_ prefix)
//! - Built-in defaults

pub mod settings;

pub use settings::{load_settings, DatasetConfig, LlmSettings, ServerConfig, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for scholarbot_core::Error {
    fn from(err: ConfigError) -> Self {
        scholarbot_core::Error::Config(err.to_string())
    }
}
