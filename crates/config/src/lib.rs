//! Configuration management for the sales assistant
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (SALES_ASSISTANT_ prefix, `__` separator)
//!
//! The lead table is configured separately: `assistant.leads_path` points at
//! a YAML file, otherwise the table shipped in `config/leads.yaml` is used.

pub mod leads;
pub mod settings;

pub use leads::{load_store, LeadsConfig};
pub use settings::{
    load_settings, AssistantConfig, EntityStrategy, ExamplesConfig, ObservabilityConfig,
    ReplyFormat, RuntimeEnvironment, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Invalid lead table: {0}")]
    InvalidLeads(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<sales_assistant_core::Error> for ConfigError {
    fn from(err: sales_assistant_core::Error) -> Self {
        ConfigError::InvalidLeads(err.to_string())
    }
}
