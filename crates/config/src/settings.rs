//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversation pipeline configuration
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory holding the chat page (`index.html`)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
            static_dir: default_static_dir(),
        }
    }
}

/// Markup convention for replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReplyFormat {
    /// Inline HTML (`<b>`, `<i>`, `<br>`) for the web chat page
    #[default]
    Html,
    /// No markup, newline separated
    Plain,
}

/// How a message is mapped to a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntityStrategy {
    /// Substring match of display names, longest name first
    #[default]
    Substring,
    /// Capitalized word runs mapped to keys, substring match as fallback
    ProperNoun,
}

/// Conversation pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssistantConfig {
    /// YAML lead table; the bundled table is used when unset
    #[serde(default)]
    pub leads_path: Option<String>,

    #[serde(default)]
    pub reply_format: ReplyFormat,

    #[serde(default)]
    pub entity_strategy: EntityStrategy,

    #[serde(default)]
    pub examples: ExamplesConfig,
}

/// Generated example questions appended to greeting/fallback replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Number of lead-specific examples (one summary example is added)
    #[serde(default = "default_example_count")]
    pub count: usize,
}

fn default_example_count() -> usize {
    3
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: default_example_count(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,

    /// Expose Prometheus metrics at /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Bounds for `assistant.examples.count`
const MAX_EXAMPLE_COUNT: usize = 10;

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_assistant()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if self.environment.is_production() && !self.server.cors_enabled {
            return Err(ConfigError::InvalidValue {
                field: "server.cors_enabled".to_string(),
                message: "CORS must be enabled in production".to_string(),
            });
        }

        Ok(())
    }

    fn validate_assistant(&self) -> Result<(), ConfigError> {
        let count = self.assistant.examples.count;
        if !(1..=MAX_EXAMPLE_COUNT).contains(&count) {
            return Err(ConfigError::InvalidValue {
                field: "assistant.examples.count".to_string(),
                message: format!("Must be between 1 and {}, got {}", MAX_EXAMPLE_COUNT, count),
            });
        }

        if let Some(path) = &self.assistant.leads_path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "assistant.leads_path".to_string(),
                    message: "Path is empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("SALES_ASSISTANT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.assistant.reply_format, ReplyFormat::Html);
        assert_eq!(settings.assistant.entity_strategy, EntityStrategy::Substring);
        assert!(settings.assistant.examples.enabled);
        assert_eq!(settings.assistant.examples.count, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_server_validation() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate_server().is_err());
        settings.server.port = 8080;
        assert!(settings.validate_server().is_ok());

        settings.environment = RuntimeEnvironment::Production;
        settings.server.cors_enabled = false;
        assert!(settings.validate_server().is_err());
    }

    #[test]
    fn test_example_count_bounds() {
        let mut settings = Settings::default();
        settings.assistant.examples.count = 0;
        assert!(settings.validate_assistant().is_err());
        settings.assistant.examples.count = 11;
        assert!(settings.validate_assistant().is_err());
        settings.assistant.examples.count = 10;
        assert!(settings.validate_assistant().is_ok());
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let yaml = r#"
server:
  port: 5000
assistant:
  reply_format: plain
  entity_strategy: proper_noun
  examples:
    enabled: false
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.assistant.reply_format, ReplyFormat::Plain);
        assert_eq!(settings.assistant.entity_strategy, EntityStrategy::ProperNoun);
        assert!(!settings.assistant.examples.enabled);
        assert_eq!(settings.assistant.examples.count, 3);
    }
}
