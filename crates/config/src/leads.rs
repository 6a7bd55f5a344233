//! Lead table configuration
//!
//! Loads the lead records from YAML and turns them into the immutable
//! `LeadStore` the pipeline is built on.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use sales_assistant_core::{LeadRecord, LeadStore};

use crate::{AssistantConfig, ConfigError};

/// Table shipped with the service
const BUNDLED_LEADS: &str = include_str!("../../../config/leads.yaml");

/// Date format of `last_contact`
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formatted currency amount: "$50,000" or "$1,250.50"
static CURRENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$\d{1,3}(,\d{3})*(\.\d{2})?$").expect("valid currency pattern"));

/// Lead records as written in leads.yaml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadsConfig {
    #[serde(default)]
    pub leads: Vec<LeadRecord>,
}

impl LeadsConfig {
    /// Load from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// The table bundled with the service
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_yaml(BUNDLED_LEADS)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Check value and date formats of every record
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.leads.is_empty() {
            return Err(ConfigError::InvalidLeads("no leads defined".to_string()));
        }

        for lead in &self.leads {
            if !CURRENCY.is_match(lead.value.trim()) {
                return Err(ConfigError::InvalidLeads(format!(
                    "{}: deal value '{}' is not a formatted currency amount",
                    lead.key, lead.value
                )));
            }
            if NaiveDate::parse_from_str(lead.last_contact.trim(), DATE_FORMAT).is_err() {
                return Err(ConfigError::InvalidLeads(format!(
                    "{}: last contact '{}' is not a {} date",
                    lead.key, lead.last_contact, DATE_FORMAT
                )));
            }
        }

        Ok(())
    }

    /// Validate and build the store
    pub fn into_store(self) -> Result<LeadStore, ConfigError> {
        self.validate()?;
        Ok(LeadStore::new(self.leads)?)
    }
}

/// Build the lead store for the configured assistant
pub fn load_store(config: &AssistantConfig) -> Result<LeadStore, ConfigError> {
    let leads = match &config.leads_path {
        Some(path) => {
            tracing::info!(path = %path, "Loading lead table");
            LeadsConfig::load(path)?
        }
        None => {
            tracing::info!("Using bundled lead table");
            LeadsConfig::bundled()?
        }
    };
    leads.into_store()
}
