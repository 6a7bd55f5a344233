//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use parking_lot::RwLock;

use sales_assistant_agent::{AssistantOptions, SalesAssistant};
use sales_assistant_config::{load_settings, Settings};
use sales_assistant_core::LeadStore;

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Settings, replaced on admin reload
    pub config: Arc<RwLock<Settings>>,
    /// Lead table, fixed for the life of the process
    pub store: Arc<LeadStore>,
    assistant: Arc<RwLock<Arc<SalesAssistant>>>,
    /// Environment name for config reload
    env: Option<String>,
}

impl AppState {
    pub fn new(config: Settings, store: Arc<LeadStore>) -> Self {
        Self::with_env(config, store, None)
    }

    /// State that reloads `config/{env}.yaml` on admin reload
    pub fn with_env(config: Settings, store: Arc<LeadStore>, env: Option<String>) -> Self {
        let assistant = build_assistant(&config, &store);
        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            assistant: Arc::new(RwLock::new(assistant)),
            env,
        }
    }

    /// Current assistant
    pub fn assistant(&self) -> Arc<SalesAssistant> {
        Arc::clone(&self.assistant.read())
    }

    /// Reload settings from disk and rebuild the assistant
    ///
    /// Reply format, entity strategy and examples take effect immediately.
    /// The lead table is not reloaded.
    pub fn reload_config(&self) -> Result<(), ServerError> {
        let new_config = load_settings(self.env.as_deref())?;
        let assistant = build_assistant(&new_config, &self.store);

        *self.assistant.write() = assistant;
        *self.config.write() = new_config;

        tracing::info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }
}

fn build_assistant(config: &Settings, store: &Arc<LeadStore>) -> Arc<SalesAssistant> {
    let options = AssistantOptions::from_config(&config.assistant);
    Arc::new(SalesAssistant::new(Arc::clone(store), options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_assistant_config::LeadsConfig;

    #[test]
    fn test_assistant_follows_settings() {
        let store = Arc::new(LeadsConfig::bundled().unwrap().into_store().unwrap());
        let mut settings = Settings::default();
        settings.assistant.reply_format = sales_assistant_config::ReplyFormat::Plain;

        let state = AppState::new(settings, store);
        let reply = state.assistant().respond("status of Alpha Corp");
        assert_eq!(reply.text, "The status for Alpha Corp is: Prospecting");
        assert_eq!(state.store.len(), 8);
    }
}
