//! Sales Assistant
//!
//! Facade over the rule-based pipeline: validate input, classify intent,
//! resolve the lead and the field, compose the reply. `respond` never
//! fails; every error and any panic inside the pipeline becomes a reply.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use sales_assistant_config::{AssistantConfig, EntityStrategy, ExamplesConfig, ReplyFormat};
use sales_assistant_core::{tokens, Intent, LeadField, LeadStore};
use sales_assistant_text_processing::{
    EntityResolver, FieldResolver, IntentClassifier, ProperNounResolver, SubstringResolver,
    Utterance,
};

use crate::examples::generate_examples;
use crate::response::ResponseComposer;
use crate::AssistantError;

/// Assistant configuration
#[derive(Debug, Clone, Default)]
pub struct AssistantOptions {
    pub reply_format: ReplyFormat,
    pub entity_strategy: EntityStrategy,
    pub examples: ExamplesConfig,
}

impl AssistantOptions {
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            reply_format: config.reply_format,
            entity_strategy: config.entity_strategy,
            examples: config.examples.clone(),
        }
    }

    /// Plain text replies without generated examples
    pub fn plain() -> Self {
        Self {
            reply_format: ReplyFormat::Plain,
            examples: ExamplesConfig {
                enabled: false,
                ..ExamplesConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Outcome of one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<LeadField>,
    /// Error kind when the reply explains a failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl Reply {
    fn new(text: String, intent: Intent) -> Self {
        Self {
            text,
            intent,
            lead_key: None,
            field: None,
            error: None,
        }
    }

    fn for_lead(mut self, key: &str, field: Option<LeadField>) -> Self {
        self.lead_key = Some(key.to_string());
        self.field = field;
        self
    }

    pub fn is_fault(&self) -> bool {
        self.error == Some("fault")
    }
}

/// Rule-based sales assistant over a fixed lead table
pub struct SalesAssistant {
    store: Arc<LeadStore>,
    options: AssistantOptions,
    classifier: IntentClassifier,
    entities: Box<dyn EntityResolver>,
    fields: FieldResolver,
    composer: ResponseComposer,
}

impl SalesAssistant {
    pub fn new(store: Arc<LeadStore>, options: AssistantOptions) -> Self {
        let entities = build_resolver(options.entity_strategy, &store);
        tracing::info!(
            leads = store.len(),
            resolver = entities.name(),
            format = ?options.reply_format,
            "Sales assistant ready"
        );

        Self {
            classifier: IntentClassifier::new(),
            fields: FieldResolver::new(),
            composer: ResponseComposer::new(options.reply_format),
            entities,
            store,
            options,
        }
    }

    pub fn store(&self) -> &Arc<LeadStore> {
        &self.store
    }

    pub fn options(&self) -> &AssistantOptions {
        &self.options
    }

    /// Reply to a message. Never fails.
    pub fn respond(&self, message: &str) -> Reply {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_respond(message)))
            .unwrap_or_else(|payload| Err(AssistantError::Fault(panic_message(payload.as_ref()))));

        match outcome {
            Ok(reply) => reply,
            Err(err) => {
                if let AssistantError::Fault(reason) = &err {
                    tracing::error!(error = %reason, input = message, "Error processing user input");
                }
                self.explain(&err)
            }
        }
    }

    /// The fallible pipeline
    pub fn try_respond(&self, message: &str) -> Result<Reply, AssistantError> {
        if message.trim().is_empty() {
            tracing::warn!("Empty or whitespace-only input received");
            return Err(AssistantError::InvalidInput);
        }

        tracing::info!(input = message, "Processing user input");
        let utterance = Utterance::new(message);
        let words = tokens(&utterance.normalized);
        let intent = self.classifier.classify(&utterance.normalized, &words);

        let reply = match intent {
            Intent::Greeting => Reply::new(self.composer.greeting(&self.examples()), intent),
            Intent::Farewell => Reply::new(self.composer.farewell(), intent),
            Intent::Unknown => Reply::new(self.composer.fallback(&self.examples()), intent),
            Intent::InfoRequest => {
                let Some(key) = self.entities.resolve(&utterance) else {
                    tracing::warn!(input = message, "Info request without a matching lead");
                    return Err(AssistantError::NoEntityMatch);
                };
                let record = self.store.get(&key).ok_or_else(|| {
                    AssistantError::Fault(format!("resolved key '{key}' is not in the store"))
                })?;

                match self.fields.resolve(&utterance.normalized, &words) {
                    Some(field) => Reply::new(self.composer.field(record, field), intent)
                        .for_lead(&key, Some(field)),
                    None => Reply::new(self.composer.summary(record), intent).for_lead(&key, None),
                }
            }
        };
        Ok(reply)
    }

    /// Full summary of a lead
    pub fn lead_summary(&self, key: &str) -> Result<String, AssistantError> {
        let record = self.store.require(key)?;
        Ok(self.composer.summary(record))
    }

    /// One field of a lead, by field identifier or label
    pub fn lead_field(&self, key: &str, field: &str) -> Result<String, AssistantError> {
        let record = self.store.require(key)?;
        let field = field
            .parse::<LeadField>()
            .map_err(|_| AssistantError::NoFieldMatch {
                lead: record.display_name.clone(),
                field: field.trim().to_string(),
            })?;
        Ok(self.composer.field(record, field))
    }

    /// Reply text for an error
    pub fn error_text(&self, err: &AssistantError) -> String {
        match err {
            AssistantError::InvalidInput => self.composer.invalid_input(),
            AssistantError::NoEntityMatch => self.composer.no_match(&self.examples()),
            AssistantError::NoFieldMatch { lead, field } => self.composer.no_field(lead, field),
            AssistantError::UnknownLead(_) => self.composer.no_match(&[]),
            AssistantError::Fault(_) => self.composer.fault(),
        }
    }

    /// Example questions for the current table
    pub fn example_questions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        generate_examples(&self.store, self.options.examples.count, rng)
    }

    fn examples(&self) -> Vec<String> {
        if !self.options.examples.enabled {
            return Vec::new();
        }
        self.example_questions(&mut rand::thread_rng())
    }

    fn explain(&self, err: &AssistantError) -> Reply {
        let intent = match err {
            AssistantError::InvalidInput | AssistantError::Fault(_) => Intent::Unknown,
            _ => Intent::InfoRequest,
        };
        let mut reply = Reply::new(self.error_text(err), intent);
        reply.error = Some(err.kind());
        reply
    }
}

fn build_resolver(strategy: EntityStrategy, store: &Arc<LeadStore>) -> Box<dyn EntityResolver> {
    match strategy {
        EntityStrategy::Substring => Box::new(SubstringResolver::new(store)),
        EntityStrategy::ProperNoun => Box::new(ProperNounResolver::new(Arc::clone(store))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic in pipeline".to_string())
}
