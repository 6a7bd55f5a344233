//! Sales Assistant Conversation Pipeline
//!
//! Features:
//! - Intent, lead and field resolution over a fixed lead table
//! - Full summary and single field replies
//! - Status driven follow-up questions
//! - Example questions generated from the table
//! - HTML or plain text reply markup

pub mod assistant;
pub mod examples;
pub mod follow_up;
pub mod markup;
pub mod response;

pub use assistant::{AssistantOptions, Reply, SalesAssistant};
pub use examples::generate_examples;
pub use follow_up::{follow_up, GENERIC_FOLLOW_UP};
pub use markup::Markup;
pub use response::ResponseComposer;

use thiserror::Error;

/// Assistant errors
///
/// None of these reach a chat user as an error; `SalesAssistant::respond`
/// turns each into a reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssistantError {
    #[error("Empty or whitespace-only input")]
    InvalidInput,

    #[error("No known lead named in message")]
    NoEntityMatch,

    #[error("Lead '{lead}' has no field '{field}'")]
    NoFieldMatch { lead: String, field: String },

    #[error("Unknown lead: {0}")]
    UnknownLead(String),

    #[error("Processing fault: {0}")]
    Fault(String),
}

impl AssistantError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            AssistantError::InvalidInput => "invalid_input",
            AssistantError::NoEntityMatch => "no_entity_match",
            AssistantError::NoFieldMatch { .. } => "no_field_match",
            AssistantError::UnknownLead(_) => "unknown_lead",
            AssistantError::Fault(_) => "fault",
        }
    }
}

impl From<sales_assistant_core::Error> for AssistantError {
    fn from(err: sales_assistant_core::Error) -> Self {
        match err {
            sales_assistant_core::Error::UnknownLead(key) => AssistantError::UnknownLead(key),
            other => AssistantError::Fault(other.to_string()),
        }
    }
}
