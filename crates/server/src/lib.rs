//! Sales Assistant Server
//!
//! HTTP endpoints for the chat page and the lead API.

pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_error, record_request};
pub use state::AppState;

use axum::http::StatusCode;
use thiserror::Error;

use sales_assistant_agent::AssistantError;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AssistantError> for ServerError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::InvalidInput => ServerError::InvalidRequest(err.to_string()),
            AssistantError::NoEntityMatch
            | AssistantError::NoFieldMatch { .. }
            | AssistantError::UnknownLead(_) => ServerError::NotFound(err.to_string()),
            AssistantError::Fault(reason) => ServerError::Internal(reason),
        }
    }
}

impl From<sales_assistant_config::ConfigError> for ServerError {
    fn from(err: sales_assistant_config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status: StatusCode = ServerError::from(AssistantError::UnknownLead("x".into())).into();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let status: StatusCode = ServerError::from(AssistantError::InvalidInput).into();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let status: StatusCode = ServerError::from(AssistantError::Fault("boom".into())).into();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
