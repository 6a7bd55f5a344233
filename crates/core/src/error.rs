//! Core error types

use thiserror::Error;

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or querying lead data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid lead record '{key}': {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("Duplicate lead key: {0}")]
    DuplicateKey(String),

    #[error("Unknown lead field: {0}")]
    UnknownField(String),

    #[error("Unknown lead: {0}")]
    UnknownLead(String),
}

impl Error {
    pub(crate) fn invalid_record(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
