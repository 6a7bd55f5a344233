//! Core types for the sales assistant
//!
//! This crate provides the foundational types used across all other crates:
//! - Lead records, statuses and addressable fields
//! - The immutable lead store shared by every request
//! - Text normalization and keyword matching primitives
//! - Coarse intent classification result
//! - Error types

pub mod error;
pub mod intent;
pub mod lead;
pub mod store;
pub mod text;

pub use error::{Error, Result};
pub use intent::Intent;
pub use lead::{FieldValue, LeadField, LeadRecord, LeadStatus};
pub use store::LeadStore;
pub use text::{
    contains_phrase, key_to_spaced, normalize, to_key, tokens, KeywordSet, KEY_SEPARATOR,
};
