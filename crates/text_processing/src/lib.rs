//! Text processing for the sales assistant
//!
//! This crate turns a normalized message into the pieces the response
//! composer needs:
//! - **Intent Classification**: greeting, farewell, information request
//! - **Entity Resolution**: which lead the message names
//! - **Field Resolution**: which attribute of that lead is asked about
//!
//! All three are ordered rule tables; the first matching rule wins.
//!
//! # Example
//!
//! ```
//! use sales_assistant_core::{normalize, tokens, Intent};
//! use sales_assistant_text_processing::IntentClassifier;
//!
//! let classifier = IntentClassifier::new();
//! let text = normalize("Hello there!");
//! assert_eq!(classifier.classify(&text, &tokens(&text)), Intent::Greeting);
//! ```

pub mod entities;
pub mod fields;
pub mod intent;

pub use entities::{EntityResolver, ProperNounResolver, SubstringResolver, Utterance};
pub use fields::{FieldResolver, FieldRule};
pub use intent::{IntentClassifier, IntentRule};
