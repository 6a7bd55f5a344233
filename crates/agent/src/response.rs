//! Response Composition
//!
//! Turns pipeline outcomes into reply text. All markup goes through
//! `Markup` so the same composer serves the web page and plain clients.

use sales_assistant_config::ReplyFormat;
use sales_assistant_core::{FieldValue, LeadField, LeadRecord};

use crate::follow_up::follow_up;
use crate::markup::Markup;

/// Shown for absent values
pub const PLACEHOLDER: &str = "N/A";

const GREETING: &str = "Hello! Sales Assistant bot here. How can I help you today?";
const FAREWELL: &str = "Goodbye! Happy selling!";
const INVALID_INPUT: &str = "Please provide some input.";
const FAULT: &str = "An error occurred while processing your request. Please try again.";
const NOT_UNDERSTOOD: &str = "Sorry, I didn't quite understand that.";
const NO_MATCH: &str = "It sounds like you're asking for lead information, but I couldn't \
identify a company name from my records in your message. Please mention the company name \
clearly (e.g., 'status for Alpha Corp').";
const EXAMPLES_INTRO: &str = "You can ask things like:";

/// Used by the fallback reply when example generation is off
pub const FIXED_SUGGESTIONS: [&str; 4] = [
    "What's the status of Beta Solutions?",
    "Tell me about Gamma Tech",
    "hello",
    "bye",
];

/// Builds reply text
#[derive(Debug, Clone, Copy)]
pub struct ResponseComposer {
    markup: Markup,
}

impl ResponseComposer {
    pub fn new(format: ReplyFormat) -> Self {
        Self {
            markup: Markup::new(format),
        }
    }

    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Every field of the record, then the follow-up question if it applies
    pub fn summary(&self, record: &LeadRecord) -> String {
        let m = &self.markup;
        let br = m.line_break();

        let mut text = format!("Found info for '{}':", m.bold(&record.display_name));
        for field in LeadField::ALL {
            text.push_str(br);
            text.push_str(m.indent());
            text.push_str(field.label());
            text.push_str(": ");
            text.push_str(&m.text(&render_value(record.value_of(field))));
        }

        if let Some(question) = follow_up(record) {
            text.push_str(br);
            text.push_str(br);
            text.push_str(&m.italic(question));
        }
        text
    }

    /// One field of the record
    pub fn field(&self, record: &LeadRecord, field: LeadField) -> String {
        format!(
            "The {} for {} is: {}",
            field.phrase(),
            self.markup.bold(&record.display_name),
            self.markup.bold(&render_value(record.value_of(field))),
        )
    }

    /// A field asked for by identifier that the record does not define
    pub fn no_field(&self, display_name: &str, field: &str) -> String {
        format!(
            "I don't have a '{}' field for {}.",
            self.markup.text(field),
            self.markup.bold(display_name)
        )
    }

    pub fn no_match(&self, examples: &[String]) -> String {
        self.with_examples(NO_MATCH, examples)
    }

    pub fn fallback(&self, examples: &[String]) -> String {
        if examples.is_empty() {
            let fixed: Vec<String> = FIXED_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
            return self.with_examples(NOT_UNDERSTOOD, &fixed);
        }
        self.with_examples(NOT_UNDERSTOOD, examples)
    }

    pub fn greeting(&self, examples: &[String]) -> String {
        self.with_examples(GREETING, examples)
    }

    pub fn farewell(&self) -> String {
        FAREWELL.to_string()
    }

    pub fn invalid_input(&self) -> String {
        INVALID_INPUT.to_string()
    }

    pub fn fault(&self) -> String {
        FAULT.to_string()
    }

    /// Example questions carry display names, so they are escaped like values
    fn with_examples(&self, lead: &str, examples: &[String]) -> String {
        if examples.is_empty() {
            return lead.to_string();
        }
        let escaped: Vec<String> = examples
            .iter()
            .map(|example| self.markup.text(example).into_owned())
            .collect();
        format!("{lead} {EXAMPLES_INTRO} {}.", quoted_list(&escaped))
    }
}

fn render_value(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Text(text) => text.to_string(),
        FieldValue::List(items) => items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        FieldValue::Missing => PLACEHOLDER.to_string(),
    }
}

/// `'a', 'b', or 'c'`
fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| format!("'{item}'")).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}
