//! Example question generation
//!
//! Builds a few questions from the live lead table so the greeting and
//! fallback replies show what can be asked. Each question names a real
//! lead and a field that lead actually has.

use rand::seq::SliceRandom;
use rand::Rng;

use sales_assistant_core::{LeadField, LeadRecord, LeadStore};

const NAME: &str = "{name}";

/// Phrasings per field; each one routes back to its field
fn templates(field: LeadField) -> &'static [&'static str] {
    match field {
        LeadField::Status => &["What's the status of {name}?", "What stage is {name} at?"],
        LeadField::Contact => &[
            "Who is the contact at {name}?",
            "Who is the contact person for {name}?",
        ],
        LeadField::Value => &[
            "How much is the {name} deal worth?",
            "What's the deal value for {name}?",
        ],
        LeadField::LastContact => &["When was the last contact with {name}?"],
        LeadField::Industry => &["What industry is {name} in?"],
        LeadField::ProductsInterested => &["Which products is {name} interested in?"],
        LeadField::PotentialNeeds => &["What does {name} need?"],
        LeadField::ReasonForStatus => &["What's the reason for the status of {name}?"],
        LeadField::LessonsLearned => &["What lessons were learned from {name}?"],
        LeadField::NextStepSuggestion => &["What's the next step for {name}?"],
    }
}

fn field_question<R: Rng + ?Sized>(record: &LeadRecord, rng: &mut R) -> Option<String> {
    let present: Vec<LeadField> = LeadField::ALL
        .into_iter()
        .filter(|field| record.has(*field))
        .collect();
    let field = present.choose(rng)?;
    let template = templates(*field).choose(rng)?;
    Some(template.replace(NAME, &record.display_name))
}

/// Up to `count` field questions about distinct leads plus one summary
/// question, without duplicates
pub fn generate_examples<R: Rng + ?Sized>(
    store: &LeadStore,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut questions: Vec<String> = store
        .records()
        .choose_multiple(rng, count)
        .filter_map(|record| field_question(record, rng))
        .collect();

    if let Some(record) = store.records().choose(rng) {
        questions.push(format!("Tell me about {}", record.display_name));
    }

    let mut seen = std::collections::HashSet::new();
    questions.retain(|q| seen.insert(q.clone()));
    questions.truncate(count + 1);
    questions
}
