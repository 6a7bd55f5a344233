//! Status driven follow-up questions
//!
//! Each pipeline stage has one suggested question. A question is dropped
//! when the record already answers it: a lost deal that carries its reason,
//! a won deal that carries its lessons.

use sales_assistant_core::{LeadField, LeadRecord, LeadStatus};

/// Used for any status outside the fixed table
pub const GENERIC_FOLLOW_UP: &str = "What's the next planned action for this lead?";

struct FollowUpRule {
    status: LeadStatus,
    question: &'static str,
    answered_by: Option<LeadField>,
}

fn rules() -> [FollowUpRule; 7] {
    [
        FollowUpRule {
            status: LeadStatus::Prospecting,
            question: "What's our next step to qualify them?",
            answered_by: None,
        },
        FollowUpRule {
            status: LeadStatus::Lead,
            question: "What information do we need to qualify them further?",
            answered_by: None,
        },
        FollowUpRule {
            status: LeadStatus::QualifiedLead,
            question: "What's the strategy to move them towards a proposal?",
            answered_by: None,
        },
        FollowUpRule {
            status: LeadStatus::Negotiation,
            question: "What are the key points to address to close this deal?",
            answered_by: None,
        },
        FollowUpRule {
            status: LeadStatus::ProposalSent,
            question: "When is the follow-up scheduled, or what feedback have we received?",
            answered_by: None,
        },
        FollowUpRule {
            status: LeadStatus::ClosedWon,
            question: "Great job! What were the key factors to success here?",
            answered_by: Some(LeadField::LessonsLearned),
        },
        FollowUpRule {
            status: LeadStatus::ClosedLost,
            question: "What were the main reasons this deal was lost, and what can we learn?",
            answered_by: Some(LeadField::ReasonForStatus),
        },
    ]
}

/// Question for a status, ignoring suppression
pub fn question_for(status: &LeadStatus) -> &'static str {
    rules()
        .into_iter()
        .find(|rule| &rule.status == status)
        .map(|rule| rule.question)
        .unwrap_or(GENERIC_FOLLOW_UP)
}

/// Follow-up to append to a record's summary, if any
pub fn follow_up(record: &LeadRecord) -> Option<&'static str> {
    match rules().into_iter().find(|rule| rule.status == record.status) {
        Some(rule) => match rule.answered_by {
            Some(field) if record.has(field) => None,
            _ => Some(rule.question),
        },
        None => Some(GENERIC_FOLLOW_UP),
    }
}
