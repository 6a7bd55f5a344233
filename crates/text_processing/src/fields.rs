//! Field Resolution
//!
//! Decides which attribute of a matched lead the message asks about. The
//! rule table is ordered: free-text notes come before the short attributes
//! so that "the reason for their status" resolves to `reason_for_status`
//! rather than `status`. No match means the caller wants the full summary.

use std::collections::HashSet;

use sales_assistant_core::{contains_phrase, KeywordSet, LeadField};

/// A trigger that is ignored when a more specific phrase is present
#[derive(Debug, Clone, Copy)]
struct Exception {
    trigger: &'static str,
    unless: &'static str,
}

/// "name" asks for the contact person, "company name" does not
const COMPANY_NAME: Exception = Exception {
    trigger: "name",
    unless: "company name",
};

/// One field rule
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: LeadField,
    triggers: KeywordSet,
    exception: Option<Exception>,
}

impl FieldRule {
    pub fn new(field: LeadField, triggers: &[&'static str]) -> Self {
        Self {
            field,
            triggers: KeywordSet::new(triggers),
            exception: None,
        }
    }

    fn with_exception(mut self, exception: Exception) -> Self {
        self.exception = Some(exception);
        self
    }

    fn matches(&self, normalized: &str, tokens: &HashSet<&str>) -> bool {
        self.triggers.matching(normalized, tokens).any(|trigger| match self.exception {
            Some(ex) if ex.trigger == trigger => !contains_phrase(normalized, ex.unless),
            _ => true,
        })
    }
}

/// Ordered field rule table
#[derive(Debug, Clone)]
pub struct FieldResolver {
    rules: Vec<FieldRule>,
}

impl FieldResolver {
    pub fn new() -> Self {
        Self::with_rules(vec![
            FieldRule::new(
                LeadField::ReasonForStatus,
                &["reason", "why", "lost because", "lost the deal"],
            ),
            FieldRule::new(
                LeadField::LessonsLearned,
                &[
                    "lesson",
                    "lessons",
                    "learned",
                    "learn",
                    "learning",
                    "takeaway",
                    "takeaways",
                ],
            ),
            FieldRule::new(
                LeadField::NextStepSuggestion,
                &[
                    "recommend",
                    "recommendation",
                    "suggestion",
                    "suggest",
                    "next step",
                    "next steps",
                    "next action",
                    "what next",
                ],
            ),
            FieldRule::new(
                LeadField::PotentialNeeds,
                &["need", "needs", "requirement", "requirements", "pain", "pain point"],
            ),
            FieldRule::new(
                LeadField::ProductsInterested,
                &["product", "products", "interested", "interest"],
            ),
            FieldRule::new(
                LeadField::LastContact,
                &[
                    "last contact",
                    "last contacted",
                    "last spoke",
                    "last call",
                    "last touch",
                    "last touched",
                ],
            ),
            FieldRule::new(LeadField::Status, &["status", "stage", "progress", "pipeline"]),
            FieldRule::new(LeadField::Contact, &["contact", "who", "person", "name", "rep"])
                .with_exception(COMPANY_NAME),
            FieldRule::new(
                LeadField::Value,
                &["value", "worth", "amount", "size", "revenue", "how much", "deal size"],
            ),
            FieldRule::new(
                LeadField::Industry,
                &["industry", "sector", "vertical", "business"],
            ),
        ])
    }

    pub fn with_rules(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// First field whose triggers appear in the message
    pub fn resolve(&self, normalized: &str, tokens: &HashSet<&str>) -> Option<LeadField> {
        let field = self
            .rules
            .iter()
            .find(|rule| rule.matches(normalized, tokens))
            .map(|rule| rule.field);
        if let Some(field) = field {
            tracing::debug!(field = %field, "Field matched");
        }
        field
    }
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_assistant_core::{normalize, tokens};

    fn resolve(message: &str) -> Option<LeadField> {
        let text = normalize(message);
        FieldResolver::new().resolve(&text, &tokens(&text))
    }

    #[test]
    fn test_status() {
        assert_eq!(resolve("What's the status of Beta Solutions?"), Some(LeadField::Status));
        assert_eq!(resolve("what stage is alpha corp at"), Some(LeadField::Status));
    }

    #[test]
    fn test_full_summary_when_no_field() {
        assert_eq!(resolve("Tell me about Gamma Tech"), None);
        assert_eq!(resolve("info on sigma solutions"), None);
    }

    #[test]
    fn test_last_contact_before_contact() {
        assert_eq!(
            resolve("when was the last contact with Delta Industries"),
            Some(LeadField::LastContact)
        );
        assert_eq!(resolve("who is the contact at delta industries"), Some(LeadField::Contact));
    }

    #[test]
    fn test_reason_before_status() {
        assert_eq!(
            resolve("what's the reason for the status of epsilon enterprises"),
            Some(LeadField::ReasonForStatus)
        );
    }

    #[test]
    fn test_name_means_contact() {
        assert_eq!(resolve("what's the name at zeta global"), Some(LeadField::Contact));
    }

    #[test]
    fn test_company_name_is_not_contact() {
        assert_eq!(resolve("what's the company name for zeta global"), None);
        // a different contact trigger still applies
        assert_eq!(
            resolve("company name and contact person for zeta global"),
            Some(LeadField::Contact)
        );
    }

    #[test]
    fn test_value_and_industry() {
        assert_eq!(resolve("how much is sigma solutions worth"), Some(LeadField::Value));
        assert_eq!(resolve("what's the deal size for alpha corp"), Some(LeadField::Value));
        assert_eq!(resolve("which sector is omega systems in"), Some(LeadField::Industry));
    }

    #[test]
    fn test_notes() {
        assert_eq!(resolve("products alpha corp is interested in"), Some(LeadField::ProductsInterested));
        assert_eq!(resolve("what does beta solutions need"), Some(LeadField::PotentialNeeds));
        assert_eq!(resolve("lessons learned from gamma tech"), Some(LeadField::LessonsLearned));
        assert_eq!(resolve("what's the next step for sigma solutions"), Some(LeadField::NextStepSuggestion));
    }
}
