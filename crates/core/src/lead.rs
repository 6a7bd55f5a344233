//! Lead records, statuses and addressable fields

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;
use crate::text::to_key;

/// Pipeline stage of a lead
///
/// The seven named stages are the ones the assistant has follow-up
/// questions for. Anything else loads as `Other` and keeps its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    Prospecting,
    Lead,
    QualifiedLead,
    Negotiation,
    ProposalSent,
    ClosedWon,
    ClosedLost,
    Other(String),
}

impl LeadStatus {
    /// The fixed stages, in pipeline order
    pub const KNOWN: [LeadStatus; 7] = [
        LeadStatus::Prospecting,
        LeadStatus::Lead,
        LeadStatus::QualifiedLead,
        LeadStatus::Negotiation,
        LeadStatus::ProposalSent,
        LeadStatus::ClosedWon,
        LeadStatus::ClosedLost,
    ];

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            LeadStatus::Prospecting => "Prospecting",
            LeadStatus::Lead => "Lead",
            LeadStatus::QualifiedLead => "Qualified Lead",
            LeadStatus::Negotiation => "Negotiation",
            LeadStatus::ProposalSent => "Proposal Sent",
            LeadStatus::ClosedWon => "Closed Won",
            LeadStatus::ClosedLost => "Closed Lost",
            LeadStatus::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LeadStatus::Other(_))
    }
}

impl From<&str> for LeadStatus {
    fn from(label: &str) -> Self {
        let wanted = label.trim();
        Self::KNOWN
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(wanted))
            .unwrap_or_else(|| LeadStatus::Other(wanted.to_string()))
    }
}

impl From<String> for LeadStatus {
    fn from(label: String) -> Self {
        LeadStatus::from(label.as_str())
    }
}

impl From<LeadStatus> for String {
    fn from(status: LeadStatus) -> Self {
        match status {
            LeadStatus::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single addressable attribute of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Contact,
    Status,
    Value,
    LastContact,
    Industry,
    ProductsInterested,
    PotentialNeeds,
    ReasonForStatus,
    LessonsLearned,
    NextStepSuggestion,
}

impl LeadField {
    /// All fields in summary order
    pub const ALL: [LeadField; 10] = [
        LeadField::Contact,
        LeadField::Status,
        LeadField::Value,
        LeadField::LastContact,
        LeadField::Industry,
        LeadField::ProductsInterested,
        LeadField::PotentialNeeds,
        LeadField::ReasonForStatus,
        LeadField::LessonsLearned,
        LeadField::NextStepSuggestion,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            LeadField::Contact => "contact",
            LeadField::Status => "status",
            LeadField::Value => "value",
            LeadField::LastContact => "last_contact",
            LeadField::Industry => "industry",
            LeadField::ProductsInterested => "products_interested",
            LeadField::PotentialNeeds => "potential_needs",
            LeadField::ReasonForStatus => "reason_for_status",
            LeadField::LessonsLearned => "lessons_learned",
            LeadField::NextStepSuggestion => "next_step_suggestion",
        }
    }

    /// Label used in the summary block
    pub fn label(&self) -> &'static str {
        match self {
            LeadField::Contact => "Contact",
            LeadField::Status => "Status",
            LeadField::Value => "Deal Value",
            LeadField::LastContact => "Last Contact",
            LeadField::Industry => "Industry",
            LeadField::ProductsInterested => "Products Interested",
            LeadField::PotentialNeeds => "Potential Needs",
            LeadField::ReasonForStatus => "Reason for Status",
            LeadField::LessonsLearned => "Lessons Learned",
            LeadField::NextStepSuggestion => "Next Step Suggestion",
        }
    }

    /// Name used inside a sentence ("the deal value for ...")
    pub fn phrase(&self) -> &'static str {
        match self {
            LeadField::Contact => "contact person",
            LeadField::Status => "status",
            LeadField::Value => "deal value",
            LeadField::LastContact => "last contact date",
            LeadField::Industry => "industry",
            LeadField::ProductsInterested => "products of interest",
            LeadField::PotentialNeeds => "potential needs",
            LeadField::ReasonForStatus => "reason for the current status",
            LeadField::LessonsLearned => "lessons learned",
            LeadField::NextStepSuggestion => "suggested next step",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, LeadField::ProductsInterested)
    }
}

impl FromStr for LeadField {
    type Err = Error;

    /// Accepts the identifier or the label in any case (`last_contact`,
    /// `Last Contact`, `deal value`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = to_key(s);
        Self::ALL
            .into_iter()
            .find(|field| field.id() == wanted || to_key(field.label()) == wanted)
            .ok_or_else(|| Error::UnknownField(s.trim().to_string()))
    }
}

impl std::fmt::Display for LeadField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Value of a field as stored on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Missing,
}

impl FieldValue<'_> {
    pub fn is_present(&self) -> bool {
        !matches!(self, FieldValue::Missing)
    }
}

/// One sales lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Normalized key, `to_key(display_name)`
    pub key: String,
    pub display_name: String,
    pub contact: String,
    pub status: LeadStatus,
    /// Formatted currency string ("$50,000")
    pub value: String,
    pub last_contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products_interested: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential_needs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_for_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons_learned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step_suggestion: Option<String>,
}

impl LeadRecord {
    /// Minimal record; optional attributes start empty
    pub fn new(
        display_name: impl Into<String>,
        contact: impl Into<String>,
        status: impl Into<LeadStatus>,
        value: impl Into<String>,
        last_contact: impl Into<String>,
    ) -> Self {
        let display_name = display_name.into();
        Self {
            key: to_key(&display_name),
            display_name,
            contact: contact.into(),
            status: status.into(),
            value: value.into(),
            last_contact: last_contact.into(),
            industry: None,
            products_interested: Vec::new(),
            potential_needs: None,
            reason_for_status: None,
            lessons_learned: None,
            next_step_suggestion: None,
        }
    }

    /// Read one field. Blank strings and empty lists read as `Missing`.
    pub fn value_of(&self, field: LeadField) -> FieldValue<'_> {
        match field {
            LeadField::Contact => text(&self.contact),
            LeadField::Status => text(self.status.label()),
            LeadField::Value => text(&self.value),
            LeadField::LastContact => text(&self.last_contact),
            LeadField::Industry => self.industry.as_deref().map_or(FieldValue::Missing, text),
            LeadField::ProductsInterested => {
                if self.products_interested.iter().all(|p| p.trim().is_empty()) {
                    FieldValue::Missing
                } else {
                    FieldValue::List(&self.products_interested)
                }
            }
            LeadField::PotentialNeeds => {
                self.potential_needs.as_deref().map_or(FieldValue::Missing, text)
            }
            LeadField::ReasonForStatus => {
                self.reason_for_status.as_deref().map_or(FieldValue::Missing, text)
            }
            LeadField::LessonsLearned => {
                self.lessons_learned.as_deref().map_or(FieldValue::Missing, text)
            }
            LeadField::NextStepSuggestion => self
                .next_step_suggestion
                .as_deref()
                .map_or(FieldValue::Missing, text),
        }
    }

    /// Whether the record carries a non-blank value for the field
    pub fn has(&self, field: LeadField) -> bool {
        self.value_of(field).is_present()
    }
}

fn text(s: &str) -> FieldValue<'_> {
    if s.trim().is_empty() {
        FieldValue::Missing
    } else {
        FieldValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!(LeadStatus::from("closed lost"), LeadStatus::ClosedLost);
        assert_eq!(LeadStatus::from(" Qualified Lead "), LeadStatus::QualifiedLead);
        assert_eq!(
            LeadStatus::from("On Hold"),
            LeadStatus::Other("On Hold".to_string())
        );
        assert!(!LeadStatus::from("On Hold").is_known());
    }

    #[test]
    fn test_status_serde_uses_label() {
        let json = serde_json::to_string(&LeadStatus::ProposalSent).unwrap();
        assert_eq!(json, "\"Proposal Sent\"");
        let parsed: LeadStatus = serde_json::from_str("\"Closed Won\"").unwrap();
        assert_eq!(parsed, LeadStatus::ClosedWon);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("last_contact".parse::<LeadField>().unwrap(), LeadField::LastContact);
        assert_eq!("Deal Value".parse::<LeadField>().unwrap(), LeadField::Value);
        assert_eq!(
            "products interested".parse::<LeadField>().unwrap(),
            LeadField::ProductsInterested
        );
        assert_eq!(
            "favourite_color".parse::<LeadField>(),
            Err(Error::UnknownField("favourite_color".to_string()))
        );
    }

    #[test]
    fn test_new_record_derives_key() {
        let record = LeadRecord::new("Alpha Corp", "John Doe", "Prospecting", "$50,000", "2024-03-15");
        assert_eq!(record.key, "alpha_corp");
        assert_eq!(record.status, LeadStatus::Prospecting);
    }

    #[test]
    fn test_blank_values_read_as_missing() {
        let mut record = LeadRecord::new("Alpha Corp", "John Doe", "Lead", "$1", "2024-01-01");
        record.industry = Some("   ".to_string());
        record.products_interested = vec![String::new()];
        assert_eq!(record.value_of(LeadField::Industry), FieldValue::Missing);
        assert_eq!(record.value_of(LeadField::ProductsInterested), FieldValue::Missing);
        assert!(!record.has(LeadField::LessonsLearned));
        assert_eq!(record.value_of(LeadField::Status), FieldValue::Text("Lead"));
    }
}
