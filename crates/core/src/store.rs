//! Immutable lead store
//!
//! Built once at startup and shared read-only by every request. The store
//! keeps records in definition order and indexes them by key.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::lead::LeadRecord;
use crate::text::to_key;

/// Read-only table of lead records
#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    records: Vec<LeadRecord>,
    index: HashMap<String, usize>,
}

impl LeadStore {
    /// Validate records and build the store
    ///
    /// Every record must have a non-empty display name and contact, its key
    /// must equal `to_key(display_name)`, and keys must be unique.
    pub fn new(records: Vec<LeadRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            if record.display_name.trim().is_empty() {
                return Err(Error::invalid_record(&record.key, "display name is empty"));
            }
            if record.contact.trim().is_empty() {
                return Err(Error::invalid_record(&record.key, "contact is empty"));
            }
            let derived = to_key(&record.display_name);
            if derived != record.key {
                return Err(Error::invalid_record(
                    &record.key,
                    format!(
                        "key does not match display name '{}' (expected '{}')",
                        record.display_name, derived
                    ),
                ));
            }
            if index.insert(record.key.clone(), position).is_some() {
                return Err(Error::DuplicateKey(record.key.clone()));
            }
        }

        tracing::debug!(leads = records.len(), "Built lead store");
        Ok(Self { records, index })
    }

    /// Look up a record by key
    pub fn get(&self, key: &str) -> Option<&LeadRecord> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    /// Look up a record by key, failing with `UnknownLead`
    pub fn require(&self, key: &str) -> Result<&LeadRecord> {
        self.get(key)
            .ok_or_else(|| Error::UnknownLead(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Records in definition order
    pub fn iter(&self) -> impl Iterator<Item = &LeadRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> LeadRecord {
        LeadRecord::new(name, "Jane Smith", "Lead", "$10,000", "2024-04-01")
    }

    #[test]
    fn test_store_lookup() {
        let store = LeadStore::new(vec![record("Alpha Corp"), record("Beta Solutions")]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("beta_solutions").unwrap().display_name, "Beta Solutions");
        assert!(store.get("gamma_tech").is_none());
        assert_eq!(
            store.require("gamma_tech"),
            Err(Error::UnknownLead("gamma_tech".to_string()))
        );
    }

    #[test]
    fn test_keys_round_trip_display_names() {
        let store = LeadStore::new(vec![record("Alpha Corp"), record("Omega Systems")]).unwrap();
        for lead in store.iter() {
            assert_eq!(to_key(&lead.display_name), lead.key);
        }
    }

    #[test]
    fn test_rejects_mismatched_key() {
        let mut bad = record("Alpha Corp");
        bad.key = "alpha".to_string();
        let err = LeadStore::new(vec![bad]).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { ref key, .. } if key == "alpha"));
    }

    #[test]
    fn test_rejects_empty_display_name() {
        let mut bad = record("Alpha Corp");
        bad.display_name = "  ".to_string();
        assert!(LeadStore::new(vec![bad]).is_err());
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let err = LeadStore::new(vec![record("Alpha Corp"), record("alpha   corp")]).unwrap_err();
        assert_eq!(err, Error::DuplicateKey("alpha_corp".to_string()));
    }
}
