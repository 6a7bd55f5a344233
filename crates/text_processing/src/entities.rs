//! Entity Resolution
//!
//! Finds which lead a message names. Resolution strategies share the
//! `EntityResolver` trait so the pipeline can swap them by configuration.
//! Not finding a lead is a normal outcome, not an error.

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use sales_assistant_core::{key_to_spaced, normalize, to_key, LeadStore};

/// A message in raw and normalized form
#[derive(Debug, Clone)]
pub struct Utterance<'a> {
    pub raw: &'a str,
    pub normalized: String,
}

impl<'a> Utterance<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            normalized: normalize(raw),
        }
    }
}

/// Maps a message to the key of the lead it refers to
pub trait EntityResolver: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Key of the named lead, if any
    fn resolve(&self, utterance: &Utterance<'_>) -> Option<String>;
}

#[derive(Debug, Clone)]
struct Candidate {
    key: String,
    name: String,
    spaced_key: String,
}

/// Substring match of display names, longest name first
///
/// Candidates are ordered once at construction by descending display name
/// length, so "alpha corp" is tried before "corp" and wins when both occur.
#[derive(Debug, Clone)]
pub struct SubstringResolver {
    candidates: Vec<Candidate>,
}

impl SubstringResolver {
    pub fn new(store: &LeadStore) -> Self {
        let mut candidates: Vec<Candidate> = store
            .iter()
            .map(|lead| Candidate {
                key: lead.key.clone(),
                name: normalize(&lead.display_name),
                spaced_key: key_to_spaced(&lead.key),
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.name
                .chars()
                .count()
                .cmp(&a.name.chars().count())
                .then_with(|| a.key.cmp(&b.key))
        });

        Self { candidates }
    }
}

impl EntityResolver for SubstringResolver {
    fn name(&self) -> &'static str {
        "substring"
    }

    fn resolve(&self, utterance: &Utterance<'_>) -> Option<String> {
        let message = utterance.normalized.as_str();
        for candidate in &self.candidates {
            if !candidate.name.is_empty() && message.contains(&candidate.name) {
                tracing::debug!(key = %candidate.key, "Matched lead by display name");
                return Some(candidate.key.clone());
            }
            if message.contains(&candidate.spaced_key) {
                tracing::debug!(key = %candidate.key, "Matched lead by key");
                return Some(candidate.key.clone());
            }
        }
        None
    }
}

/// Proper noun chunking over the raw message
///
/// Runs of capitalized words are mapped with `to_key` and looked up in the
/// store, longest sub-run first. Across runs the longest display name wins,
/// then key order. Falls back to substring matching so that
/// lowercase messages still resolve.
pub struct ProperNounResolver {
    store: Arc<LeadStore>,
    fallback: SubstringResolver,
}

impl ProperNounResolver {
    pub fn new(store: Arc<LeadStore>) -> Self {
        let fallback = SubstringResolver::new(&store);
        Self { store, fallback }
    }

    /// Capitalized word runs; whitespace continues a run, anything else ends it
    fn capitalized_runs(raw: &str) -> Vec<Vec<&str>> {
        let mut runs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for segment in raw.split_word_bounds() {
            if segment.trim().is_empty() {
                continue;
            }
            let capitalized = segment
                .chars()
                .next()
                .map(|c| c.is_uppercase())
                .unwrap_or(false);
            if capitalized && segment.chars().all(char::is_alphanumeric) {
                current.push(segment);
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }

    fn lookup_run(&self, run: &[&str]) -> Option<String> {
        for len in (1..=run.len()).rev() {
            for window in run.windows(len) {
                let key = to_key(&window.join(" "));
                if self.store.contains(&key) {
                    return Some(key);
                }
            }
        }
        None
    }

    fn name_len(&self, key: &str) -> usize {
        self.store
            .get(key)
            .map_or(0, |lead| lead.display_name.chars().count())
    }
}

impl EntityResolver for ProperNounResolver {
    fn name(&self) -> &'static str {
        "proper_noun"
    }

    fn resolve(&self, utterance: &Utterance<'_>) -> Option<String> {
        let best = Self::capitalized_runs(utterance.raw)
            .into_iter()
            .filter_map(|run| self.lookup_run(&run).map(|key| (key, run.join(" "))))
            .max_by(|(a, _), (b, _)| {
                self.name_len(a)
                    .cmp(&self.name_len(b))
                    .then_with(|| b.cmp(a))
            });

        match best {
            Some((key, chunk)) => {
                tracing::debug!(key = %key, chunk = %chunk, "Matched lead by proper noun");
                Some(key)
            }
            None => self.fallback.resolve(utterance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_assistant_core::LeadRecord;

    fn store(names: &[&str]) -> LeadStore {
        LeadStore::new(
            names
                .iter()
                .map(|n| LeadRecord::new(*n, "Someone", "Lead", "$1,000", "2024-01-01"))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_substring_resolves_display_name() {
        let resolver = SubstringResolver::new(&store(&["Alpha Corp", "Beta Solutions"]));
        let found = resolver.resolve(&Utterance::new("What's the status of Beta Solutions?"));
        assert_eq!(found.as_deref(), Some("beta_solutions"));
    }

    #[test]
    fn test_longest_name_wins() {
        // "Corp" is defined first but "Alpha Corp" is longer
        let resolver = SubstringResolver::new(&store(&["Corp", "Alpha Corp"]));
        let found = resolver.resolve(&Utterance::new("tell me about alpha corp"));
        assert_eq!(found.as_deref(), Some("alpha_corp"));

        let found = resolver.resolve(&Utterance::new("tell me about corp"));
        assert_eq!(found.as_deref(), Some("corp"));
    }

    #[test]
    fn test_no_match() {
        let resolver = SubstringResolver::new(&store(&["Alpha Corp"]));
        assert!(resolver.resolve(&Utterance::new("status of omega")).is_none());
    }

    #[test]
    fn test_matches_spaced_key_form() {
        // Display name with doubled spaces still resolves through its key
        let mut record = LeadRecord::new("Zeta  Global", "Someone", "Lead", "$1,000", "2024-01-01");
        record.key = "zeta_global".to_string();
        let resolver = SubstringResolver::new(&LeadStore::new(vec![record]).unwrap());
        let found = resolver.resolve(&Utterance::new("info on zeta global"));
        assert_eq!(found.as_deref(), Some("zeta_global"));
    }

    #[test]
    fn test_capitalized_runs() {
        let runs = ProperNounResolver::capitalized_runs("Tell me about Gamma Tech, and Beta!");
        assert_eq!(runs, vec![vec!["Tell"], vec!["Gamma", "Tech"], vec!["Beta"]]);
    }

    #[test]
    fn test_proper_noun_resolution() {
        let resolver =
            ProperNounResolver::new(Arc::new(store(&["Gamma Tech", "Omega Systems"])));
        let found = resolver.resolve(&Utterance::new("Can you Show Omega Systems details"));
        assert_eq!(found.as_deref(), Some("omega_systems"));
    }

    #[test]
    fn test_proper_noun_longest_name_across_runs() {
        // the first run names "Corp", a later one the longer "Alpha Corp"
        let resolver = ProperNounResolver::new(Arc::new(store(&["Corp", "Alpha Corp"])));
        let found = resolver.resolve(&Utterance::new("Corp vs Alpha Corp"));
        assert_eq!(found.as_deref(), Some("alpha_corp"));
    }

    #[test]
    fn test_proper_noun_falls_back_to_substring() {
        let resolver = ProperNounResolver::new(Arc::new(store(&["Gamma Tech"])));
        let found = resolver.resolve(&Utterance::new("tell me about gamma tech"));
        assert_eq!(found.as_deref(), Some("gamma_tech"));
        assert_eq!(resolver.name(), "proper_noun");
    }
}
