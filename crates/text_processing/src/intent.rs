//! Intent Classification
//!
//! Coarse, keyword based classification of a normalized message. Rules are
//! evaluated in table order and the first rule with a matching trigger
//! wins, so a message with both a greeting word and an info word is a
//! greeting.

use std::collections::HashSet;

use sales_assistant_core::{Intent, KeywordSet};

const GREETING_TRIGGERS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "yo",
    "howdy",
    "greeting",
    "greetings",
    "morning",
    "afternoon",
    "evening",
    "good day",
];

const FAREWELL_TRIGGERS: &[&str] = &[
    "bye", "goodbye", "exit", "quit", "later", "cya", "see ya", "see you",
];

const INFO_TRIGGERS: &[&str] = &[
    "info",
    "information",
    "status",
    "stage",
    "detail",
    "details",
    "tell",
    "find",
    "show",
    "lookup",
    "about",
    "update",
    "summary",
    "note",
    "notes",
    "who",
    "when",
    "contact",
    "value",
    "worth",
    "industry",
    "sector",
    "products",
    "interested",
    "need",
    "needs",
    "reason",
    "why",
    "lessons",
    "learned",
    "next",
    "what is",
    "what's",
    "what are",
    "look up",
    "give me",
    "how much",
    "next step",
];

/// One classification rule
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub triggers: KeywordSet,
}

impl IntentRule {
    pub fn new(intent: Intent, triggers: &[&'static str]) -> Self {
        Self {
            intent,
            triggers: KeywordSet::new(triggers),
        }
    }
}

/// Ordered rule table classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Greeting, then farewell, then information request
    pub fn new() -> Self {
        Self::with_rules(vec![
            IntentRule::new(Intent::Greeting, GREETING_TRIGGERS),
            IntentRule::new(Intent::Farewell, FAREWELL_TRIGGERS),
            IntentRule::new(Intent::InfoRequest, INFO_TRIGGERS),
        ])
    }

    pub fn with_rules(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Classify a normalized message; `Unknown` when no rule matches
    pub fn classify(&self, normalized: &str, tokens: &HashSet<&str>) -> Intent {
        for rule in &self.rules {
            if let Some(trigger) = rule.triggers.matching(normalized, tokens).next() {
                tracing::debug!(intent = %rule.intent, trigger, "Intent matched");
                return rule.intent;
            }
        }
        Intent::Unknown
    }

    /// Triggers configured for an intent
    pub fn triggers(&self, intent: Intent) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| rule.intent == intent)
            .flat_map(|rule| rule.triggers.triggers())
            .collect()
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_assistant_core::{normalize, tokens};

    fn classify(message: &str) -> Intent {
        let classifier = IntentClassifier::new();
        let text = normalize(message);
        classifier.classify(&text, &tokens(&text))
    }

    #[test]
    fn test_every_greeting_trigger() {
        for trigger in IntentClassifier::new().triggers(Intent::Greeting) {
            assert_eq!(classify(trigger), Intent::Greeting, "trigger {trigger}");
        }
    }

    #[test]
    fn test_every_farewell_trigger() {
        for trigger in IntentClassifier::new().triggers(Intent::Farewell) {
            assert_eq!(classify(trigger), Intent::Farewell, "trigger {trigger}");
        }
    }

    #[test]
    fn test_greeting_wins_over_info() {
        assert_eq!(classify("Hi, what's the status of Alpha Corp?"), Intent::Greeting);
    }

    #[test]
    fn test_farewell_wins_over_info() {
        assert_eq!(classify("show me Zeta Global later"), Intent::Farewell);
    }

    #[test]
    fn test_info_request() {
        assert_eq!(classify("What's the status of Beta Solutions?"), Intent::InfoRequest);
        assert_eq!(classify("Tell me about Gamma Tech"), Intent::InfoRequest);
        assert_eq!(classify("how much is sigma worth"), Intent::InfoRequest);
    }

    #[test]
    fn test_farewell_phrase_needs_whole_words() {
        assert_eq!(classify("can i see your notes on beta solutions?"), Intent::InfoRequest);
        assert_eq!(classify("Let me see your summary of Alpha Corp"), Intent::InfoRequest);
        assert_eq!(classify("see you tomorrow"), Intent::Farewell);
    }

    #[test]
    fn test_greeting_needs_whole_word() {
        // "hi" inside "this", "yo" inside "your"
        assert_eq!(classify("this is your pipeline"), Intent::Unknown);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("xyz nonsense"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }
}
