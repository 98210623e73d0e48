//! Keyword intent classifier for typed input
//!
//! Stands in for a hosted language-understanding service. Confidence is 0.9 for
//! an unambiguous match and drops below the engine's threshold when several
//! intents match, so ambiguous input goes through a confirmation.

use deduction_core::nlu::{
    AFFIRMATIVE, INSTRUCTIONS_INTENT, KNOWN_EVIDENCE_INTENT, NEGATIVE, SOLVE_INTENT,
    SUSPECTS_INTENT,
};
use deduction_core::{CaseFile, NluResult, ScoredEntity, ScoredIntent};

const CLEAR: f64 = 0.9;
const AMBIGUOUS: f64 = 0.6;

const YES_WORDS: [&str; 8] = ["yes", "yeah", "yep", "sure", "correct", "right", "ok", "okay"];
const NO_WORDS: [&str; 4] = ["no", "nope", "nah", "negative"];
const NUMBER_WORDS: [(&str, &str); 6] = [
    ("2", "2"),
    ("two", "2"),
    ("3", "3"),
    ("three", "3"),
    ("4", "4"),
    ("four", "4"),
];

/// Intent name and the phrases that trigger it
const INTENT_KEYWORDS: [(&str, &[&str]); 11] = [
    (SOLVE_INTENT, &["solve", "guess", "accuse"]),
    (SUSPECTS_INTENT, &["suspect"]),
    (KNOWN_EVIDENCE_INTENT, &["know", "so far", "recap"]),
    (INSTRUCTIONS_INTENT, &["instruction", "help", "how do i"]),
    ("cause of death", &["cause", "died", "killed"]),
    ("time of death", &["time", "when"]),
    ("motive", &["motive", "why"]),
    ("state of the victim's clothes", &["clothes", "dress"]),
    ("hint on body part", &["body", "hint", "mark"]),
    ("social relationship between victim and culprit", &["relationship", "related"]),
    ("weather", &["weather", "rain"]),
];

/// Whether the words of `phrase` start consecutive words of the input
///
/// "suspect" matches "suspects" but "cause" does not match "because".
fn mentions(words: &[&str], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split_whitespace().collect();
    !parts.is_empty()
        && words
            .windows(parts.len())
            .any(|window| window.iter().zip(&parts).all(|(w, p)| w.starts_with(p)))
}

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    items: Vec<String>,
}

impl KeywordClassifier {
    /// Classifier that recognises every item in the case file
    pub fn new(case: &CaseFile) -> Self {
        let mut items = case.means.names();
        items.extend(case.clues.names());
        // longest first so "knife and fork" wins over "knife"
        items.sort_by_key(|name| std::cmp::Reverse(name.len()));
        Self { items }
    }

    pub fn classify(&self, text: &str) -> NluResult {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        let matched: Vec<&str> = INTENT_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| mentions(&words, k)))
            .map(|(name, _)| *name)
            .collect();

        let confidence = if matched.len() == 1 { CLEAR } else { AMBIGUOUS };
        let intents: Vec<ScoredIntent> = matched
            .iter()
            .map(|name| ScoredIntent {
                name: name.to_string(),
                confidence_score: confidence,
            })
            .collect();

        NluResult {
            top_intent: matched.first().copied().unwrap_or("None").to_string(),
            intents,
            entities: self.entities(&lowered, &words),
        }
    }

    fn entities(&self, lowered: &str, words: &[&str]) -> Vec<ScoredEntity> {
        let mut found: Vec<(usize, String)> = Vec::new();

        if words.iter().any(|w| YES_WORDS.contains(w)) {
            found.push((0, AFFIRMATIVE.to_string()));
        } else if words.iter().any(|w| NO_WORDS.contains(w)) {
            found.push((0, NEGATIVE.to_string()));
        }

        for (word, value) in NUMBER_WORDS {
            if words.contains(&word) && !found.iter().any(|(_, v)| v == value) {
                found.push((1, value.to_string()));
            }
        }

        let mut claimed = lowered.to_string();
        for item in &self.items {
            let needle = item.to_lowercase();
            if let Some(pos) = claimed.find(&needle) {
                // blank the match out so shorter names cannot reuse it
                claimed.replace_range(pos..pos + needle.len(), &" ".repeat(needle.len()));
                found.push((2 + pos, item.clone()));
            }
        }

        found.sort_by_key(|(pos, _)| *pos);
        found
            .into_iter()
            .map(|(_, category)| ScoredEntity {
                category,
                confidence_score: CLEAR,
            })
            .collect()
    }
}
