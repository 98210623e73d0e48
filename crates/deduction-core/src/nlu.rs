//! NLU output contract
//!
//! The classifier itself lives outside the engine. What it hands back is a top
//! intent, a ranked list of intents and a ranked list of entities, each with a
//! confidence score in `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::catalog::EvidenceCategory;

/// Intent name for a request to attempt a solution
pub const SOLVE_INTENT: &str = "solve the case";
/// Intent name for the suspects recap
pub const SUSPECTS_INTENT: &str = "asking about suspects";
/// Intent name for the known-evidence recap
pub const KNOWN_EVIDENCE_INTENT: &str = "asking for evidence";
/// Intent name for the midgame instructions
pub const INSTRUCTIONS_INTENT: &str = "asking for instructions";

/// Entity category for a "yes" type answer
pub const AFFIRMATIVE: &str = "affirmative";
/// Entity category for a "no" type answer
pub const NEGATIVE: &str = "negative";

/// One ranked intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredIntent {
    #[serde(alias = "category")]
    pub name: String,
    pub confidence_score: f64,
}

/// One ranked entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredEntity {
    pub category: String,
    pub confidence_score: f64,
}

/// Classifier output for one recognised utterance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NluResult {
    pub top_intent: String,
    #[serde(default)]
    pub intents: Vec<ScoredIntent>,
    #[serde(default)]
    pub entities: Vec<ScoredEntity>,
}

impl NluResult {
    /// Result carrying a single intent at the given confidence
    pub fn intent(name: impl Into<String>, confidence: f64) -> Self {
        let name = name.into();
        Self {
            top_intent: name.clone(),
            intents: vec![ScoredIntent {
                name,
                confidence_score: confidence,
            }],
            entities: Vec::new(),
        }
    }

    /// Append an entity
    pub fn with_entity(mut self, category: impl Into<String>, confidence: f64) -> Self {
        self.entities.push(ScoredEntity {
            category: category.into(),
            confidence_score: confidence,
        });
        self
    }

    /// Confidence of the best-ranked intent, if any intent was found
    pub fn intent_confidence(&self) -> Option<f64> {
        self.intents.first().map(|i| i.confidence_score)
    }

    /// Confidence of the first entity, if any entity was found
    pub fn entity_confidence(&self) -> Option<f64> {
        self.entities.first().map(|e| e.confidence_score)
    }

    pub fn has_intents(&self) -> bool {
        !self.intents.is_empty()
    }

    /// First entity category, if any
    pub fn first_entity(&self) -> Option<&str> {
        self.entities.first().map(|e| e.category.as_str())
    }

    /// The first two entities as a pair, with their summed confidence
    pub fn entity_pair(&self) -> Option<((&str, &str), f64)> {
        match self.entities.as_slice() {
            [a, b, ..] => Some((
                (a.category.as_str(), b.category.as_str()),
                a.confidence_score + b.confidence_score,
            )),
            _ => None,
        }
    }

    /// Parsed top intent
    pub fn parsed_intent(&self) -> Option<Intent> {
        Intent::parse(&self.top_intent)
    }

    /// Yes/no reading of the first entity
    pub fn yes_no(&self) -> Option<bool> {
        match self.first_entity()? {
            AFFIRMATIVE => Some(true),
            NEGATIVE => Some(false),
            _ => None,
        }
    }
}

/// The closed set of intents the engine acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Ask about one evidence category
    Evidence(EvidenceCategory),
    SolveCase,
    AskSuspects,
    AskKnownEvidence,
    AskInstructions,
}

impl Intent {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            SOLVE_INTENT => Some(Intent::SolveCase),
            SUSPECTS_INTENT => Some(Intent::AskSuspects),
            KNOWN_EVIDENCE_INTENT => Some(Intent::AskKnownEvidence),
            INSTRUCTIONS_INTENT => Some(Intent::AskInstructions),
            other => EvidenceCategory::from_label(other)
                .filter(EvidenceCategory::is_requestable)
                .map(Intent::Evidence),
        }
    }

    /// Wire name of the intent
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Evidence(category) => category.label(),
            Intent::SolveCase => SOLVE_INTENT,
            Intent::AskSuspects => SUSPECTS_INTENT,
            Intent::AskKnownEvidence => KNOWN_EVIDENCE_INTENT,
            Intent::AskInstructions => INSTRUCTIONS_INTENT,
        }
    }

    /// Side-queries never consume a query or a guess
    pub fn is_side_query(&self) -> bool {
        matches!(
            self,
            Intent::AskSuspects | Intent::AskKnownEvidence | Intent::AskInstructions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_parsing() {
        assert_eq!(
            Intent::parse("cause of death"),
            Some(Intent::Evidence(EvidenceCategory::CauseOfDeath))
        );
        assert_eq!(Intent::parse("solve the case"), Some(Intent::SolveCase));
        assert_eq!(Intent::parse("asking for evidence"), Some(Intent::AskKnownEvidence));
        assert_eq!(Intent::parse("location"), None);
        assert_eq!(Intent::parse("order pizza"), None);
        assert!(Intent::AskSuspects.is_side_query());
        assert!(!Intent::SolveCase.is_side_query());
    }

    #[test]
    fn test_intent_names_round_trip() {
        let intents = [
            Intent::SolveCase,
            Intent::AskSuspects,
            Intent::AskKnownEvidence,
            Intent::AskInstructions,
            Intent::Evidence(EvidenceCategory::Weather),
        ];
        for intent in intents {
            assert_eq!(Intent::parse(intent.name()), Some(intent));
        }
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = r#"{
            "topIntent": "motive",
            "intents": [{"category": "motive", "confidenceScore": 0.91}],
            "entities": [{"category": "belt", "confidenceScore": 0.8}]
        }"#;
        let nlu: NluResult = serde_json::from_str(json).unwrap();
        assert_eq!(nlu.intent_confidence(), Some(0.91));
        assert_eq!(nlu.first_entity(), Some("belt"));
        assert_eq!(
            nlu.parsed_intent(),
            Some(Intent::Evidence(EvidenceCategory::Motive))
        );
    }

    #[test]
    fn test_yes_no_and_pairs() {
        let yes = NluResult::intent("none", 0.9).with_entity(AFFIRMATIVE, 0.95);
        assert_eq!(yes.yes_no(), Some(true));
        let no = NluResult::intent("none", 0.9).with_entity(NEGATIVE, 0.95);
        assert_eq!(no.yes_no(), Some(false));
        assert_eq!(NluResult::default().yes_no(), None);

        let guess = NluResult::intent(SOLVE_INTENT, 0.9)
            .with_entity("belt", 0.7)
            .with_entity("diary", 0.6);
        let ((a, b), combined) = guess.entity_pair().unwrap();
        assert_eq!((a, b), ("belt", "diary"));
        assert!((combined - 1.3).abs() < 1e-9);
        assert!(yes.entity_pair().is_none());
    }
}
