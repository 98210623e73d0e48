//! Low-confidence confirmation
//!
//! Whenever a turn produces a result the engine does not trust, the best guess
//! at what the player meant is parked in a [`ConfirmationRequest`] and put to
//! the player as a yes/no question. The request itself is context free: the
//! controller decides where a confirmed action leads and where a declined one
//! resumes.

use serde::{Deserialize, Serialize};

use crate::catalog::EvidenceCategory;
use crate::guess::Guess;
use crate::nlu::{Intent, NluResult};

/// What a confirmed request will do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum PendingAction {
    DeliverEvidence(EvidenceCategory),
    ShowSuspects,
    ShowKnown,
    ShowInstructions,
    SolveCase,
    ResolveGuess(Guess),
}

impl PendingAction {
    /// Action an intent would trigger once confirmed
    pub fn from_intent(intent: Intent) -> Self {
        match intent {
            Intent::Evidence(category) => PendingAction::DeliverEvidence(category),
            Intent::SolveCase => PendingAction::SolveCase,
            Intent::AskSuspects => PendingAction::ShowSuspects,
            Intent::AskKnownEvidence => PendingAction::ShowKnown,
            Intent::AskInstructions => PendingAction::ShowInstructions,
        }
    }

    /// Yes/no question put to the player
    pub fn question(&self) -> String {
        use EvidenceCategory::*;
        match self {
            PendingAction::DeliverEvidence(category) => match category {
                CauseOfDeath => "Are you asking about what caused the death?".to_string(),
                TimeOfDeath => "Are you asking about when the crime occurred?".to_string(),
                Motive => "Are you asking about the motive of the killer?".to_string(),
                ClothesState => "Are you asking about the state of the victim's clothes?".to_string(),
                HintOnBodyPart => {
                    "Are you asking if there was some hint on a specific body part?".to_string()
                }
                Relationship => {
                    "Are you asking what relationship might exist between those involved?".to_string()
                }
                Weather => "Are you asking what the weather was like at the time of the crime?".to_string(),
                Location => "Are you asking where the crime took place?".to_string(),
            },
            PendingAction::ShowSuspects => {
                "Would you like to know what clues and means are tied to each suspect?".to_string()
            }
            PendingAction::ShowKnown => {
                "Are you trying to hear what evidence we have already confirmed?".to_string()
            }
            PendingAction::ShowInstructions => {
                "Would you like me to summarise the game instructions?".to_string()
            }
            PendingAction::SolveCase => "Would you like to try to solve the case?".to_string(),
            PendingAction::ResolveGuess(guess) => format!(
                "Are you trying to solve the case with the following solution: {}?",
                guess
            ),
        }
    }
}

/// How one yes/no answer moved the request along
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStep {
    /// The player said yes
    Confirmed(PendingAction),
    /// The player said no; the transcript that was misheard
    Declined { transcript: String },
    /// No usable answer yet; ask again
    Retry,
    /// Too many unusable answers; drop the request
    Exhausted,
}

/// An unresolved low-confidence interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub action: PendingAction,
    pub transcript: String,
    pub retry_count: u32,
}

impl ConfirmationRequest {
    pub fn new(action: PendingAction, transcript: impl Into<String>) -> Self {
        Self {
            action,
            transcript: transcript.into(),
            retry_count: 0,
        }
    }

    pub fn question(&self) -> String {
        self.action.question()
    }

    /// Interpret the player's answer
    ///
    /// Only the first entity is considered. Anything that is neither an
    /// affirmative nor a negative counts as a failed attempt; the request is
    /// exhausted once the failures exceed `max_retries`.
    pub fn answer(&mut self, reply: &NluResult, max_retries: u32) -> ConfirmationStep {
        match reply.yes_no() {
            Some(true) => ConfirmationStep::Confirmed(self.action.clone()),
            Some(false) => ConfirmationStep::Declined {
                transcript: self.transcript.clone(),
            },
            None => {
                self.retry_count += 1;
                if self.retry_count > max_retries {
                    ConfirmationStep::Exhausted
                } else {
                    ConfirmationStep::Retry
                }
            }
        }
    }
}
