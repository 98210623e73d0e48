//! Session state for one playthrough
//!
//! The session is created once the difficulty is fixed and a scenario has been
//! generated. It is owned and mutated by the turn controller only.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::catalog::{CaseFile, EvidenceCategory};
use crate::guess::Guess;
use crate::puzzle::{Difficulty, Scenario, Solution, Suspect};
use crate::resolver;

/// Unique session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(format!("session:{}", Uuid::new_v4()))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Evidence handed to the player for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub category: EvidenceCategory,
    pub answer: String,
}

/// Mutable game state
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    difficulty: Difficulty,
    suspects: Vec<Suspect>,
    solution: Solution,
    remaining: BTreeSet<EvidenceCategory>,
    knowledge: Vec<String>,
    query_count: u32,
    solve_count: u32,
    pending_guess: Option<Guess>,
}

impl Session {
    /// Build a session from a generated scenario
    ///
    /// The crime-scene location of the solution clue is the first known fact.
    pub fn new(scenario: Scenario, difficulty: Difficulty, case: &CaseFile) -> Self {
        let location = case
            .clues
            .answer(&scenario.solution.clue, EvidenceCategory::Location)
            .unwrap_or(resolver::NOT_RELEVANT)
            .to_string();

        let session = Self {
            id: SessionId::new(),
            created_at: Utc::now(),
            difficulty,
            suspects: scenario.suspects,
            solution: scenario.solution,
            remaining: EvidenceCategory::REQUESTABLE.into_iter().collect(),
            knowledge: vec![format!("{} was {}", EvidenceCategory::Location, location)],
            query_count: 0,
            solve_count: 0,
            pending_guess: None,
        };

        tracing::info!("Session created: {} at {}", session.id, session.created_at);
        session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.suspects
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn query_count(&self) -> u32 {
        self.query_count
    }

    pub fn solve_count(&self) -> u32 {
        self.solve_count
    }

    pub fn knowledge(&self) -> &[String] {
        &self.knowledge
    }

    pub fn pending_guess(&self) -> Option<&Guess> {
        self.pending_guess.as_ref()
    }

    /// Location revealed at the start of the case
    pub fn crime_scene(&self) -> Option<&str> {
        self.knowledge
            .first()
            .and_then(|fact| fact.strip_prefix("location was "))
    }

    pub fn is_available(&self, category: EvidenceCategory) -> bool {
        self.remaining.contains(&category)
    }

    /// Categories not asked about yet, in stable order
    pub fn remaining_evidence(&self) -> Vec<EvidenceCategory> {
        self.remaining.iter().copied().collect()
    }

    /// Up to `count` distinct remaining categories, picked at random
    pub fn suggest_evidence<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Vec<EvidenceCategory> {
        let pool = self.remaining_evidence();
        pool.choose_multiple(rng, count).copied().collect()
    }

    /// Resolve and hand over one category
    ///
    /// Returns `None` if the category was already asked about. A filler answer
    /// still spends the query and the category.
    pub fn deliver_evidence(
        &mut self,
        category: EvidenceCategory,
        case: &CaseFile,
    ) -> Option<Delivery> {
        if !self.remaining.remove(&category) {
            return None;
        }

        let answer = resolver::resolve(category, &self.solution, &case.means, &case.clues);
        self.knowledge.push(format!("{} was {}", category, answer));
        self.query_count += 1;

        tracing::debug!(
            session = %self.id,
            category = %category,
            queries = self.query_count,
            "Evidence delivered"
        );

        Some(Delivery { category, answer })
    }

    pub fn store_guess(&mut self, guess: Guess) {
        self.pending_guess = Some(guess);
    }

    pub fn clear_guess(&mut self) {
        self.pending_guess = None;
    }

    pub fn is_valid_guess(&self, guess: &Guess) -> bool {
        guess.is_valid(&self.suspects)
    }

    pub fn is_correct_guess(&self, guess: &Guess) -> bool {
        guess.is_correct(&self.solution)
    }

    /// Count a wrong guess, returning the new total
    pub fn record_miss(&mut self) -> u32 {
        self.solve_count += 1;
        self.solve_count
    }
}
