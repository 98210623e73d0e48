//! Query/guess bounds and final scoring

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// Bounds that shape a game's length
///
/// The best score is `max_queries + max_solves`, so the defaults give the
/// usual `6 - queries - misses`. Raising either limit raises the best score
/// with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameLimits {
    /// Evidence requests before the solve phase is forced
    pub max_queries: u32,
    /// Guesses before the case goes cold
    pub max_solves: u32,
    /// Unclear confirmation answers tolerated before the confirmation is dropped
    pub max_confirmation_retries: u32,
}

impl Default for GameLimits {
    fn default() -> Self {
        Self {
            max_queries: 4,
            max_solves: 2,
            max_confirmation_retries: 1,
        }
    }
}

impl GameLimits {
    /// Best achievable score: no evidence asked, first guess right
    pub fn max_score(&self) -> u32 {
        self.max_queries + self.max_solves
    }

    /// Score for a correct guess after `queries` requests and `solves` misses
    pub fn score(&self, queries: u32, solves: u32) -> u32 {
        self.max_score().saturating_sub(queries + solves)
    }

    pub fn queries_exhausted(&self, queries: u32) -> bool {
        queries >= self.max_queries
    }

    pub fn solves_exhausted(&self, solves: u32) -> bool {
        solves >= self.max_solves
    }
}

/// How a case ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Solved { score: u32 },
    CaseCold,
}

impl Outcome {
    pub fn score(&self) -> u32 {
        match self {
            Outcome::Solved { score } => *score,
            Outcome::CaseCold => 0,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Solved { .. })
    }
}

/// Summary handed back to the host once a session reaches its final state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub outcome: Outcome,
    pub queries: u32,
    pub solves: u32,
    pub knowledge: Vec<String>,
}

impl GameReport {
    pub fn score(&self) -> u32 {
        self.outcome.score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        let limits = GameLimits::default();
        assert_eq!(limits.max_score(), 6);
        assert_eq!(limits.score(0, 0), 6);
        assert_eq!(limits.score(4, 1), 1);
        assert_eq!(limits.score(2, 1), 3);
    }

    #[test]
    fn test_custom_limits_move_the_best_score() {
        let limits = GameLimits {
            max_queries: 6,
            max_solves: 3,
            ..GameLimits::default()
        };
        assert_eq!(limits.max_score(), 9);
        assert_eq!(limits.score(6, 2), 1);
        assert_eq!(limits.score(0, 0), 9);
    }

    #[test]
    fn test_bounds() {
        let limits = GameLimits::default();
        assert!(!limits.queries_exhausted(3));
        assert!(limits.queries_exhausted(4));
        assert!(!limits.solves_exhausted(1));
        assert!(limits.solves_exhausted(2));
    }

    #[test]
    fn test_outcome_score() {
        assert_eq!(Outcome::Solved { score: 4 }.score(), 4);
        assert_eq!(Outcome::CaseCold.score(), 0);
        assert!(!Outcome::CaseCold.is_win());
    }
}
