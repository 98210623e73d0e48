//! Guess validation
//!
//! A guess is *valid* when some suspect could have used both items, which is
//! checked before the guess costs anything. Whether it is *correct* is a separate
//! question, answered against the hidden solution.

use serde::{Deserialize, Serialize};

use crate::puzzle::{Solution, Suspect};

/// Two named items offered as a solution, in the order they were heard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub first: String,
    pub second: String,
}

impl Guess {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn is_valid(&self, suspects: &[Suspect]) -> bool {
        is_valid_guess(&self.first, &self.second, suspects)
    }

    pub fn is_correct(&self, solution: &Solution) -> bool {
        is_correct_guess(&self.first, &self.second, solution)
    }
}

impl std::fmt::Display for Guess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} and {}", self.first, self.second)
    }
}

/// True iff one suspect owns one item as a means and the other as a clue
pub fn is_valid_guess(a: &str, b: &str, suspects: &[Suspect]) -> bool {
    suspects.iter().any(|s| {
        (s.owns_means(a) && s.owns_clue(b)) || (s.owns_means(b) && s.owns_clue(a))
    })
}

/// True iff the two items are exactly the solution pair, in either order
pub fn is_correct_guess(a: &str, b: &str, solution: &Solution) -> bool {
    (a == solution.means && b == solution.clue) || (a == solution.clue && b == solution.means)
}
