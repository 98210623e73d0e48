//! Puzzle generation
//!
//! Both catalogs are shuffled independently and cut into equal chunks, one chunk
//! of means and one chunk of clues per suspect. The hidden solution is then drawn
//! from a single suspect, so a consistent answer always exists.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::{DeductionError, Result};

/// Suspect count and per-suspect list size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Difficulty {
    pub suspects: usize,
    pub size: usize,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            suspects: 2,
            size: 2,
        }
    }
}

impl Difficulty {
    /// Values accepted for both parameters
    pub const ALLOWED: [usize; 3] = [2, 3, 4];

    pub fn new(suspects: usize, size: usize) -> Result<Self> {
        let difficulty = Self { suspects, size };
        difficulty.validate()?;
        Ok(difficulty)
    }

    pub fn validate(&self) -> Result<()> {
        if Self::ALLOWED.contains(&self.suspects) && Self::ALLOWED.contains(&self.size) {
            Ok(())
        } else {
            Err(DeductionError::InvalidDifficulty {
                suspects: self.suspects,
                size: self.size,
            })
        }
    }

    /// Items needed from each catalog
    pub fn items_needed(&self) -> usize {
        self.suspects * self.size
    }
}

/// One candidate culprit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suspect {
    pub means: Vec<String>,
    pub clues: Vec<String>,
}

impl Suspect {
    pub fn owns_means(&self, item: &str) -> bool {
        self.means.iter().any(|m| m == item)
    }

    pub fn owns_clue(&self, item: &str) -> bool {
        self.clues.iter().any(|c| c == item)
    }
}

/// The hidden (means, clue) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub means: String,
    pub clue: String,
}

/// A freshly generated case: suspects plus the hidden solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub suspects: Vec<Suspect>,
    pub solution: Solution,
}

impl Scenario {
    /// Index of the suspect owning both solution items
    pub fn culprit(&self) -> Option<usize> {
        self.suspects
            .iter()
            .position(|s| s.owns_means(&self.solution.means) && s.owns_clue(&self.solution.clue))
    }
}

/// Generate suspects and a solution from the two catalogs
pub fn generate_scenario<R: Rng + ?Sized>(
    means: &Catalog,
    clues: &Catalog,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Scenario> {
    difficulty.validate()?;
    let needed = difficulty.items_needed();
    let available = means.len().min(clues.len());
    if needed > available {
        return Err(DeductionError::CatalogTooSmall { needed, available });
    }

    let mut means_pool = means.names();
    let mut clue_pool = clues.names();
    means_pool.shuffle(rng);
    clue_pool.shuffle(rng);

    let suspects = partition_suspects(&means_pool, &clue_pool, difficulty);
    let solution = choose_solution(&suspects, rng);

    tracing::debug!(
        target: "deduction_core::scenario",
        suspects = ?suspects,
        solution = ?solution,
        "Scenario generated"
    );

    Ok(Scenario { suspects, solution })
}

/// Cut already shuffled pools into contiguous, non-overlapping suspect chunks
pub fn partition_suspects(
    means: &[String],
    clues: &[String],
    difficulty: Difficulty,
) -> Vec<Suspect> {
    means
        .chunks(difficulty.size)
        .zip(clues.chunks(difficulty.size))
        .take(difficulty.suspects)
        .map(|(m, c)| Suspect {
            means: m.to_vec(),
            clues: c.to_vec(),
        })
        .collect()
}

/// Pick a culprit uniformly, then one means and one clue from that culprit
///
/// `suspects` must be non-empty and every suspect must own at least one item of
/// each kind, which [`partition_suspects`] guarantees for a valid difficulty.
pub fn choose_solution<R: Rng + ?Sized>(suspects: &[Suspect], rng: &mut R) -> Solution {
    let culprit = &suspects[rng.gen_range(0..suspects.len())];
    let means = culprit.means[rng.gen_range(0..culprit.means.len())].clone();
    let clue = culprit.clues[rng.gen_range(0..culprit.clues.len())].clone();
    Solution { means, clue }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_difficulty_validation() {
        assert!(Difficulty::new(2, 2).is_ok());
        assert!(Difficulty::new(4, 3).is_ok());
        assert!(matches!(
            Difficulty::new(5, 2),
            Err(DeductionError::InvalidDifficulty { suspects: 5, size: 2 })
        ));
        assert!(Difficulty::new(2, 1).is_err());
        assert_eq!(Difficulty::default(), Difficulty { suspects: 2, size: 2 });
    }

    #[test]
    fn test_partition_matches_shuffled_order() {
        let means = names(&["A", "B", "C", "D"]);
        let clues = names(&["E", "F", "G", "H"]);
        let suspects = partition_suspects(&means, &clues, Difficulty::default());

        assert_eq!(
            suspects,
            vec![
                Suspect { means: names(&["A", "B"]), clues: names(&["E", "F"]) },
                Suspect { means: names(&["C", "D"]), clues: names(&["G", "H"]) },
            ]
        );
    }

    #[test]
    fn test_generated_scenario_is_consistent() {
        let case = crate::catalog::CaseFile::builtin();
        let mut rng = StdRng::seed_from_u64(7);

        for suspects in Difficulty::ALLOWED {
            for size in Difficulty::ALLOWED {
                let difficulty = Difficulty::new(suspects, size).unwrap();
                let scenario =
                    generate_scenario(&case.means, &case.clues, difficulty, &mut rng).unwrap();

                assert_eq!(scenario.suspects.len(), suspects);
                assert!(scenario.culprit().is_some());

                let mut seen = HashSet::new();
                for suspect in &scenario.suspects {
                    assert_eq!(suspect.means.len(), size);
                    assert_eq!(suspect.clues.len(), size);
                    for item in suspect.means.iter().chain(&suspect.clues) {
                        assert!(seen.insert(item.clone()), "{} dealt twice", item);
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_scenario() {
        let case = crate::catalog::CaseFile::builtin();
        let a = generate_scenario(
            &case.means,
            &case.clues,
            Difficulty::new(3, 3).unwrap(),
            &mut StdRng::seed_from_u64(42),
        )
        .unwrap();
        let b = generate_scenario(
            &case.means,
            &case.clues,
            Difficulty::new(3, 3).unwrap(),
            &mut StdRng::seed_from_u64(42),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_catalog_too_small() {
        let case = crate::catalog::CaseFile::from_toml_str(
            r#"
            [[means]]
            name = "rope"
            [[means]]
            name = "vase"
            [[means]]
            name = "pan"

            [[clues]]
            name = "ticket"
            facts = { location = "station" }
            "#,
        )
        .unwrap();
        let err = generate_scenario(
            &case.means,
            &case.clues,
            Difficulty::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DeductionError::CatalogTooSmall { needed: 4, available: 1 }
        ));
    }
}
