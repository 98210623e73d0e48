//! Evidence resolution
//!
//! Every category has a primary catalog. The primary solution item answers if it
//! can; otherwise the other solution item gets a chance; otherwise the partner
//! shrugs. Because one item can mask the other, the same category reveals
//! different things from case to case.

use crate::catalog::{Catalog, CatalogKind, EvidenceCategory};
use crate::puzzle::Solution;

/// Answer given when neither solution item defines the category
pub const NOT_RELEVANT: &str = "probably not that relevant";

/// Categories answered by the means item first
pub const MEANS_PRIORITY: [EvidenceCategory; 2] = [
    EvidenceCategory::CauseOfDeath,
    EvidenceCategory::HintOnBodyPart,
];

/// Catalog consulted first for `category`
pub fn primary_catalog(category: EvidenceCategory) -> CatalogKind {
    if MEANS_PRIORITY.contains(&category) {
        CatalogKind::Means
    } else {
        CatalogKind::Clues
    }
}

/// Resolve a requested category against the session's solution
pub fn resolve(
    category: EvidenceCategory,
    solution: &Solution,
    means: &Catalog,
    clues: &Catalog,
) -> String {
    let means_lookup = || means.answer(&solution.means, category);
    let clue_lookup = || clues.answer(&solution.clue, category);

    let answer = match primary_catalog(category) {
        CatalogKind::Means => means_lookup().or_else(clue_lookup),
        CatalogKind::Clues => clue_lookup().or_else(means_lookup),
    };

    answer.unwrap_or(NOT_RELEVANT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CaseFile, Item};

    fn case() -> CaseFile {
        use EvidenceCategory::*;
        let means = Catalog::new(
            CatalogKind::Means,
            vec![
                Item::new("wine")
                    .with_fact(CauseOfDeath, "poison or disease")
                    .with_fact(Motive, "spurned love"),
                Item::new("belt").with_fact(CauseOfDeath, "suffocation"),
            ],
        )
        .unwrap();
        let clues = Catalog::new(
            CatalogKind::Clues,
            vec![
                Item::new("diary")
                    .with_fact(Location, "bedroom")
                    .with_fact(Motive, "unrequited love")
                    .with_fact(CauseOfDeath, "a broken heart"),
                Item::new("juice").with_fact(Location, "kitchen"),
            ],
        )
        .unwrap();
        CaseFile { means, clues }
    }

    fn solution(means: &str, clue: &str) -> Solution {
        Solution {
            means: means.into(),
            clue: clue.into(),
        }
    }

    #[test]
    fn test_priority_partition() {
        assert_eq!(primary_catalog(EvidenceCategory::CauseOfDeath), CatalogKind::Means);
        assert_eq!(primary_catalog(EvidenceCategory::HintOnBodyPart), CatalogKind::Means);
        assert_eq!(primary_catalog(EvidenceCategory::Motive), CatalogKind::Clues);
        assert_eq!(primary_catalog(EvidenceCategory::Weather), CatalogKind::Clues);
    }

    #[test]
    fn test_means_priority_skips_clue_catalog() {
        let case = case();
        let answer = resolve(
            EvidenceCategory::CauseOfDeath,
            &solution("wine", "diary"),
            &case.means,
            &case.clues,
        );
        assert_eq!(answer, "poison or disease");
    }

    #[test]
    fn test_clue_priority_masks_means() {
        let case = case();
        let answer = resolve(
            EvidenceCategory::Motive,
            &solution("wine", "diary"),
            &case.means,
            &case.clues,
        );
        assert_eq!(answer, "unrequited love");
    }

    #[test]
    fn test_falls_back_to_secondary() {
        let case = case();
        let answer = resolve(
            EvidenceCategory::Motive,
            &solution("wine", "juice"),
            &case.means,
            &case.clues,
        );
        assert_eq!(answer, "spurned love");
    }

    #[test]
    fn test_filler_when_neither_defines() {
        let case = case();
        let answer = resolve(
            EvidenceCategory::Motive,
            &solution("belt", "juice"),
            &case.means,
            &case.clues,
        );
        assert_eq!(answer, NOT_RELEVANT);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let case = CaseFile::builtin();
        let sol = solution("scarf", "dictionary");
        for category in EvidenceCategory::REQUESTABLE {
            let first = resolve(category, &sol, &case.means, &case.clues);
            let second = resolve(category, &sol, &case.means, &case.clues);
            assert_eq!(first, second);
        }
        assert_eq!(
            resolve(EvidenceCategory::Weather, &sol, &case.means, &case.clues),
            "sohl eh ah doh"
        );
    }
}
