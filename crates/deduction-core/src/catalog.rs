//! Evidence catalogs
//!
//! Two fixed catalogs describe every item a scenario can draw from: the means of
//! murder and the circumstantial clues. Each item maps evidence categories to the
//! answer the partner gives when that category is asked about.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::{DeductionError, Result};

/// A question axis the player can ask about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    CauseOfDeath,
    TimeOfDeath,
    Motive,
    ClothesState,
    HintOnBodyPart,
    Relationship,
    Weather,
    /// Revealed at the start of every case, never requestable
    Location,
}

impl EvidenceCategory {
    /// Categories the player may request during the main loop, in offer order
    pub const REQUESTABLE: [EvidenceCategory; 7] = [
        EvidenceCategory::CauseOfDeath,
        EvidenceCategory::TimeOfDeath,
        EvidenceCategory::Motive,
        EvidenceCategory::ClothesState,
        EvidenceCategory::HintOnBodyPart,
        EvidenceCategory::Relationship,
        EvidenceCategory::Weather,
    ];

    /// Canonical label, shared with the NLU intent and entity names
    pub fn label(&self) -> &'static str {
        match self {
            EvidenceCategory::CauseOfDeath => "cause of death",
            EvidenceCategory::TimeOfDeath => "time of death",
            EvidenceCategory::Motive => "motive",
            EvidenceCategory::ClothesState => "state of the victim's clothes",
            EvidenceCategory::HintOnBodyPart => "hint on body part",
            EvidenceCategory::Relationship => "social relationship between victim and culprit",
            EvidenceCategory::Weather => "weather",
            EvidenceCategory::Location => "location",
        }
    }

    /// Parse a canonical label back into a category
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::REQUESTABLE
            .iter()
            .chain(std::iter::once(&EvidenceCategory::Location))
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .copied()
    }

    pub fn is_requestable(&self) -> bool {
        !matches!(self, EvidenceCategory::Location)
    }
}

impl std::fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which of the two catalogs an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Means,
    Clues,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Means => write!(f, "means"),
            CatalogKind::Clues => write!(f, "clues"),
        }
    }
}

/// A single means or clue item and the evidence it explains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    facts: BTreeMap<EvidenceCategory, String>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facts: BTreeMap::new(),
        }
    }

    pub fn with_fact(mut self, category: EvidenceCategory, answer: impl Into<String>) -> Self {
        self.facts.insert(category, answer.into());
        self
    }

    /// The item's self-reference: what a correct guess has to name
    pub fn solution(&self) -> &str {
        &self.name
    }

    pub fn answer(&self, category: EvidenceCategory) -> Option<&str> {
        self.facts.get(&category).map(String::as_str)
    }

    pub fn defines(&self, category: EvidenceCategory) -> bool {
        self.facts.contains_key(&category)
    }
}

/// Ordered collection of items of one kind
///
/// Declaration order is kept so that a seeded shuffle always yields the same
/// scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kind: CatalogKind,
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(kind: CatalogKind, items: Vec<Item>) -> Result<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.name.trim().is_empty() {
                return Err(DeductionError::InvalidCatalog(format!(
                    "{} catalog contains an item without a name",
                    kind
                )));
            }
            if !seen.insert(item.name.to_lowercase()) {
                return Err(DeductionError::InvalidCatalog(format!(
                    "duplicate {} item: {}",
                    kind, item.name
                )));
            }
            if kind == CatalogKind::Clues && !item.defines(EvidenceCategory::Location) {
                return Err(DeductionError::InvalidCatalog(format!(
                    "clue '{}' does not define a location",
                    item.name
                )));
            }
        }
        Ok(Self { kind, items })
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item names in declaration order
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Answer for `category` on the named item, if the item defines it
    pub fn answer(&self, name: &str, category: EvidenceCategory) -> Option<&str> {
        self.get(name).and_then(|item| item.answer(category))
    }

    /// The demo case file's means of murder
    pub fn builtin_means() -> Self {
        use EvidenceCategory::*;
        let items = vec![
            Item::new("scissors")
                .with_fact(CauseOfDeath, "loss of blood")
                .with_fact(HintOnBodyPart, "all over the body"),
            Item::new("chainsaw")
                .with_fact(CauseOfDeath, "loss of blood")
                .with_fact(HintOnBodyPart, "on the hand...which is on the table over there"),
            Item::new("ice skates")
                .with_fact(CauseOfDeath, "loss of blood")
                .with_fact(HintOnBodyPart, "almost looks like it could have been an accident, the way that throat was cut")
                .with_fact(Weather, "cold"),
            Item::new("knife and fork")
                .with_fact(CauseOfDeath, "loss of blood")
                .with_fact(Relationship, "very, very close. Especially now after the murder")
                .with_fact(HintOnBodyPart, "all over, especially the missing pieces"),
            Item::new("belt")
                .with_fact(CauseOfDeath, "suffocation")
                .with_fact(HintOnBodyPart, "marks around the neck"),
            Item::new("plastic bag")
                .with_fact(CauseOfDeath, "suffocation")
                .with_fact(HintOnBodyPart, "some piece of material seems stuck in the victim's mouth"),
            Item::new("drowning")
                .with_fact(CauseOfDeath, "suffocation")
                .with_fact(HintOnBodyPart, "the hair is a mess"),
            Item::new("scarf")
                .with_fact(CauseOfDeath, "suffocation")
                .with_fact(HintOnBodyPart, "marks around the neck")
                .with_fact(Weather, "cold"),
            Item::new("wine")
                .with_fact(CauseOfDeath, "poison or disease")
                .with_fact(Relationship, "they were close once, but only one of them wanted to rekindle this evening")
                .with_fact(Motive, "spurned love")
                .with_fact(HintOnBodyPart, "nothing, really, but we should wait for the autopsy"),
            Item::new("scorpion")
                .with_fact(CauseOfDeath, "poison or disease")
                .with_fact(Relationship, "one-sided, but the culprit finally got the victim's attention with a peculiar murder weapon")
                .with_fact(HintOnBodyPart, "just a small mark on the leg")
                .with_fact(Weather, "warm and humid"),
            Item::new("injection")
                .with_fact(CauseOfDeath, "poison or disease")
                .with_fact(HintOnBodyPart, "in the arm fold"),
            Item::new("starvation")
                .with_fact(CauseOfDeath, "poison or disease")
                .with_fact(Relationship, "clearly the culprit felt something strongly, if they wanted to drag it out like this")
                .with_fact(HintOnBodyPart, "body seems brittle"),
            Item::new("steel tube").with_fact(CauseOfDeath, "blunt trauma"),
            Item::new("trophy")
                .with_fact(CauseOfDeath, "blunt trauma")
                .with_fact(Relationship, "rivals")
                .with_fact(Motive, "jealousy"),
            Item::new("crutch")
                .with_fact(CauseOfDeath, "blunt trauma")
                .with_fact(Relationship, "strangers until an accident")
                .with_fact(Motive, "revenge")
                .with_fact(HintOnBodyPart, "a leg was broken"),
            Item::new("punch")
                .with_fact(CauseOfDeath, "blunt trauma")
                .with_fact(HintOnBodyPart, "some teeth are gone"),
        ];
        Self {
            kind: CatalogKind::Means,
            items,
        }
    }

    /// The demo case file's clues
    pub fn builtin_clues() -> Self {
        use EvidenceCategory::*;
        let items = vec![
            Item::new("take-out food")
                .with_fact(Location, "kitchen")
                .with_fact(Relationship, "they hang out quite often")
                .with_fact(TimeOfDeath, "evening")
                .with_fact(Weather, "pouring rain")
                .with_fact(ClothesState, "messy"),
            Item::new("book")
                .with_fact(Location, "school")
                .with_fact(Relationship, "classmates, perhaps?")
                .with_fact(TimeOfDeath, "afternoon")
                .with_fact(ClothesState, "tidy"),
            Item::new("underwear")
                .with_fact(Location, "bedroom")
                .with_fact(Relationship, "quite close, perhaps even romantically involved")
                .with_fact(TimeOfDeath, "evening")
                .with_fact(Motive, "spurned love")
                .with_fact(ClothesState, "naked"),
            Item::new("office supplies")
                .with_fact(Location, "office")
                .with_fact(Relationship, "one was the boss of the other")
                .with_fact(TimeOfDeath, "middle of the day")
                .with_fact(Motive, "that they had just had enough")
                .with_fact(Weather, "sunny, but the victim didn't get to enjoy it")
                .with_fact(ClothesState, "orderly"),
            Item::new("diary")
                .with_fact(Location, "bedroom")
                .with_fact(Relationship, "one-sided")
                .with_fact(TimeOfDeath, "just before bedtime, it seems")
                .with_fact(Motive, "unrequited love")
                .with_fact(ClothesState, "pyjamas"),
            Item::new("dust")
                .with_fact(Location, "storeroom")
                .with_fact(Relationship, "one where the victim would show up even to this secluded place")
                .with_fact(TimeOfDeath, "working hours")
                .with_fact(Weather, "dry")
                .with_fact(ClothesState, "messy"),
            Item::new("juice")
                .with_fact(Location, "kitchen")
                .with_fact(TimeOfDeath, "morning")
                .with_fact(ClothesState, "messy"),
            Item::new("snacks")
                .with_fact(Location, "kitchen")
                .with_fact(TimeOfDeath, "evening")
                .with_fact(Motive, "they were smacking too loud")
                .with_fact(ClothesState, "messy"),
            Item::new("dictionary")
                .with_fact(Location, "school")
                .with_fact(Relationship, "student and teacher")
                .with_fact(TimeOfDeath, "just before an exam, perhaps?")
                .with_fact(Motive, "frustration")
                // spelled for the synthesizer: "soleado"
                .with_fact(Weather, "sohl eh ah doh")
                .with_fact(ClothesState, "neat"),
            Item::new("toothpicks")
                .with_fact(Location, "restaurant")
                .with_fact(TimeOfDeath, "evening")
                .with_fact(Motive, "it's just so distracting, why can't they just get rid of it?"),
            Item::new("clothes hanger")
                .with_fact(Location, "bedroom")
                .with_fact(TimeOfDeath, "morning or evening")
                .with_fact(Motive, "fashionable jealousy")
                .with_fact(ClothesState, "very orderly"),
            Item::new("menu")
                .with_fact(Location, "restaurant")
                .with_fact(Relationship, "close enough for a date, it seems")
                .with_fact(TimeOfDeath, "evening")
                .with_fact(Motive, "that sitting across from each other, the reasons they broke up must have come flooding back")
                .with_fact(ClothesState, "fancy"),
            Item::new("coffee")
                .with_fact(Location, "kitchen")
                .with_fact(TimeOfDeath, "morning")
                .with_fact(Motive, "that they weren't a morning person")
                .with_fact(Weather, "too dark, too early")
                .with_fact(ClothesState, "stained"),
            Item::new("oil stain")
                .with_fact(Location, "storeroom")
                .with_fact(TimeOfDeath, "working hours")
                .with_fact(Motive, "victim messed up the fancy overalls")
                .with_fact(ClothesState, "stained"),
            Item::new("electronic speaker")
                .with_fact(Location, "living room")
                .with_fact(TimeOfDeath, "late evening")
                .with_fact(Relationship, "neighbours")
                .with_fact(Motive, "they took matters into their own hands after the housing association did not take the appropriate steps")
                .with_fact(Weather, "thunderous, say witnesses, but we're not sure this checks out")
                .with_fact(ClothesState, "casual"),
            Item::new("jewelry")
                .with_fact(Location, "bedroom")
                .with_fact(TimeOfDeath, "just as they were heading out to an event")
                .with_fact(Motive, "that they might've wanted something gifted back")
                .with_fact(ClothesState, "elegant"),
        ];
        Self {
            kind: CatalogKind::Clues,
            items,
        }
    }
}

/// On-disk representation of one item in a case file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemRecord {
    name: String,
    #[serde(default)]
    facts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CaseFileRecord {
    #[serde(default)]
    means: Vec<ItemRecord>,
    #[serde(default)]
    clues: Vec<ItemRecord>,
}

/// A matched pair of means and clue catalogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFile {
    pub means: Catalog,
    pub clues: Catalog,
}

impl Default for CaseFile {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CaseFile {
    /// The demo case file shipped with the game
    pub fn builtin() -> Self {
        Self {
            means: Catalog::builtin_means(),
            clues: Catalog::builtin_clues(),
        }
    }

    /// Parse a case file from TOML
    ///
    /// ```toml
    /// [[means]]
    /// name = "rope"
    /// facts = { "cause of death" = "suffocation" }
    ///
    /// [[clues]]
    /// name = "ticket"
    /// facts = { location = "station", "time of death" = "dawn" }
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let record: CaseFileRecord = toml::from_str(content)?;
        let means = Catalog::new(CatalogKind::Means, convert_items(record.means)?)?;
        let clues = Catalog::new(CatalogKind::Clues, convert_items(record.clues)?)?;

        let means_names: HashSet<String> = means
            .names()
            .into_iter()
            .map(|n| n.to_lowercase())
            .collect();
        if let Some(clash) = clues
            .names()
            .into_iter()
            .find(|n| means_names.contains(&n.to_lowercase()))
        {
            return Err(DeductionError::InvalidCatalog(format!(
                "'{}' appears as both a means and a clue",
                clash
            )));
        }

        Ok(Self { means, clues })
    }

    /// Load a case file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn catalog(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Means => &self.means,
            CatalogKind::Clues => &self.clues,
        }
    }
}

fn convert_items(records: Vec<ItemRecord>) -> Result<Vec<Item>> {
    records
        .into_iter()
        .map(|record| {
            let mut item = Item::new(record.name);
            for (label, answer) in record.facts {
                let category = EvidenceCategory::from_label(&label).ok_or_else(|| {
                    DeductionError::InvalidCatalog(format!(
                        "unknown evidence category '{}' on '{}'",
                        label, item.name
                    ))
                })?;
                item = item.with_fact(category, answer);
            }
            Ok(item)
        })
        .collect()
}
