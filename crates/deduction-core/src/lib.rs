//! Deduction Core - Dialogue engine for a voice-driven murder mystery
//!
//! The player talks to a detective partner who is at the crime scene. Each
//! suspect is tied to a few possible means of murder and a few incriminating
//! clues; exactly one means and one clue from the same suspect are the hidden
//! solution. The player asks about evidence, which the partner answers from the
//! solution items, and then names a means and a clue.
//!
//! # Architecture
//!
//! 1. **Catalogs** (`catalog`): the means and clue items with their facts
//! 2. **Puzzle Generator** (`puzzle`): suspects and a consistent hidden solution
//! 3. **Evidence Resolver** (`resolver`): answers one evidence category
//! 4. **Guess Validator** (`guess`): valid vs. correct guesses
//! 5. **Confirmation** (`confirmation`): yes/no checks for low-confidence turns
//! 6. **Turn Controller** (`controller`): setup, evidence loop, solve loop
//!
//! Speech recognition, synthesis and intent classification stay behind the
//! [`VoiceChannel`] trait.
//!
//! # Quick Start
//!
//! ```
//! use deduction_core::{generate_scenario, CaseFile, Difficulty, Guess};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let case = CaseFile::builtin();
//! let mut rng = StdRng::seed_from_u64(7);
//! let scenario = generate_scenario(&case.means, &case.clues, Difficulty::default(), &mut rng).unwrap();
//!
//! let answer = Guess::new(scenario.solution.means.clone(), scenario.solution.clue.clone());
//! assert!(answer.is_valid(&scenario.suspects));
//! assert!(answer.is_correct(&scenario.solution));
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod catalog;
pub mod config;
pub mod confirmation;
pub mod controller;
pub mod error;
pub mod guess;
pub mod nlu;
pub mod prompts;
pub mod puzzle;
pub mod resolver;
pub mod scoring;
pub mod session;
pub mod voice;

pub use catalog::{CaseFile, Catalog, CatalogKind, EvidenceCategory, Item};
pub use config::{ConfidenceThresholds, EngineConfig, SetupSettings, VoiceSettings};
pub use confirmation::{ConfirmationRequest, ConfirmationStep, PendingAction};
pub use controller::{DialogueController, Region, TurnSignal};
pub use error::{DeductionError, Result};
pub use guess::{is_correct_guess, is_valid_guess, Guess};
pub use nlu::{Intent, NluResult, ScoredEntity, ScoredIntent};
pub use puzzle::{generate_scenario, Difficulty, Scenario, Solution, Suspect};
pub use resolver::resolve;
pub use scoring::{GameLimits, GameReport, Outcome};
pub use session::{Session, SessionId};
pub use voice::{Heard, ScriptedVoice, VoiceChannel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
