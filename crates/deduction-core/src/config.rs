//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::puzzle::Difficulty;
use crate::scoring::GameLimits;
use crate::{DeductionError, Result};

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Voice collaborator settings
    pub voice: VoiceSettings,

    /// NLU confidence thresholds
    pub thresholds: ConfidenceThresholds,

    /// Query, guess and confirmation bounds
    pub limits: GameLimits,

    /// Setup dialogue behaviour
    pub setup: SetupSettings,

    /// Difficulty used when the player keeps the defaults
    pub difficulty: Difficulty,

    /// Seed for the puzzle and prompt randomness
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            voice: VoiceSettings::default(),
            thresholds: ConfidenceThresholds::default(),
            limits: GameLimits::default(),
            setup: SetupSettings::default(),
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_no_input_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.voice.no_input_timeout_ms = timeout_ms;
        self
    }

    /// Skip the instructions and settings questions
    pub fn without_setup_questions(mut self) -> Self {
        self.setup.offer_instructions = false;
        self.setup.offer_settings = false;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [("intent", t.intent), ("entity", t.entity)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DeductionError::InvalidConfig(format!(
                    "{} threshold must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=2.0).contains(&t.guess_combined) {
            return Err(DeductionError::InvalidConfig(format!(
                "combined guess threshold must be in [0, 2], got {}",
                t.guess_combined
            )));
        }
        if self.limits.max_queries == 0 || self.limits.max_solves == 0 {
            return Err(DeductionError::InvalidConfig(
                "query and guess limits must be at least 1".to_string(),
            ));
        }
        if self.setup.max_attempts == Some(0) {
            return Err(DeductionError::InvalidConfig(
                "setup max_attempts must be at least 1 when set".to_string(),
            ));
        }
        self.difficulty.validate()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Settings forwarded to the speech recognition/synthesis collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Silence before a listen turn reports no input
    pub no_input_timeout_ms: u64,

    /// End-of-utterance detection delay
    pub complete_timeout_ms: u64,

    pub locale: String,

    pub voice: String,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            // long on purpose: staying silent is also a way back to the main loop
            no_input_timeout_ms: 8000,
            complete_timeout_ms: 0,
            locale: "en-US".to_string(),
            voice: "en-US-NancyNeural".to_string(),
        }
    }
}

/// Confidence below which a classifier result is not trusted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    pub intent: f64,
    pub entity: f64,
    /// Summed confidence of the two entities in a guess
    pub guess_combined: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            intent: 0.7,
            entity: 0.7,
            guess_combined: 1.4,
        }
    }
}

/// Setup dialogue settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupSettings {
    /// Ask whether the player wants the beginner's instructions
    pub offer_instructions: bool,

    /// Ask whether the player wants to change the difficulty
    pub offer_settings: bool,

    /// Failed attempts after which a setup question keeps its default
    pub max_attempts: Option<u32>,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            offer_instructions: true,
            offer_settings: true,
            max_attempts: None,
        }
    }
}
