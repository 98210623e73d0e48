//! Error types for the deduction engine
//!
//! Gameplay failures (silence, low confidence, impossible guesses) never show up
//! here: they are recovered inside the turn controller. These variants cover the
//! things the host has to deal with, such as a broken voice transport or a bad
//! case file.

use thiserror::Error;

/// Deduction engine error type
#[derive(Error, Debug)]
pub enum DeductionError {
    #[error("Voice channel error: {0}")]
    Voice(String),

    #[error("Invalid difficulty: {suspects} suspects with {size} items each (allowed values are 2, 3 and 4)")]
    InvalidDifficulty { suspects: usize, size: usize },

    #[error("Catalog too small: scenario needs {needed} items, catalog has {available}")]
    CatalogTooSmall { needed: usize, available: usize },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for DeductionError {
    fn from(e: toml::de::Error) -> Self {
        DeductionError::Serialization(e.to_string())
    }
}

impl From<toml::ser::Error> for DeductionError {
    fn from(e: toml::ser::Error) -> Self {
        DeductionError::Serialization(e.to_string())
    }
}

/// Result type for deduction engine operations
pub type Result<T> = std::result::Result<T, DeductionError>;
