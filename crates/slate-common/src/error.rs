//! Error types for the Slate quoting engine
//!
//! The calculation pipeline itself never fails; these errors belong to the
//! boundary that resolves tiers, validates terms, and loads rate cards.

use thiserror::Error;

/// Result type alias using SlateError
pub type Result<T> = std::result::Result<T, SlateError>;

/// Unified error type for Slate operations
#[derive(Debug, Error)]
pub enum SlateError {
    // Reference-table errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Caller input errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SlateError {
    /// Whether the caller can fix the input and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SlateError::Validation(_) | SlateError::Config(ConfigError::UnknownTier { .. }))
    }
}

/// Tier catalog and rate card errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown tier: {key}")]
    UnknownTier { key: String },

    #[error("Duplicate tier key in rate card: {key}")]
    DuplicateTier { key: String },

    #[error("Rate card has no tiers")]
    EmptyCatalog,

    #[error("Invalid rate card: {0}")]
    InvalidRateCard(String),
}

/// Quote request validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Monthly term too short: {months} months (minimum {minimum})")]
    TermTooShort { months: u32, minimum: u32 },

    #[error("Production package requires at least one phase")]
    EmptyPackage,

    #[error("{field} of {value} exceeds the limit of {limit}")]
    QuantityTooLarge {
        field: &'static str,
        value: String,
        limit: String,
    },
}

impl From<serde_json::Error> for SlateError {
    fn from(err: serde_json::Error) -> Self {
        SlateError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for SlateError {
    fn from(err: std::io::Error) -> Self {
        SlateError::Storage(err.to_string())
    }
}
