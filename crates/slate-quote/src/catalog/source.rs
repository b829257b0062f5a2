//! Rate card sources
//!
//! A source produces a complete, validated [`RateCard`] snapshot. Sources
//! never patch the active card in place.

use async_trait::async_trait;
use slate_common::{ConfigError, RateCard, Result, SlateError};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Something that can produce a rate card snapshot
#[async_trait]
pub trait RateCardSource: Send + Sync {
    /// Load and validate a full snapshot
    async fn load(&self) -> Result<RateCard>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// The compiled-in catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

#[async_trait]
impl RateCardSource for BuiltinSource {
    async fn load(&self) -> Result<RateCard> {
        Ok(RateCard::builtin())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// A rate card stored as JSON on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RateCardSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<RateCard> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SlateError::Storage(format!(
                "Failed to read rate card {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let card: RateCard = serde_json::from_str(&content).map_err(|e| {
            ConfigError::InvalidRateCard(format!("Failed to parse rate card JSON: {}", e))
        })?;
        card.validate()?;

        debug!(tiers = card.tiers.len(), "Loaded rate card");
        Ok(card)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
