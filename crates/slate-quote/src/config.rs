//! Engine configuration

use serde::{Deserialize, Serialize};
use slate_common::{DEFAULT_CURRENCY, MIN_MONTHLY_TERM};
use tracing::warn;

use crate::catalog::{BuiltinSource, FileSource, RateCardSource};

/// Quote engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// JSON rate card replacing the built-in catalog
    pub rate_card_path: Option<String>,
    /// ISO currency code attached to quotes
    pub currency: String,
    /// Shortest accepted monthly term; may raise but never lower the
    /// business minimum
    pub minimum_monthly_term: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rate_card_path: None,
            currency: DEFAULT_CURRENCY.to_string(),
            minimum_monthly_term: MIN_MONTHLY_TERM,
        }
    }
}

impl EngineConfig {
    /// Load configuration from `.env` and the environment
    pub fn load() -> Self {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(path) = std::env::var("SLATE_RATE_CARD") {
            if !path.trim().is_empty() {
                cfg.rate_card_path = Some(path);
            }
        }
        if let Ok(currency) = std::env::var("SLATE_CURRENCY") {
            if !currency.trim().is_empty() {
                cfg.currency = currency.trim().to_uppercase();
            }
        }
        if let Ok(val) = std::env::var("SLATE_MIN_MONTHLY_TERM") {
            if let Ok(v) = val.parse::<u32>() {
                if v < MIN_MONTHLY_TERM {
                    warn!(
                        configured = v,
                        minimum = MIN_MONTHLY_TERM,
                        "SLATE_MIN_MONTHLY_TERM below business minimum, clamping"
                    );
                }
                cfg.minimum_monthly_term = v.max(MIN_MONTHLY_TERM);
            }
        }

        cfg
    }

    /// Minimum monthly term actually enforced
    pub fn effective_minimum_term(&self) -> u32 {
        self.minimum_monthly_term.max(MIN_MONTHLY_TERM)
    }

    /// Override the rate card path
    pub fn with_rate_card(mut self, path: impl Into<String>) -> Self {
        self.rate_card_path = Some(path.into());
        self
    }

    /// Where the rate card comes from
    pub fn rate_card_source(&self) -> Box<dyn RateCardSource> {
        match &self.rate_card_path {
            Some(path) => Box::new(FileSource::new(path)),
            None => Box::new(BuiltinSource),
        }
    }
}
