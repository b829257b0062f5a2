//! Rate card store
//!
//! Holds the active [`RateCard`] behind an `Arc` so every calculation reads a
//! single consistent snapshot. Updates replace the whole snapshot at once.

use parking_lot::RwLock;
use slate_common::{RateCard, Result};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::source::RateCardSource;

struct Active {
    card: Arc<RateCard>,
    /// Number of successful swaps since creation
    generation: u64,
}

/// Swappable holder for the active rate card
pub struct CatalogStore {
    active: RwLock<Active>,
}

impl CatalogStore {
    /// Create a store from a validated rate card
    pub fn new(card: RateCard) -> Result<Self> {
        card.validate()?;
        Ok(Self::from_card(card))
    }

    /// Store holding the compiled-in catalog
    pub fn builtin() -> Self {
        Self::from_card(RateCard::builtin())
    }

    fn from_card(card: RateCard) -> Self {
        Self {
            active: RwLock::new(Active {
                card: Arc::new(card),
                generation: 0,
            }),
        }
    }

    /// The active snapshot
    pub fn snapshot(&self) -> Arc<RateCard> {
        self.active.read().card.clone()
    }

    /// Replace the active snapshot, returning the previous one
    ///
    /// Invalid cards are rejected and the active snapshot is left untouched.
    #[instrument(skip(self, card), fields(tiers = card.tiers.len()))]
    pub fn swap(&self, card: RateCard) -> Result<Arc<RateCard>> {
        if let Err(e) = card.validate() {
            warn!(error = %e, "Rejected rate card");
            return Err(e);
        }

        let fingerprint = card.fingerprint();
        let (previous, generation) = {
            let mut active = self.active.write();
            active.generation += 1;
            (
                std::mem::replace(&mut active.card, Arc::new(card)),
                active.generation,
            )
        };

        info!(%fingerprint, generation, "Swapped rate card");
        Ok(previous)
    }

    /// Load a card from `source` and swap it in
    pub async fn refresh(&self, source: &dyn RateCardSource) -> Result<Arc<RateCard>> {
        let card = source.load().await?;
        self.swap(card)
    }

    /// Number of swaps applied
    pub fn generation(&self) -> u64 {
        self.active.read().generation
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::builtin()
    }
}
