//! Tier Catalog and Addon Rate Table
//!
//! Reference data for subscription pricing:
//! - [`Tier`]: a named plan with a base monthly price and included allotments
//! - [`AddonRates`]: per-unit seat prices and per-block storage/bandwidth prices
//! - [`RateCard`]: an immutable snapshot of both tables
//!
//! Per-project seat allotments are granted once per active project.

use crate::error::{ConfigError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Active storage is sold in 1 TB blocks
pub const ACTIVE_BLOCK_TB: Decimal = dec!(1);

/// Archive storage is sold in 2 TB blocks
pub const ARCHIVE_BLOCK_TB: Decimal = dec!(2);

/// Bandwidth is sold in 500 GB blocks
pub const BANDWIDTH_BLOCK_GB: Decimal = dec!(500);

/// Highest base price or addon rate a rate card may carry
pub const MAX_PRICE: Decimal = dec!(1_000_000_000);

/// Organization-level seats included in a tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgSeats {
    pub owner: u32,
    pub collaborative: u32,
}

/// Project-level seats included per active project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSeats {
    pub non_collaborative: u32,
    pub view_only: u32,
}

/// Included storage in terabytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageAllotment {
    pub active_tb: Decimal,
    pub archive_tb: Decimal,
}

/// A named subscription plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Unique tier identifier (e.g. "starter")
    pub key: String,
    /// Display name
    pub name: String,
    /// Base monthly price in whole currency units
    pub base_price: Decimal,
    /// Included organization seats
    pub org_seats: OrgSeats,
    /// Included active projects
    pub active_projects: u32,
    /// Included seats per active project
    pub project_seats: ProjectSeats,
    /// Included storage
    pub storage: StorageAllotment,
    /// Included monthly bandwidth in GB
    pub bandwidth_gb: Decimal,
}

impl Tier {
    fn has_negative_values(&self) -> bool {
        self.base_price < Decimal::ZERO
            || self.storage.active_tb < Decimal::ZERO
            || self.storage.archive_tb < Decimal::ZERO
            || self.bandwidth_gb < Decimal::ZERO
    }
}

/// Monthly addon prices for overage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonRates {
    /// Per owner seat
    pub owner: Decimal,
    /// Per collaborative seat
    pub collaborative: Decimal,
    /// Per non-collaborative project seat
    pub non_collaborative: Decimal,
    /// Per view-only project seat
    pub view_only: Decimal,
    /// Per 1 TB active storage block
    pub active_tb: Decimal,
    /// Per 2 TB archive storage block
    pub archive_2tb: Decimal,
    /// Per 500 GB bandwidth block
    pub bandwidth_500gb: Decimal,
}

impl AddonRates {
    fn has_negative_values(&self) -> bool {
        [
            self.owner,
            self.collaborative,
            self.non_collaborative,
            self.view_only,
            self.active_tb,
            self.archive_2tb,
            self.bandwidth_500gb,
        ]
        .iter()
        .any(|rate| *rate < Decimal::ZERO)
    }

    fn max_rate(&self) -> Decimal {
        [
            self.owner,
            self.collaborative,
            self.non_collaborative,
            self.view_only,
            self.active_tb,
            self.archive_2tb,
            self.bandwidth_500gb,
        ]
        .into_iter()
        .fold(Decimal::ZERO, Decimal::max)
    }
}

impl Default for AddonRates {
    fn default() -> Self {
        Self {
            owner: dec!(150),
            collaborative: dec!(75),
            non_collaborative: dec!(25),
            view_only: dec!(10),
            active_tb: dec!(100),
            archive_2tb: dec!(50),
            bandwidth_500gb: dec!(40),
        }
    }
}

/// Immutable snapshot of the tier catalog and addon rates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCard {
    /// Tiers in catalog order
    pub tiers: Vec<Tier>,
    /// Overage prices shared by all tiers
    pub addons: AddonRates,
}

impl RateCard {
    /// The compiled-in catalog
    pub fn builtin() -> Self {
        Self {
            tiers: vec![
                tier("starter", "Starter", dec!(1000), (1, 2), 5, (3, 3), (dec!(1), dec!(2)), dec!(500)),
                tier("professional", "Professional", dec!(2500), (2, 5), 10, (5, 10), (dec!(5), dec!(10)), dec!(2000)),
                tier("studio", "Studio", dec!(5000), (3, 10), 25, (10, 20), (dec!(20), dec!(50)), dec!(10000)),
                tier("enterprise", "Enterprise", dec!(10000), (5, 25), 50, (20, 50), (dec!(50), dec!(200)), dec!(50000)),
            ],
            addons: AddonRates::default(),
        }
    }

    /// Look up a tier by key
    pub fn tier(&self, key: &str) -> Result<&Tier> {
        self.tiers
            .iter()
            .find(|t| t.key == key)
            .ok_or_else(|| {
                ConfigError::UnknownTier {
                    key: key.to_string(),
                }
                .into()
            })
    }

    /// Tier keys in catalog order
    pub fn tier_keys(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|t| t.key.as_str())
    }

    /// Check the snapshot is usable for pricing
    pub fn validate(&self) -> Result<()> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyCatalog.into());
        }

        let mut seen = HashSet::new();
        for tier in &self.tiers {
            if !seen.insert(tier.key.as_str()) {
                return Err(ConfigError::DuplicateTier {
                    key: tier.key.clone(),
                }
                .into());
            }
            if tier.has_negative_values() {
                return Err(ConfigError::InvalidRateCard(format!(
                    "tier {} has a negative price or allotment",
                    tier.key
                ))
                .into());
            }
            if tier.base_price > MAX_PRICE {
                return Err(ConfigError::InvalidRateCard(format!(
                    "tier {} base price exceeds {}",
                    tier.key, MAX_PRICE
                ))
                .into());
            }
        }

        if self.addons.has_negative_values() {
            return Err(ConfigError::InvalidRateCard("negative addon rate".to_string()).into());
        }
        if self.addons.max_rate() > MAX_PRICE {
            return Err(ConfigError::InvalidRateCard(format!(
                "addon rate exceeds {}",
                MAX_PRICE
            ))
            .into());
        }

        Ok(())
    }

    /// Content digest of this snapshot (blake3, hex)
    ///
    /// Two snapshots with identical tiers and rates share a fingerprint.
    pub fn fingerprint(&self) -> String {
        // Serializing plain structs and Vecs cannot fail
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        blake3::hash(&canonical).to_hex().to_string()
    }
}

impl Default for RateCard {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn tier(
    key: &str,
    name: &str,
    base_price: Decimal,
    (owner, collaborative): (u32, u32),
    active_projects: u32,
    (non_collaborative, view_only): (u32, u32),
    (active_tb, archive_tb): (Decimal, Decimal),
    bandwidth_gb: Decimal,
) -> Tier {
    Tier {
        key: key.to_string(),
        name: name.to_string(),
        base_price,
        org_seats: OrgSeats {
            owner,
            collaborative,
        },
        active_projects,
        project_seats: ProjectSeats {
            non_collaborative,
            view_only,
        },
        storage: StorageAllotment {
            active_tb,
            archive_tb,
        },
        bandwidth_gb,
    }
}
