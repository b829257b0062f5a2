//! Quote outputs
//!
//! ```text
//! subtotal      = base + seat_cost + storage_cost
//! monthly_total = subtotal - volume_discount - bug_discount   (>= 0)
//! ```
//!
//! A [`QuoteBreakdown`] is recomputed from scratch on every request change.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::request::TermType;

/// Excess quantities over a tier's allotments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overages {
    /// Excess owner seats
    pub owner_seats: u64,
    /// Excess collaborative seats
    pub collaborative_seats: u64,
    /// Excess non-collaborative seats across all active projects
    pub non_collaborative_seats: u64,
    /// Excess view-only seats across all active projects
    pub view_only_seats: u64,
    /// 1 TB active storage blocks
    pub active_blocks: u64,
    /// 2 TB archive storage blocks
    pub archive_blocks: u64,
    /// 500 GB bandwidth blocks
    pub bandwidth_blocks: u64,
}

impl Overages {
    /// Total added seats across all four seat roles
    pub fn total_added_seats(&self) -> u64 {
        self.owner_seats
            .saturating_add(self.collaborative_seats)
            .saturating_add(self.non_collaborative_seats)
            .saturating_add(self.view_only_seats)
    }

    /// Whether anything exceeds the tier
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Volume discount band on seat overage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiscountBand {
    /// Fewer than 10 added seats
    #[default]
    #[serde(rename = "none")]
    None,
    /// 10 to 24 added seats
    #[serde(rename = "5%")]
    FivePercent,
    /// 25 to 49 added seats
    #[serde(rename = "10%")]
    TenPercent,
    /// 50 or more added seats
    #[serde(rename = "15%")]
    FifteenPercent,
}

impl DiscountBand {
    /// Band for a number of added seats
    pub fn for_added_seats(total_added_seats: u64) -> Self {
        match total_added_seats {
            0..=9 => DiscountBand::None,
            10..=24 => DiscountBand::FivePercent,
            25..=49 => DiscountBand::TenPercent,
            _ => DiscountBand::FifteenPercent,
        }
    }

    /// Discount rate applied to seat overage
    pub fn rate(&self) -> Decimal {
        match self {
            DiscountBand::None => Decimal::ZERO,
            DiscountBand::FivePercent => dec!(0.05),
            DiscountBand::TenPercent => dec!(0.10),
            DiscountBand::FifteenPercent => dec!(0.15),
        }
    }

    /// Smallest added-seat count in this band
    pub fn threshold(&self) -> u64 {
        match self {
            DiscountBand::None => 0,
            DiscountBand::FivePercent => 10,
            DiscountBand::TenPercent => 25,
            DiscountBand::FifteenPercent => 50,
        }
    }

    /// The next band up, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            DiscountBand::None => Some(DiscountBand::FivePercent),
            DiscountBand::FivePercent => Some(DiscountBand::TenPercent),
            DiscountBand::TenPercent => Some(DiscountBand::FifteenPercent),
            DiscountBand::FifteenPercent => None,
        }
    }

    /// Additional seats needed to reach the next band
    pub fn seats_to_next_band(total_added_seats: u64) -> Option<u64> {
        Self::for_added_seats(total_added_seats)
            .next()
            .map(|band| band.threshold() - total_added_seats)
    }
}

impl std::fmt::Display for DiscountBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountBand::None => write!(f, "none"),
            DiscountBand::FivePercent => write!(f, "5%"),
            DiscountBand::TenPercent => write!(f, "10%"),
            DiscountBand::FifteenPercent => write!(f, "15%"),
        }
    }
}

/// Full monthly pricing breakdown for one set of requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Tier base price
    pub base: Decimal,
    /// Seat overage cost before volume discount
    pub seat_cost: Decimal,
    /// Storage and bandwidth overage cost
    pub storage_cost: Decimal,
    /// Volume discount on seat cost
    pub volume_discount: Decimal,
    /// One-time base-price discount
    pub bug_discount: Decimal,
    /// Band that set the volume discount
    pub discount_band: DiscountBand,
    /// Sum of excess seats across all roles
    pub total_added_seats: u64,
    /// base + seat_cost + storage_cost
    pub subtotal: Decimal,
    /// Recurring monthly figure after discounts
    pub monthly_total: Decimal,
    /// Total billed over the term
    pub contract_value: Decimal,
    /// contract_value per month of service
    pub effective_monthly_rate: Decimal,
    /// Value of the free months on an annual prepay
    pub annual_savings: Decimal,
    /// Excess counts the costs derive from
    pub overages: Overages,
}

/// One priced phase of a production package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseQuote {
    pub name: String,
    pub months: u32,
    pub breakdown: QuoteBreakdown,
}

/// Production package: phases billed back to back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageQuote {
    /// Tier shared by all phases
    pub tier: String,
    /// Phases in billing order
    pub phases: Vec<PhaseQuote>,
    /// Sum of monthly_total x months over all phases
    pub package_total: Decimal,
    /// Sum of phase durations
    pub total_months: u32,
}

impl PackageQuote {
    /// Average monthly cost across the package
    pub fn average_monthly(&self) -> Option<Decimal> {
        if self.total_months > 0 {
            Some(super::money::round2(
                self.package_total / Decimal::from(self.total_months),
            ))
        } else {
            None
        }
    }
}

/// Engine output for a [`QuoteRequest`](super::request::QuoteRequest)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub tier: String,
    pub term_type: TermType,
    pub term_months: u32,
    /// Breakdown of the top-level requirements
    pub breakdown: QuoteBreakdown,
    /// Present for production package quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageQuote>,
}
