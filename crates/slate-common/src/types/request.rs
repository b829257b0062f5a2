//! Quote request types
//!
//! A [`QuoteRequest`] is built whole by the caller and handed to the engine.
//! Missing or negative quantities deserialize as zero.

use super::money::{non_negative_count, non_negative_quantity};
use crate::error::ValidationError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Shortest monthly contract accepted at the boundary
pub const MIN_MONTHLY_TERM: u32 = 3;

/// Months of service received on an annual prepay
pub const ANNUAL_SERVICE_MONTHS: u32 = 12;

/// Months billed on an annual prepay
pub const ANNUAL_BILLED_MONTHS: u32 = 10;

/// Longest monthly term or phase accepted at the boundary
pub const MAX_TERM_MONTHS: u32 = 120;

/// Largest seat count accepted for any one role
pub const MAX_SEATS: u32 = 100_000;

/// Largest number of active projects accepted
pub const MAX_ACTIVE_PROJECTS: u32 = 10_000;

/// Largest active or archive storage accepted, in TB
pub const MAX_STORAGE_TB: Decimal = dec!(1_000_000);

/// Largest monthly bandwidth accepted, in GB
pub const MAX_BANDWIDTH_GB: Decimal = dec!(1_000_000_000);

fn check_count(field: &'static str, value: u32, limit: u32) -> Result<(), ValidationError> {
    if value > limit {
        return Err(ValidationError::QuantityTooLarge {
            field,
            value: value.to_string(),
            limit: limit.to_string(),
        });
    }
    Ok(())
}

fn check_quantity(
    field: &'static str,
    value: Decimal,
    limit: Decimal,
) -> Result<(), ValidationError> {
    if value > limit {
        return Err(ValidationError::QuantityTooLarge {
            field,
            value: value.to_string(),
            limit: limit.to_string(),
        });
    }
    Ok(())
}

/// Reject a term longer than [`MAX_TERM_MONTHS`]
pub fn check_term_months(field: &'static str, months: u32) -> Result<(), ValidationError> {
    check_count(field, months, MAX_TERM_MONTHS)
}

/// Billing term
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermType {
    /// Billed month by month for `term_months`
    #[default]
    Monthly,
    /// 12 months of service billed as 10
    Annual,
}

/// One-time discount against the base price
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugReward {
    #[default]
    None,
    /// Half of the tier base price
    #[serde(alias = "half-base")]
    HalfBase,
    /// The full tier base price
    #[serde(alias = "full-base")]
    FullBase,
}

impl BugReward {
    /// Discount amount for a given base price
    pub fn discount(&self, base_price: Decimal) -> Decimal {
        match self {
            BugReward::None => Decimal::ZERO,
            BugReward::HalfBase => base_price / Decimal::TWO,
            BugReward::FullBase => base_price,
        }
    }
}

/// Required resource quantities
///
/// Organization seats are counted once; project seats are counted per
/// active project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    #[serde(default, deserialize_with = "non_negative_count")]
    pub owner_seats: u32,
    #[serde(default, deserialize_with = "non_negative_count")]
    pub collaborative_seats: u32,
    #[serde(default, deserialize_with = "non_negative_count")]
    pub active_projects: u32,
    #[serde(default, deserialize_with = "non_negative_count")]
    pub non_collaborative_per_project: u32,
    #[serde(default, deserialize_with = "non_negative_count")]
    pub view_only_per_project: u32,
    #[serde(default, deserialize_with = "non_negative_quantity")]
    pub active_tb: Decimal,
    #[serde(default, deserialize_with = "non_negative_quantity")]
    pub archive_tb: Decimal,
    #[serde(default, deserialize_with = "non_negative_quantity")]
    pub bandwidth_gb: Decimal,
}

impl ResourceRequirements {
    pub fn with_owner_seats(mut self, seats: u32) -> Self {
        self.owner_seats = seats;
        self
    }

    pub fn with_collaborative_seats(mut self, seats: u32) -> Self {
        self.collaborative_seats = seats;
        self
    }

    pub fn with_active_projects(mut self, projects: u32) -> Self {
        self.active_projects = projects;
        self
    }

    /// Set per-project seats (non-collaborative, view-only)
    pub fn with_project_seats(mut self, non_collaborative: u32, view_only: u32) -> Self {
        self.non_collaborative_per_project = non_collaborative;
        self.view_only_per_project = view_only;
        self
    }

    /// Set storage (active TB, archive TB)
    pub fn with_storage(mut self, active_tb: Decimal, archive_tb: Decimal) -> Self {
        self.active_tb = active_tb;
        self.archive_tb = archive_tb;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth_gb: Decimal) -> Self {
        self.bandwidth_gb = bandwidth_gb;
        self
    }

    /// Reject quantities beyond what a single quote can price
    pub fn check_limits(&self) -> Result<(), ValidationError> {
        check_count("owner_seats", self.owner_seats, MAX_SEATS)?;
        check_count("collaborative_seats", self.collaborative_seats, MAX_SEATS)?;
        check_count("active_projects", self.active_projects, MAX_ACTIVE_PROJECTS)?;
        check_count(
            "non_collaborative_per_project",
            self.non_collaborative_per_project,
            MAX_SEATS,
        )?;
        check_count("view_only_per_project", self.view_only_per_project, MAX_SEATS)?;
        check_quantity("active_tb", self.active_tb, MAX_STORAGE_TB)?;
        check_quantity("archive_tb", self.archive_tb, MAX_STORAGE_TB)?;
        check_quantity("bandwidth_gb", self.bandwidth_gb, MAX_BANDWIDTH_GB)
    }
}

/// One phase of a production package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRequest {
    /// Phase label (e.g. "Pre-production")
    pub name: String,
    /// Phase duration in months
    #[serde(default, deserialize_with = "non_negative_count")]
    pub months: u32,
    /// Requirements for this phase only
    #[serde(flatten)]
    pub requirements: ResourceRequirements,
}

impl PhaseRequest {
    pub fn new(name: impl Into<String>, months: u32, requirements: ResourceRequirements) -> Self {
        Self {
            name: name.into(),
            months,
            requirements,
        }
    }

    /// Reject a phase whose length or requirements are out of range
    pub fn check_limits(&self) -> Result<(), ValidationError> {
        check_term_months("phase months", self.months)?;
        self.requirements.check_limits()
    }
}

fn default_term_months() -> u32 {
    MIN_MONTHLY_TERM
}

/// Request for a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Tier key
    pub tier: String,

    /// Required quantities
    #[serde(flatten)]
    pub requirements: ResourceRequirements,

    /// Billing term
    #[serde(default)]
    pub term_type: TermType,

    /// Contract length for monthly terms; annual terms are always 12
    #[serde(default = "default_term_months")]
    pub term_months: u32,

    /// One-time base-price discount
    #[serde(default)]
    pub bug_reward: BugReward,

    /// Phases for a production package quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<PhaseRequest>>,
}

impl QuoteRequest {
    /// Create a monthly request on the minimum term with no requirements
    pub fn new(tier: impl Into<String>) -> Self {
        Self {
            tier: tier.into(),
            requirements: ResourceRequirements::default(),
            term_type: TermType::Monthly,
            term_months: MIN_MONTHLY_TERM,
            bug_reward: BugReward::None,
            phases: None,
        }
    }

    /// Set resource requirements
    pub fn with_requirements(mut self, requirements: ResourceRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// Monthly term of the given length
    pub fn monthly(mut self, months: u32) -> Self {
        self.term_type = TermType::Monthly;
        self.term_months = months;
        self
    }

    /// Annual prepay term
    pub fn annual(mut self) -> Self {
        self.term_type = TermType::Annual;
        self.term_months = ANNUAL_SERVICE_MONTHS;
        self
    }

    pub fn with_bug_reward(mut self, reward: BugReward) -> Self {
        self.bug_reward = reward;
        self
    }

    /// Add a production package phase
    pub fn with_phase(mut self, phase: PhaseRequest) -> Self {
        self.phases.get_or_insert_with(Vec::new).push(phase);
        self
    }

    /// Whether this is a production package quote
    pub fn is_package(&self) -> bool {
        self.phases.is_some()
    }

    /// Months of service covered by the term
    pub fn service_months(&self) -> u32 {
        match self.term_type {
            TermType::Monthly => self.term_months,
            TermType::Annual => ANNUAL_SERVICE_MONTHS,
        }
    }
}
