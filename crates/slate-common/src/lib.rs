//! # Slate Common
//!
//! Shared types, reference tables, and errors for the Slate subscription
//! quoting engine.
//!
//! ## Core Types
//!
//! - [`Tier`]/[`AddonRates`]/[`RateCard`]: tier catalog and addon rate table
//! - [`QuoteRequest`]/[`PhaseRequest`]: caller input
//! - [`QuoteBreakdown`]/[`PackageQuote`]/[`Quote`]: engine output
//! - [`QuoteDraft`]: hand-off to the saved-quote store
//!
//! ## Money
//!
//! All currency is [`rust_decimal::Decimal`], rounded half-up to cents with
//! [`round2`]. Storage and bandwidth overage is billed in whole blocks.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ConfigError, Result, SlateError, ValidationError};
pub use types::{
    breakdown::{DiscountBand, Overages, PackageQuote, PhaseQuote, Quote, QuoteBreakdown},
    draft::{QuoteDraft, QuoteStatus, QuoteSummary},
    money::{blocks, excess, round2},
    request::{
        check_term_months, BugReward, PhaseRequest, QuoteRequest, ResourceRequirements, TermType,
        ANNUAL_BILLED_MONTHS, ANNUAL_SERVICE_MONTHS, MAX_ACTIVE_PROJECTS, MAX_BANDWIDTH_GB,
        MAX_SEATS, MAX_STORAGE_TB, MAX_TERM_MONTHS, MIN_MONTHLY_TERM,
    },
    tier::{
        AddonRates, OrgSeats, ProjectSeats, RateCard, StorageAllotment, Tier, ACTIVE_BLOCK_TB,
        ARCHIVE_BLOCK_TB, BANDWIDTH_BLOCK_GB, MAX_PRICE,
    },
};

/// Slate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default quote currency
pub const DEFAULT_CURRENCY: &str = "USD";
