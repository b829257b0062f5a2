//! Pricing module
//!
//! Pure pricing pipeline over an immutable rate card:
//! - Overage calculation against tier allotments
//! - Volume, bug-reward, and annual-prepay discounts
//! - Aggregation into a monthly breakdown
//! - Phase aggregation for production packages

pub mod aggregate;
pub mod discount;
pub mod overage;
pub mod phases;

pub use aggregate::{aggregate, overage_cost, BillingTerms, OverageCost};
pub use discount::{resolve_discounts, resolve_term, DiscountResult, TermResult};
pub use overage::compute_overages;
pub use phases::aggregate_phases;

use slate_common::{AddonRates, QuoteBreakdown, QuoteRequest, Tier};

/// Run overage → discount → aggregate for one request
///
/// Infallible: the request's tier key and phases are ignored, and the term
/// is used as given. Boundary checks live in [`crate::QuoteEngine`].
pub fn price(tier: &Tier, rates: &AddonRates, request: &QuoteRequest) -> QuoteBreakdown {
    let overages = compute_overages(tier, &request.requirements);
    aggregate(
        tier,
        overages,
        rates,
        BillingTerms {
            term_type: request.term_type,
            term_months: request.term_months,
            bug_reward: request.bug_reward,
        },
    )
}
