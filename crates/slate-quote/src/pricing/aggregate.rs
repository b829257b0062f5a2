//! Quote aggregation
//!
//! ```text
//! seat_cost     = Σ excess seats × role rate
//! storage_cost  = Σ blocks × block rate
//! subtotal      = base + seat_cost + storage_cost
//! monthly_total = max(0, subtotal - volume_discount - bug_discount)
//! ```

use rust_decimal::Decimal;
use slate_common::{round2, AddonRates, BugReward, Overages, QuoteBreakdown, TermType, Tier};

use super::discount::{resolve_discounts, resolve_term};

/// Seat and storage overage costs before discounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverageCost {
    pub seat_cost: Decimal,
    pub storage_cost: Decimal,
}

/// Price overage counts at the addon rates
pub fn overage_cost(overages: &Overages, rates: &AddonRates) -> OverageCost {
    let seat_cost = Decimal::from(overages.owner_seats) * rates.owner
        + Decimal::from(overages.collaborative_seats) * rates.collaborative
        + Decimal::from(overages.non_collaborative_seats) * rates.non_collaborative
        + Decimal::from(overages.view_only_seats) * rates.view_only;

    let storage_cost = Decimal::from(overages.active_blocks) * rates.active_tb
        + Decimal::from(overages.archive_blocks) * rates.archive_2tb
        + Decimal::from(overages.bandwidth_blocks) * rates.bandwidth_500gb;

    OverageCost {
        seat_cost: round2(seat_cost),
        storage_cost: round2(storage_cost),
    }
}

/// Billing inputs that are not resource quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingTerms {
    pub term_type: TermType,
    pub term_months: u32,
    pub bug_reward: BugReward,
}

/// Combine base price, overage costs, and discounts into a breakdown
pub fn aggregate(
    tier: &Tier,
    overages: Overages,
    rates: &AddonRates,
    terms: BillingTerms,
) -> QuoteBreakdown {
    let base = round2(tier.base_price);
    let OverageCost {
        seat_cost,
        storage_cost,
    } = overage_cost(&overages, rates);

    let total_added_seats = overages.total_added_seats();
    let discounts = resolve_discounts(total_added_seats, seat_cost, base, terms.bug_reward);

    let subtotal = round2(base + seat_cost + storage_cost);
    let monthly_total =
        round2(subtotal - discounts.volume_discount - discounts.bug_discount).max(Decimal::ZERO);

    let term = resolve_term(terms.term_type, terms.term_months, monthly_total);

    QuoteBreakdown {
        base,
        seat_cost,
        storage_cost,
        volume_discount: discounts.volume_discount,
        bug_discount: discounts.bug_discount,
        discount_band: discounts.band,
        total_added_seats,
        subtotal,
        monthly_total,
        contract_value: term.contract_value,
        effective_monthly_rate: term.effective_monthly_rate,
        annual_savings: term.annual_savings,
        overages,
    }
}
