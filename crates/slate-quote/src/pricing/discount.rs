//! Discount resolution
//!
//! - Volume discount: banded on total added seats, applied to seat cost only
//! - Bug reward: one-time discount against the base price only
//! - Annual prepay: 12 months of service billed as 10

use rust_decimal::Decimal;
use slate_common::{
    round2, BugReward, DiscountBand, TermType, ANNUAL_BILLED_MONTHS, ANNUAL_SERVICE_MONTHS,
};
use tracing::debug;

/// Discounts taken off the monthly subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountResult {
    pub band: DiscountBand,
    pub volume_discount: Decimal,
    pub bug_discount: Decimal,
}

/// Contract figures derived from the monthly total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermResult {
    pub contract_value: Decimal,
    pub effective_monthly_rate: Decimal,
    pub annual_savings: Decimal,
}

/// Resolve volume and bug-reward discounts
pub fn resolve_discounts(
    total_added_seats: u64,
    seat_cost: Decimal,
    base_price: Decimal,
    bug_reward: BugReward,
) -> DiscountResult {
    let band = DiscountBand::for_added_seats(total_added_seats);
    let volume_discount = round2(seat_cost * band.rate());
    let bug_discount = round2(bug_reward.discount(base_price));

    debug!(
        total_added_seats,
        band = %band,
        %volume_discount,
        %bug_discount,
        "Resolved discounts"
    );

    DiscountResult {
        band,
        volume_discount,
        bug_discount,
    }
}

/// Resolve contract value and savings for a billing term
///
/// `term_months` is ignored for annual terms.
pub fn resolve_term(term_type: TermType, term_months: u32, monthly_total: Decimal) -> TermResult {
    match term_type {
        TermType::Monthly => TermResult {
            contract_value: round2(monthly_total * Decimal::from(term_months)),
            effective_monthly_rate: monthly_total,
            annual_savings: Decimal::ZERO,
        },
        TermType::Annual => {
            let contract_value = round2(monthly_total * Decimal::from(ANNUAL_BILLED_MONTHS));
            let free_months = ANNUAL_SERVICE_MONTHS - ANNUAL_BILLED_MONTHS;
            TermResult {
                contract_value,
                effective_monthly_rate: round2(
                    contract_value / Decimal::from(ANNUAL_SERVICE_MONTHS),
                ),
                annual_savings: round2(monthly_total * Decimal::from(free_months)),
            }
        }
    }
}
