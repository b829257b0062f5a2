//! Production package aggregation
//!
//! Each phase is priced through the same pipeline as a single quote, as a
//! monthly request on the parent tier lasting `months`. Phases are billed
//! back to back:
//!
//! ```text
//! package_total = Σ phase.monthly_total × phase.months
//! total_months  = Σ phase.months
//! ```

use rust_decimal::Decimal;
use slate_common::{
    AddonRates, BugReward, PackageQuote, PhaseQuote, PhaseRequest, QuoteRequest, Result, TermType,
    Tier, ValidationError,
};
use tracing::{debug, instrument};

use super::price;

/// Price every phase in order and sum them into a package
#[instrument(skip(tier, rates, phases), fields(tier = %tier.key, phases = phases.len()))]
pub fn aggregate_phases(
    tier: &Tier,
    rates: &AddonRates,
    phases: &[PhaseRequest],
) -> Result<PackageQuote> {
    if phases.is_empty() {
        return Err(ValidationError::EmptyPackage.into());
    }

    let (priced, package_total, total_months) = phases.iter().fold(
        (Vec::with_capacity(phases.len()), Decimal::ZERO, 0u32),
        |(mut priced, total, months), phase| {
            let breakdown = price(tier, rates, &phase_request(tier, phase));
            let total = total + breakdown.contract_value;
            priced.push(PhaseQuote {
                name: phase.name.clone(),
                months: phase.months,
                breakdown,
            });
            (priced, total, months.saturating_add(phase.months))
        },
    );

    debug!(%package_total, total_months, "Aggregated package");

    Ok(PackageQuote {
        tier: tier.key.clone(),
        phases: priced,
        package_total,
        total_months,
    })
}

/// Monthly request covering one phase
///
/// Bug rewards are a one-off on the parent quote and never repeat per phase.
fn phase_request(tier: &Tier, phase: &PhaseRequest) -> QuoteRequest {
    QuoteRequest {
        tier: tier.key.clone(),
        requirements: phase.requirements.clone(),
        term_type: TermType::Monthly,
        term_months: phase.months,
        bug_reward: BugReward::None,
        phases: None,
    }
}
