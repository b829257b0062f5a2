//! Quote engine
//!
//! The validating boundary around the pricing pipeline:
//! - Resolves the tier key against the active rate card
//! - Enforces the minimum monthly term
//! - Rejects production packages without phases
//! - Bounds every quantity so pricing cannot overflow
//!
//! Everything past the boundary is pure arithmetic over one snapshot.

use slate_common::{
    check_term_months, PackageQuote, PhaseRequest, Quote, QuoteDraft, QuoteRequest, RateCard,
    Result, TermType, Tier, ValidationError, ANNUAL_SERVICE_MONTHS,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::catalog::CatalogStore;
use crate::config::EngineConfig;
use crate::pricing::{aggregate_phases, price};

/// Subscription quoting engine
pub struct QuoteEngine {
    store: Arc<CatalogStore>,
    config: EngineConfig,
}

impl QuoteEngine {
    /// Engine over the built-in catalog
    pub fn new(config: EngineConfig) -> Self {
        Self {
            store: Arc::new(CatalogStore::builtin()),
            config,
        }
    }

    /// Engine sharing an existing catalog store
    pub fn with_store(store: Arc<CatalogStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Engine with the catalog loaded from the configured source
    pub async fn from_config(config: EngineConfig) -> Result<Self> {
        let source = config.rate_card_source();
        let card = source.load().await?;
        debug!(source = %source.describe(), "Loaded rate card");

        Ok(Self {
            store: Arc::new(CatalogStore::new(card)?),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared catalog store, for swapping rate cards at runtime
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// The active rate card snapshot
    pub fn rate_card(&self) -> Arc<RateCard> {
        self.store.snapshot()
    }

    /// Price a request
    #[instrument(skip(self, request), fields(tier = %request.tier, term = ?request.term_type))]
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let card = self.store.snapshot();
        debug!(generation = self.store.generation(), "Using rate card");
        self.quote_with(&card, request)
    }

    /// Price a production package on `tier_key`
    #[instrument(skip(self, phases), fields(phases = phases.len()))]
    pub fn quote_package(&self, tier_key: &str, phases: &[PhaseRequest]) -> Result<PackageQuote> {
        let card = self.store.snapshot();
        let tier = resolve_tier(&card, tier_key)?;
        check_phases(phases)
            .and_then(|()| aggregate_phases(tier, &card.addons, phases))
            .inspect_err(|e| warn!(error = %e, "Rejected package"))
    }

    /// Price a request and wrap it for the saved-quote store
    pub fn draft(
        &self,
        client: impl Into<String>,
        trial: bool,
        request: QuoteRequest,
    ) -> Result<QuoteDraft> {
        let card = self.store.snapshot();
        let quote = self.quote_with(&card, &request)?;
        Ok(QuoteDraft::new(
            client,
            trial,
            request,
            &quote,
            card.fingerprint(),
        ))
    }

    fn quote_with(&self, card: &RateCard, request: &QuoteRequest) -> Result<Quote> {
        let tier = resolve_tier(card, &request.tier)?;
        let request = self
            .normalize(request)
            .inspect_err(|e| warn!(error = %e, "Rejected quote"))?;

        let package = match &request.phases {
            Some(phases) => Some(aggregate_phases(tier, &card.addons, phases)?),
            None => None,
        };
        let breakdown = price(tier, &card.addons, &request);

        debug!(
            monthly_total = %breakdown.monthly_total,
            contract_value = %breakdown.contract_value,
            package_total = ?package.as_ref().map(|p| p.package_total),
            "Priced quote"
        );

        Ok(Quote {
            tier: tier.key.clone(),
            term_type: request.term_type,
            term_months: request.term_months,
            breakdown,
            package,
        })
    }

    /// Validate the term and quantities, and pin annual terms to twelve months
    fn normalize(&self, request: &QuoteRequest) -> Result<QuoteRequest> {
        let mut request = request.clone();
        let minimum = self.config.effective_minimum_term();
        match request.term_type {
            TermType::Monthly if request.term_months < minimum => {
                return Err(ValidationError::TermTooShort {
                    months: request.term_months,
                    minimum,
                }
                .into());
            }
            TermType::Monthly => check_term_months("term_months", request.term_months)?,
            TermType::Annual => request.term_months = ANNUAL_SERVICE_MONTHS,
        }

        request.requirements.check_limits()?;
        if let Some(phases) = &request.phases {
            check_phases(phases)?;
        }

        Ok(request)
    }
}

fn resolve_tier<'a>(card: &'a RateCard, key: &str) -> Result<&'a Tier> {
    card.tier(key).inspect_err(|e| {
        warn!(
            error = %e,
            available = ?card.tier_keys().collect::<Vec<_>>(),
            "Rejected tier"
        )
    })
}

fn check_phases(phases: &[PhaseRequest]) -> Result<()> {
    if phases.is_empty() {
        return Err(ValidationError::EmptyPackage.into());
    }
    for phase in phases {
        phase.check_limits()?;
    }
    Ok(())
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use slate_common::{
        BugReward, ConfigError, QuoteStatus, ResourceRequirements, SlateError,
    };

    fn starter_request() -> QuoteRequest {
        QuoteRequest::new("starter").with_requirements(
            ResourceRequirements::default()
                .with_collaborative_seats(5)
                .with_active_projects(5)
                .with_project_seats(3, 3)
                .with_storage(dec!(1), dec!(2))
                .with_bandwidth(dec!(500)),
        )
    }

    #[test]
    fn test_starter_scenario() {
        let engine = QuoteEngine::default();
        let quote = engine.quote(&starter_request().monthly(3)).unwrap();
        let b = &quote.breakdown;

        assert_eq!(b.overages.collaborative_seats, 3);
        assert_eq!(b.seat_cost, dec!(225));
        assert_eq!(b.storage_cost, dec!(0));
        assert_eq!(b.total_added_seats, 3);
        assert_eq!(b.volume_discount, dec!(0));
        assert_eq!(b.monthly_total, dec!(1225));
        assert_eq!(b.contract_value, dec!(3675));
        assert!(quote.package.is_none());
    }

    #[test]
    fn test_full_bug_reward_scenario() {
        let engine = QuoteEngine::default();
        let request = starter_request().with_bug_reward(BugReward::FullBase);
        let b = engine.quote(&request).unwrap().breakdown;

        assert_eq!(b.bug_discount, dec!(1000));
        assert_eq!(b.monthly_total, dec!(225));
    }

    #[test]
    fn test_unknown_tier() {
        let engine = QuoteEngine::default();
        let err = engine.quote(&QuoteRequest::new("platinum")).unwrap_err();
        assert!(matches!(
            err,
            SlateError::Config(ConfigError::UnknownTier { .. })
        ));
    }

    #[test]
    fn test_short_monthly_term() {
        let engine = QuoteEngine::default();
        let err = engine
            .quote(&QuoteRequest::new("starter").monthly(2))
            .unwrap_err();
        assert!(matches!(
            err,
            SlateError::Validation(ValidationError::TermTooShort { months: 2, minimum: 3 })
        ));
    }

    #[test]
    fn test_annual_term_pinned_to_twelve() {
        let engine = QuoteEngine::default();
        let mut request = QuoteRequest::new("starter").annual();
        request.term_months = 1;
        let quote = engine.quote(&request).unwrap();

        assert_eq!(quote.term_months, 12);
        assert_eq!(quote.breakdown.contract_value, dec!(10000));
        assert_eq!(quote.breakdown.annual_savings, dec!(2000));
        assert_eq!(quote.breakdown.effective_monthly_rate, dec!(833.33));
    }

    #[test]
    fn test_empty_phase_list_rejected() {
        let engine = QuoteEngine::default();
        let mut request = QuoteRequest::new("starter");
        request.phases = Some(vec![]);

        let err = engine.quote(&request).unwrap_err();
        assert!(matches!(
            err,
            SlateError::Validation(ValidationError::EmptyPackage)
        ));
        assert!(engine.quote_package("starter", &[]).is_err());
    }

    #[test]
    fn test_package_quote() {
        let engine = QuoteEngine::default();
        let request = QuoteRequest::new("starter")
            .with_phase(PhaseRequest::new("Prep", 2, ResourceRequirements::default()))
            .with_phase(PhaseRequest::new(
                "Shoot",
                3,
                ResourceRequirements::default().with_storage(dec!(11), dec!(0)),
            ));
        let quote = engine.quote(&request).unwrap();
        let package = quote.package.unwrap();

        assert_eq!(package.package_total, dec!(8000));
        assert_eq!(package.total_months, 5);
        assert_eq!(package.average_monthly(), Some(dec!(1600)));
    }

    #[test]
    fn test_draft_records_rate_card() {
        let engine = QuoteEngine::default();
        let draft = engine.draft("Northlight Films", true, starter_request()).unwrap();

        assert_eq!(draft.status, QuoteStatus::Draft);
        assert!(draft.trial);
        assert_eq!(draft.summary.monthly_total, dec!(1225));
        assert_eq!(draft.summary.package_total, None);
        assert_eq!(draft.rate_card_fingerprint, engine.rate_card().fingerprint());
    }

    #[test]
    fn test_swap_changes_future_quotes() {
        let engine = QuoteEngine::default();
        let mut card = RateCard::builtin();
        card.addons.collaborative = dec!(100);
        engine.store().swap(card).unwrap();

        let b = engine.quote(&starter_request()).unwrap().breakdown;
        assert_eq!(b.seat_cost, dec!(300));
    }

    #[test]
    fn test_configurable_minimum_term() {
        let raised = QuoteEngine::new(EngineConfig {
            minimum_monthly_term: 6,
            ..Default::default()
        });
        assert!(raised.quote(&QuoteRequest::new("starter").monthly(4)).is_err());
        assert!(raised.quote(&QuoteRequest::new("starter").monthly(6)).is_ok());

        let lowered = QuoteEngine::new(EngineConfig {
            minimum_monthly_term: 0,
            ..Default::default()
        });
        let err = lowered
            .quote(&QuoteRequest::new("starter").monthly(1))
            .unwrap_err();
        assert!(matches!(
            err,
            SlateError::Validation(ValidationError::TermTooShort { months: 1, minimum: 3 })
        ));
    }

    #[test]
    fn test_oversized_request_rejected() {
        let engine = QuoteEngine::default();
        let request = QuoteRequest::new("starter")
            .with_requirements(
                ResourceRequirements::default()
                    .with_active_projects(u32::MAX)
                    .with_project_seats(u32::MAX, u32::MAX),
            )
            .monthly(u32::MAX);

        let err = engine.quote(&request).unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(
            err,
            SlateError::Validation(ValidationError::QuantityTooLarge { field: "term_months", .. })
        ));

        let err = engine.quote(&request.clone().monthly(12)).unwrap_err();
        assert!(matches!(
            err,
            SlateError::Validation(ValidationError::QuantityTooLarge { field: "active_projects", .. })
        ));
    }

    #[test]
    fn test_oversized_storage_rejected() {
        let engine = QuoteEngine::default();
        let huge = Decimal::from_i128_with_scale(10i128.pow(23), 0);
        let request = QuoteRequest::new("starter")
            .with_requirements(ResourceRequirements::default().with_storage(huge, dec!(0)));

        let err = engine.quote(&request).unwrap_err();
        assert!(matches!(
            err,
            SlateError::Validation(ValidationError::QuantityTooLarge { field: "active_tb", .. })
        ));
    }

    #[test]
    fn test_oversized_phase_rejected() {
        let engine = QuoteEngine::default();
        let long = PhaseRequest::new("Shoot", u32::MAX, ResourceRequirements::default());

        let err = engine
            .quote(&QuoteRequest::new("starter").with_phase(long.clone()))
            .unwrap_err();
        assert!(matches!(
            err,
            SlateError::Validation(ValidationError::QuantityTooLarge { field: "phase months", .. })
        ));
        assert!(engine.quote_package("starter", &[long]).is_err());
    }

    #[test]
    fn test_largest_accepted_request_prices() {
        use slate_common::{
            MAX_ACTIVE_PROJECTS, MAX_BANDWIDTH_GB, MAX_SEATS, MAX_STORAGE_TB, MAX_TERM_MONTHS,
        };

        let engine = QuoteEngine::default();
        let requirements = ResourceRequirements::default()
            .with_owner_seats(MAX_SEATS)
            .with_collaborative_seats(MAX_SEATS)
            .with_active_projects(MAX_ACTIVE_PROJECTS)
            .with_project_seats(MAX_SEATS, MAX_SEATS)
            .with_storage(MAX_STORAGE_TB, MAX_STORAGE_TB)
            .with_bandwidth(MAX_BANDWIDTH_GB);
        let request = QuoteRequest::new("enterprise")
            .with_requirements(requirements.clone())
            .monthly(MAX_TERM_MONTHS)
            .with_phase(PhaseRequest::new("Shoot", MAX_TERM_MONTHS, requirements));

        let quote = engine.quote(&request).unwrap();
        assert!(quote.breakdown.contract_value > Decimal::ZERO);
        assert!(quote.package.unwrap().package_total > Decimal::ZERO);
    }
}
