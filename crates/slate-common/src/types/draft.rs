//! Saved-quote hand-off
//!
//! Storage and status tracking belong to the persistence layer. The engine
//! only produces the figures attached to a new draft.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::breakdown::Quote;
use super::request::QuoteRequest;

/// Saved quote lifecycle: draft -> sent -> accepted | lost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Lost,
}

impl QuoteStatus {
    /// Whether a move to `next` is a forward step
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (self, next),
            (QuoteStatus::Draft, QuoteStatus::Sent)
                | (QuoteStatus::Sent, QuoteStatus::Accepted)
                | (QuoteStatus::Sent, QuoteStatus::Lost)
        )
    }
}

/// Top-level figures stored alongside a saved quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub monthly_total: Decimal,
    pub contract_value: Decimal,
    pub effective_monthly_rate: Decimal,
    pub annual_savings: Decimal,
    pub total_added_seats: u64,
    /// Package total when the quote is phased
    pub package_total: Option<Decimal>,
    /// Package length when the quote is phased
    pub package_months: Option<u32>,
}

impl From<&Quote> for QuoteSummary {
    fn from(quote: &Quote) -> Self {
        let b = &quote.breakdown;
        Self {
            monthly_total: b.monthly_total,
            contract_value: b.contract_value,
            effective_monthly_rate: b.effective_monthly_rate,
            annual_savings: b.annual_savings,
            total_added_seats: b.total_added_seats,
            package_total: quote.package.as_ref().map(|p| p.package_total),
            package_months: quote.package.as_ref().map(|p| p.total_months),
        }
    }
}

/// A new quote ready for the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub id: Uuid,
    /// Client display name or CRM reference
    pub client: String,
    /// Quote is for a trial subscription
    pub trial: bool,
    pub request: QuoteRequest,
    pub summary: QuoteSummary,
    /// Fingerprint of the rate card that priced this quote
    pub rate_card_fingerprint: String,
    pub status: QuoteStatus,
    /// Unix milliseconds
    pub created_at: i64,
}

impl QuoteDraft {
    pub fn new(
        client: impl Into<String>,
        trial: bool,
        request: QuoteRequest,
        quote: &Quote,
        rate_card_fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            client: client.into(),
            trial,
            request,
            summary: QuoteSummary::from(quote),
            rate_card_fingerprint: rate_card_fingerprint.into(),
            status: QuoteStatus::Draft,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(QuoteStatus::Draft.can_transition_to(QuoteStatus::Sent));
        assert!(QuoteStatus::Sent.can_transition_to(QuoteStatus::Accepted));
        assert!(QuoteStatus::Sent.can_transition_to(QuoteStatus::Lost));
        assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Accepted));
        assert!(!QuoteStatus::Lost.can_transition_to(QuoteStatus::Sent));
    }
}
