//! Currency arithmetic helpers
//!
//! Every currency figure is a `Decimal` rounded half-up to cents. Storage and
//! bandwidth overage is always billed in whole blocks.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

/// Round to cents, half away from zero
#[inline]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Excess of `required` over `included`, never negative
#[inline]
pub fn excess(required: Decimal, included: Decimal) -> Decimal {
    (required.max(Decimal::ZERO) - included).max(Decimal::ZERO)
}

/// Number of whole blocks needed to cover `excess`
///
/// A fraction of a block is billed as a full block. Quantities are bounded
/// at the engine boundary, so the count always fits in a `u64`.
pub fn blocks(excess: Decimal, block_size: Decimal) -> u64 {
    if excess <= Decimal::ZERO || block_size <= Decimal::ZERO {
        return 0;
    }
    (excess / block_size).ceil().to_u64().unwrap_or(u64::MAX)
}

/// Deserialize an integer count, clamping negatives and null to zero
pub fn non_negative_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw
        .map(|v| v.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0))
}

/// Deserialize a quantity, clamping negatives and null to zero
pub fn non_negative_quantity<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Decimal>::deserialize(deserializer)?;
    Ok(raw.unwrap_or(Decimal::ZERO).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round2(dec!(10.005)), dec!(10.01));
        assert_eq!(round2(dec!(10.004)), dec!(10.00));
        assert_eq!(round2(dec!(833.333333)), dec!(833.33));
        assert_eq!(round2(dec!(1041.666666)), dec!(1041.67));
    }

    #[test]
    fn test_excess_clamps() {
        assert_eq!(excess(dec!(5), dec!(2)), dec!(3));
        assert_eq!(excess(dec!(1), dec!(2)), Decimal::ZERO);
        assert_eq!(excess(dec!(-4), dec!(2)), Decimal::ZERO);
    }

    #[test]
    fn test_block_ceiling() {
        assert_eq!(blocks(dec!(0.1), dec!(1)), 1);
        assert_eq!(blocks(dec!(1.0), dec!(1)), 1);
        assert_eq!(blocks(dec!(1.01), dec!(1)), 2);
        assert_eq!(blocks(dec!(3), dec!(2)), 2);
        assert_eq!(blocks(dec!(500), dec!(500)), 1);
        assert_eq!(blocks(dec!(501), dec!(500)), 2);
        assert_eq!(blocks(Decimal::ZERO, dec!(500)), 0);
    }
}
