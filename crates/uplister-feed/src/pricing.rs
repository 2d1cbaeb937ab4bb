//! Pricing derivation: feed price → base (cost) → list → compare-at.
//!
//! Convention: the raw feed price is denominated in the source-market local
//! currency and the exchange rate is local-currency-per-USD, so
//! `base = raw / rate`. Every derived value is rounded to 2 decimal places
//! *after* computation.

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("exchange rate must be positive, got {rate}")]
    InvalidRate { rate: Decimal },

    #[error("raw price must be non-negative, got {price}")]
    NegativeRawPrice { price: Decimal },
}

/// The three derived price fields of a normalized product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedPrices {
    pub list_price: Decimal,
    pub cost_price: Decimal,
    pub compare_at_price: Decimal,
}

/// Markup rule threshold: below this base, add; at or above, double.
fn markup_threshold() -> Decimal {
    Decimal::new(20, 0)
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a raw local-currency price into the reference-currency base.
///
/// Deterministic: the same `(price, rate)` pair always yields the same base.
///
/// # Errors
///
/// Returns [`PricingError::InvalidRate`] for a non-positive rate and
/// [`PricingError::NegativeRawPrice`] for a negative price.
pub fn base_price(price: Decimal, rate: Decimal) -> Result<Decimal, PricingError> {
    if rate <= Decimal::ZERO {
        return Err(PricingError::InvalidRate { rate });
    }
    if price < Decimal::ZERO {
        return Err(PricingError::NegativeRawPrice { price });
    }
    Ok(round2(price / rate))
}

/// Applies the markup rule to a base price.
///
/// `base < 20.00` → `base + 20.00`; otherwise `base × 2`. The comparison is
/// strict, so a base of exactly 20.00 doubles.
#[must_use]
pub fn list_price(base: Decimal) -> Decimal {
    let threshold = markup_threshold();
    if base < threshold {
        round2(base + threshold)
    } else {
        round2(base * Decimal::TWO)
    }
}

/// Derives all three prices from an already-converted base.
///
/// The compare-at markup is drawn uniformly from [5.00, 20.00) in whole
/// cents; given the same draw the result is identical.
pub fn derive_prices<R: Rng + ?Sized>(base: Decimal, rng: &mut R) -> DerivedPrices {
    let list = list_price(base);
    let markup_cents = rng.random_range(500..2000_i64);
    let compare_at = round2(list + Decimal::new(markup_cents, 2));
    DerivedPrices {
        list_price: list,
        cost_price: base,
        compare_at_price: compare_at,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn base_price_divides_by_rate_and_rounds() {
        assert_eq!(base_price(dec("100"), dec("32.5")).unwrap(), dec("3.08"));
    }

    #[test]
    fn base_price_is_deterministic() {
        let a = base_price(dec("749.90"), dec("32.17")).unwrap();
        let b = base_price(dec("749.90"), dec("32.17")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn base_price_rejects_zero_rate() {
        let err = base_price(dec("10"), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, PricingError::InvalidRate { .. }));
    }

    #[test]
    fn base_price_rejects_negative_rate() {
        let err = base_price(dec("10"), dec("-1")).unwrap_err();
        assert!(matches!(err, PricingError::InvalidRate { .. }));
    }

    #[test]
    fn base_price_rejects_negative_price() {
        let err = base_price(dec("-0.01"), dec("32")).unwrap_err();
        assert!(matches!(err, PricingError::NegativeRawPrice { .. }));
    }

    #[test]
    fn base_price_zero_is_allowed() {
        assert_eq!(base_price(Decimal::ZERO, dec("32")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn list_price_below_threshold_adds_twenty() {
        assert_eq!(list_price(dec("19.99")), dec("39.99"));
        assert_eq!(list_price(dec("0.00")), dec("20.00"));
        assert_eq!(list_price(dec("3.08")), dec("23.08"));
    }

    #[test]
    fn list_price_at_threshold_doubles() {
        // Strict `<`: exactly 20.00 takes the ×2 branch.
        assert_eq!(list_price(dec("20.00")), dec("40.00"));
    }

    #[test]
    fn list_price_above_threshold_doubles() {
        assert_eq!(list_price(dec("20.01")), dec("40.02"));
        assert_eq!(list_price(dec("125.50")), dec("251.00"));
    }

    #[test]
    fn derive_prices_cost_is_the_base() {
        let mut rng = StdRng::seed_from_u64(7);
        let prices = derive_prices(dec("24.90"), &mut rng);
        assert_eq!(prices.cost_price, dec("24.90"));
        assert_eq!(prices.list_price, dec("49.80"));
    }

    #[test]
    fn derive_prices_markup_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let prices = derive_prices(dec("10.00"), &mut rng);
            let markup = prices.compare_at_price - prices.list_price;
            assert!(markup >= dec("5.00"), "markup {markup} below 5.00");
            assert!(markup < dec("20.00"), "markup {markup} not below 20.00");
        }
    }

    #[test]
    fn derive_prices_same_seed_same_draw() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            derive_prices(dec("18.00"), &mut a),
            derive_prices(dec("18.00"), &mut b)
        );
    }

    #[test]
    fn derive_prices_all_values_have_two_decimal_places() {
        let mut rng = StdRng::seed_from_u64(3);
        let prices = derive_prices(dec("7.77"), &mut rng);
        assert!(prices.list_price.scale() <= 2);
        assert!(prices.cost_price.scale() <= 2);
        assert!(prices.compare_at_price.scale() <= 2);
    }

    #[test]
    fn derive_prices_never_negative() {
        let mut rng = StdRng::seed_from_u64(11);
        let prices = derive_prices(Decimal::ZERO, &mut rng);
        assert!(prices.cost_price >= Decimal::ZERO);
        assert!(prices.list_price >= Decimal::ZERO);
        assert!(prices.compare_at_price >= Decimal::ZERO);
    }
}
