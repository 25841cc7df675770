//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices are strictly positive; modifier price adjustments are plain
//! [`Decimal`] values and may be negative (discount-style modifiers).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is zero or negative.
    #[error("price must be positive (got {0})")]
    NotPositive(Decimal),
}

/// A menu price in the restaurant's currency.
///
/// The wrapped amount is in the currency's standard unit (e.g., dollars,
/// not cents) and is guaranteed positive by [`Price::new`]. Values decoded
/// from the database or the wire are assumed valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price, validating positivity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotPositive`] if `amount <= 0`.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive(amount));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Compute a cart line total: `(price + adjustment_sum) * quantity`.
    ///
    /// `adjustment_sum` is the sum of the selected modifier price
    /// adjustments; it may push the effective unit price below the base
    /// price but the result is whatever the arithmetic yields - the cart
    /// does not re-validate positivity of configured lines.
    #[must_use]
    pub fn line_total(&self, adjustment_sum: Decimal, quantity: u32) -> Decimal {
        (self.0 + adjustment_sum) * Decimal::from(quantity)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_rejects_zero_and_negative() {
        assert!(Price::new(Decimal::ZERO).is_err());
        assert!(Price::new(dec("-1.50")).is_err());
        assert!(Price::new(dec("0.01")).is_ok());
    }

    #[test]
    fn test_line_total() {
        let price = Price::new(dec("12.50")).unwrap();
        // (12.50 + 1.25) * 3
        assert_eq!(price.line_total(dec("1.25"), 3), dec("41.25"));
    }

    #[test]
    fn test_line_total_no_modifiers() {
        let price = Price::new(dec("4.00")).unwrap();
        assert_eq!(price.line_total(Decimal::ZERO, 2), dec("8.00"));
    }

    #[test]
    fn test_display_two_places() {
        let price = Price::new(dec("7.5")).unwrap();
        assert_eq!(price.to_string(), "7.50");
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::new(dec("9.99")).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
