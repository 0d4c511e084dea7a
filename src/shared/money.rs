//! Money helpers
//!
//! Amounts are exact `Decimal`s with two fractional digits. The database
//! stores them as integer minor units (1/100 of the currency).

use rust_decimal::prelude::*;

use crate::shared::DomainError;

/// Fractional digits kept for every stored amount
pub const DECIMAL_PLACES: u32 = 2;

/// Round half away from zero to two decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert minor units (e.g. paise) into a decimal amount.
pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, DECIMAL_PLACES)
}

/// Convert a decimal amount into minor units, rounding first.
pub fn to_minor_units(value: Decimal) -> Result<i64, DomainError> {
    (round_money(value) * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("Amount {} is out of range", value)))
}

/// Reject zero, negative and over-precise amounts entered by users.
pub fn require_positive_amount(value: Decimal) -> Result<Decimal, DomainError> {
    if value <= Decimal::ZERO {
        return Err(DomainError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if value.scale() > DECIMAL_PLACES && value != round_money(value) {
        return Err(DomainError::Validation(
            "Amount can have at most two decimal places".to_string(),
        ));
    }
    Ok(round_money(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(round_money(Decimal::new(12344, 3)), Decimal::new(1234, 2));
    }

    #[test]
    fn minor_units_conversion() {
        assert_eq!(from_minor_units(90000), Decimal::from(900));
        assert_eq!(to_minor_units(Decimal::new(4050, 2)).unwrap(), 4050);
        assert_eq!(to_minor_units(Decimal::new(10, 3)).unwrap(), 1);
    }

    #[test]
    fn positive_amount_rules() {
        assert!(require_positive_amount(Decimal::ZERO).is_err());
        assert!(require_positive_amount(Decimal::from(-5)).is_err());
        assert!(require_positive_amount(Decimal::new(1001, 3)).is_err());
        assert_eq!(
            require_positive_amount(Decimal::new(2500, 3)).unwrap(),
            Decimal::new(250, 2)
        );
    }
}
