//! Quantity classification for relocation input.
//!
//! The save path distinguishes three outcomes rather than a single
//! pass/fail: a positive quantity proceeds, an exact zero is a distinct
//! "nothing to do" advisory (no record written, not an error), and a
//! negative or unparseable value is rejected.

use rust_decimal::Decimal;

/// Result of classifying a raw quantity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityCheck {
    /// Strictly positive; the relocation may be written.
    Positive(Decimal),
    /// Exactly zero; nothing to do.
    Zero,
    /// Negative or not a number.
    Rejected,
}

/// Classify a raw quantity value from client input.
pub fn classify_quantity(raw: &str) -> QuantityCheck {
    match raw.trim().parse::<Decimal>() {
        Ok(qty) if qty.is_zero() => QuantityCheck::Zero,
        Ok(qty) if qty > Decimal::ZERO => QuantityCheck::Positive(qty),
        Ok(_) => QuantityCheck::Rejected,
        Err(_) => QuantityCheck::Rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn positive_integer_quantity() {
        assert_eq!(classify_quantity("5"), QuantityCheck::Positive(dec!(5)));
    }

    #[test]
    fn positive_fractional_quantity() {
        assert_eq!(
            classify_quantity("2.50"),
            QuantityCheck::Positive(dec!(2.50))
        );
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(classify_quantity(" 3 "), QuantityCheck::Positive(dec!(3)));
    }

    #[test]
    fn zero_is_its_own_outcome() {
        assert_eq!(classify_quantity("0"), QuantityCheck::Zero);
        assert_eq!(classify_quantity("0.0"), QuantityCheck::Zero);
    }

    #[test]
    fn negative_is_rejected() {
        assert_eq!(classify_quantity("-1"), QuantityCheck::Rejected);
        assert_eq!(classify_quantity("-0.01"), QuantityCheck::Rejected);
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(classify_quantity("five"), QuantityCheck::Rejected);
        assert_eq!(classify_quantity(""), QuantityCheck::Rejected);
    }
}
