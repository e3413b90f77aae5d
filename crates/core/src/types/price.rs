//! Type-safe price representation using decimal arithmetic.
//!
//! The backend sends prices as bare JSON numbers in Vietnamese dong. They are
//! kept as [`Decimal`] so that formatting never shows float noise.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency suffix used when rendering prices.
pub const CURRENCY_SUFFIX: &str = "VNĐ";

/// A price in the store currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero (never valid in a product form).
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// The amount as it is sent in a multipart form field.
    #[must_use]
    pub fn to_form_value(&self) -> String {
        self.0.normalize().to_string()
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Decimal>().map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SUFFIX}", self.0.normalize())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_from_json_number() {
        let price: Price = serde_json::from_str("25990000").unwrap();
        assert_eq!(price.to_form_value(), "25990000");

        let price: Price = serde_json::from_str("199.50").unwrap();
        assert_eq!(price.to_form_value(), "199.5");
    }

    #[test]
    fn test_display_has_currency_suffix() {
        let price: Price = "1200000".parse().unwrap();
        assert_eq!(price.to_string(), "1200000 VNĐ");
    }

    #[test]
    fn test_negative_detection() {
        assert!("-1".parse::<Price>().unwrap().is_negative());
        assert!(!"0".parse::<Price>().unwrap().is_negative());
    }
}
