//! Status enums for backend records.

use serde::{Deserialize, Serialize};

/// Fulfillment status of a cart (an order, in backend terms).
///
/// Serialized in lowercase, exactly as the backend stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    #[default]
    Processing,
    Shipped,
    Cancelled,
}

impl CartStatus {
    /// The wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CartStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!(
                "invalid cart status: {s} (expected processing, shipped, or cancelled)"
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&CartStatus::Shipped).unwrap(),
            "\"shipped\""
        );
        let parsed: CartStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, CartStatus::Cancelled);
    }

    #[test]
    fn test_cart_status_from_str() {
        assert_eq!("Shipped".parse::<CartStatus>(), Ok(CartStatus::Shipped));
        assert_eq!("canceled".parse::<CartStatus>(), Ok(CartStatus::Cancelled));
        assert!("lost".parse::<CartStatus>().is_err());
    }
}
