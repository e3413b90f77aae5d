//! The read-only dashboard aggregate.

use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// A recently registered customer shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardUser {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
}

/// Record counts and latest users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSnapshot {
    #[serde(rename = "qproducts", deserialize_with = "null_as_default")]
    pub products: u64,
    #[serde(rename = "qcarts", deserialize_with = "null_as_default")]
    pub carts: u64,
    #[serde(rename = "qcomments", deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(rename = "users", deserialize_with = "null_as_default")]
    pub latest_users: Vec<DashboardUser>,
}

impl DashboardSnapshot {
    /// `(label, count)` pairs in chart order.
    #[must_use]
    pub fn counts(&self) -> [(&'static str, u64); 3] {
        [
            ("Products", self.products),
            ("Carts", self.carts),
            ("Comments", self.comments),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dashboard() {
        let dash: DashboardSnapshot = serde_json::from_str(
            r#"{"qproducts": 42, "qcarts": 7, "qcomments": 19,
                "users": [{"name": "Lan", "email": "lan@example.com", "image": ""}]}"#,
        )
        .unwrap();
        assert_eq!(dash.counts(), [("Products", 42), ("Carts", 7), ("Comments", 19)]);
        assert_eq!(dash.latest_users.len(), 1);
    }
}
