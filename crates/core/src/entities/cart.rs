//! Customer carts (orders awaiting fulfillment).

use serde::{Deserialize, Serialize};

use crate::types::{CartId, CartStatus, Price, UserId};

use super::lenient::null_as_default;

/// The product snapshot stored on a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartItem {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// A customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cart {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: CartId,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub item_data: CartItem,
    #[serde(deserialize_with = "null_as_default")]
    pub total_items: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total_price: Price,
    #[serde(deserialize_with = "null_as_default")]
    pub status: CartStatus,
}

impl Cart {
    /// Notification text sent to the owner after a status change.
    #[must_use]
    pub fn status_changed_message(&self, status: CartStatus) -> String {
        format!(
            "The cart (id: #{}) that has {} item(s) of {} was updated to {status} by admin.",
            self.id, self.total_items, self.item_data.name
        )
    }

    /// Notification text sent to the owner after the cart is deleted.
    #[must_use]
    pub fn deleted_message(&self) -> String {
        format!(
            "The cart (id: #{}) that has {} item(s) of {} you ordered has been deleted by admin.",
            self.id, self.total_items, self.item_data.name
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn phone_cart() -> Cart {
        serde_json::from_str(
            r#"{
                "_id": "c1",
                "userId": "u7",
                "itemData": {"name": "Phone X", "image_url": "x.png"},
                "totalItems": 2,
                "totalPrice": 39980000,
                "status": "processing"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_cart() {
        let cart = phone_cart();
        assert_eq!(cart.id.as_str(), "c1");
        assert_eq!(cart.user_id.as_str(), "u7");
        assert_eq!(cart.total_items, 2);
        assert_eq!(cart.status, CartStatus::Processing);
    }

    #[test]
    fn test_null_item_data_defaults() {
        let cart: Cart = serde_json::from_str(
            r#"{"_id": "c2", "userId": "u2", "itemData": null, "totalItems": null, "status": null}"#,
        )
        .unwrap();
        assert!(cart.item_data.name.is_empty());
        assert_eq!(cart.total_items, 0);
        assert_eq!(cart.status, CartStatus::Processing);
    }

    #[test]
    fn test_status_changed_message() {
        let text = phone_cart().status_changed_message(CartStatus::Shipped);
        assert_eq!(
            text,
            "The cart (id: #c1) that has 2 item(s) of Phone X was updated to shipped by admin."
        );
    }

    #[test]
    fn test_deleted_message() {
        let text = phone_cart().deleted_message();
        assert!(text.contains("2 item(s) of Phone X"));
        assert!(text.ends_with("has been deleted by admin."));
    }
}
