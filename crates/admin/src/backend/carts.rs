//! Cart listing, deletion, and status changes.

use serde::Serialize;
use shopdesk_core::{Cart, CartId, CartStatus};
use tracing::instrument;

use super::{BackendClient, BackendError, routes};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartStatusRequest<'a> {
    cart_id: &'a CartId,
    status: CartStatus,
}

impl BackendClient {
    /// List every cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn list_carts(&self) -> Result<Vec<Cart>, BackendError> {
        let mut envelope = self.get(routes::ALL_CARTS).await?;
        envelope.take("carts")
    }

    /// Delete a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self), fields(cart_id = %id))]
    pub async fn delete_cart(&self, id: &CartId) -> Result<String, BackendError> {
        let envelope = self
            .post_json_item(routes::DELETE_CART, id.as_str(), &serde_json::Map::new())
            .await?;
        Ok(envelope.message_or("Cart deleted"))
    }

    /// Move a cart to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, status), fields(cart_id = %id, status = %status))]
    pub async fn set_cart_status(
        &self,
        id: &CartId,
        status: CartStatus,
    ) -> Result<String, BackendError> {
        let body = CartStatusRequest {
            cart_id: id,
            status,
        };
        let envelope = self.post_json(routes::CHANGE_CART_STATUS, &body).await?;
        Ok(envelope.message_or("Cart status updated"))
    }
}
