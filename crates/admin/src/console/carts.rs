//! Cart management screen.

use shopdesk_core::{CartId, CartStatus};

use super::{Console, ConsoleError, MutationOutcome, NotificationDelivery};
use crate::state::Collection;

impl Console {
    /// Fetch every cart.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the fetch fails.
    pub async fn load_carts(&mut self) -> Result<(), ConsoleError> {
        self.ensure_authenticated()?;
        let ticket = self.state.begin_fetch(Collection::Carts);
        match self.client.list_carts().await {
            Ok(carts) => {
                let count = carts.len();
                self.state.apply_carts(ticket, carts);
                self.succeed(format!("Loaded {count} carts"));
                Ok(())
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Change a cart's status, then tell its owner.
    ///
    /// The notification is only attempted after the backend confirms the
    /// status change, and its failure does not undo the change. The owner
    /// and item details come from the loaded carts; if the cart is not
    /// loaded the notification is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the status change fails.
    pub async fn set_cart_status(
        &mut self,
        id: &CartId,
        status: CartStatus,
    ) -> Result<MutationOutcome, ConsoleError> {
        self.ensure_authenticated()?;
        let cart = self.state.cart(id).cloned();

        let message = match self.client.set_cart_status(id, status).await {
            Ok(message) => message,
            Err(e) => return Err(self.backend_failure(e).await),
        };
        self.state.set_cart_status(id, status);
        self.succeed(message.clone());

        let notification = match cart {
            Some(cart) => {
                self.notify_customer(&cart.user_id, cart.status_changed_message(status))
                    .await
            }
            None => {
                tracing::warn!(cart_id = %id, "Cart not loaded, owner not notified");
                NotificationDelivery::Skipped
            }
        };

        Ok(MutationOutcome {
            message,
            notification,
        })
    }

    /// Delete a cart, drop it locally, then tell its owner.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the deletion fails.
    pub async fn delete_cart(&mut self, id: &CartId) -> Result<MutationOutcome, ConsoleError> {
        self.ensure_authenticated()?;
        let cart = self.state.cart(id).cloned();

        let message = match self.client.delete_cart(id).await {
            Ok(message) => message,
            Err(e) => return Err(self.backend_failure(e).await),
        };
        self.state.remove_cart(id);
        self.succeed(message.clone());

        let notification = match cart {
            Some(cart) => {
                self.notify_customer(&cart.user_id, cart.deleted_message())
                    .await
            }
            None => {
                tracing::warn!(cart_id = %id, "Cart not loaded, owner not notified");
                NotificationDelivery::Skipped
            }
        };

        Ok(MutationOutcome {
            message,
            notification,
        })
    }
}
