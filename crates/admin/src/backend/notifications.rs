//! Customer notifications.

use serde::Serialize;
use shopdesk_core::{Notification, NotificationDraft, NotificationId};
use tracing::instrument;

use super::{BackendClient, BackendError, routes};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationRef<'a> {
    notification_id: &'a NotificationId,
}

impl BackendClient {
    /// List every notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, BackendError> {
        let mut envelope = self.get(routes::ALL_NOTIFICATIONS).await?;
        envelope.take("data")
    }

    /// Delete a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self), fields(notification_id = %id))]
    pub async fn delete_notification(&self, id: &NotificationId) -> Result<String, BackendError> {
        let body = NotificationRef {
            notification_id: id,
        };
        let envelope = self.post_json(routes::DELETE_NOTIFICATION, &body).await?;
        Ok(envelope.message_or("Delete successfully"))
    }

    /// Create a notification for a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, draft), fields(user_id = %draft.user_id))]
    pub async fn create_notification(&self, draft: &NotificationDraft) -> Result<String, BackendError> {
        let envelope = self.post_json(routes::CREATE_NOTIFICATION, draft).await?;
        Ok(envelope.message_or("Notification sent"))
    }
}
