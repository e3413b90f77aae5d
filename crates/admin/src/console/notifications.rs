//! Notification review screen.

use shopdesk_core::NotificationId;

use super::{Console, ConsoleError};
use crate::state::Collection;

impl Console {
    /// Fetch every notification.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the fetch fails.
    pub async fn load_notifications(&mut self) -> Result<(), ConsoleError> {
        self.ensure_authenticated()?;
        let ticket = self.state.begin_fetch(Collection::Notifications);
        match self.client.list_notifications().await {
            Ok(notifications) => {
                let count = notifications.len();
                self.state.apply_notifications(ticket, notifications);
                self.succeed(format!("Loaded {count} notifications"));
                Ok(())
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Delete a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend refuses the deletion.
    pub async fn delete_notification(&mut self, id: &NotificationId) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        match self.client.delete_notification(id).await {
            Ok(message) => {
                self.state.remove_notification(id);
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }
}
