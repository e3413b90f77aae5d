//! Notification review commands.

use std::io::Write;

use clap::Subcommand;
use shopdesk_admin::Console;
use shopdesk_core::NotificationId;

use super::{CliError, require_login};
use crate::render;

#[derive(Subcommand)]
pub enum NotificationsAction {
    /// List every notification
    List,
    /// Show one notification
    Show { id: NotificationId },
    /// Delete a notification
    Delete { id: NotificationId },
}

pub async fn run(
    console: &mut Console,
    action: NotificationsAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    require_login(console)?;

    match action {
        NotificationsAction::List => {
            console.load_notifications().await?;
            render::notifications(out, console.state().notifications())?;
        }
        NotificationsAction::Show { id } => {
            console.load_notifications().await?;
            if console.state().notification(&id).is_none() {
                return Err(CliError::NotFound {
                    kind: "Notification",
                    id: id.into_inner(),
                });
            }
            console.selection_mut().notification = Some(id.clone());
            if let Some(notification) = console.state().notification(&id) {
                render::notification_detail(out, notification)?;
            }
        }
        NotificationsAction::Delete { id } => {
            console.delete_notification(&id).await?;
        }
    }
    Ok(())
}
