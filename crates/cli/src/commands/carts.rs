//! Cart management commands.

use std::io::Write;

use clap::Subcommand;
use shopdesk_admin::{Console, MutationOutcome};
use shopdesk_core::{CartId, CartStatus};

use super::{CliError, report_delivery, require_login};
use crate::render;

#[derive(Subcommand)]
pub enum CartsAction {
    /// List every cart
    List,
    /// Change a cart's status and notify its owner
    Status {
        id: CartId,
        /// processing, shipped, or cancelled
        status: CartStatus,
    },
    /// Delete a cart and notify its owner
    Delete { id: CartId },
}

pub async fn run(console: &mut Console, action: CartsAction, out: &mut impl Write) -> Result<(), CliError> {
    require_login(console)?;
    // Every action needs the carts loaded: listing shows them, mutations
    // read the owner and item from them for the notification.
    console.load_carts().await?;

    match action {
        CartsAction::List => render::carts(out, console.state().carts())?,
        CartsAction::Status { id, status } => {
            let outcome = console.set_cart_status(&id, status).await?;
            report(out, &outcome)?;
        }
        CartsAction::Delete { id } => {
            let outcome = console.delete_cart(&id).await?;
            report(out, &outcome)?;
        }
    }
    Ok(())
}

fn report(out: &mut impl Write, outcome: &MutationOutcome) -> Result<(), CliError> {
    report_delivery(out, "Owner", &outcome.notification)?;
    Ok(())
}
