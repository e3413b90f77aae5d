//! Console commands, one module per screen.

pub mod carts;
pub mod comments;
pub mod dashboard;
pub mod notifications;
pub mod products;
pub mod session;

use std::io::Write;

use shopdesk_admin::{
    AuthGate, BackendError, ConfigError, Console, ConsoleError, NotificationDelivery,
};
use thiserror::Error;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Already reported as a notice.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// Reading a local file for upload failed.
    #[error(transparent)]
    Upload(#[from] BackendError),

    #[error("Not logged in (run `shopdesk login` first)")]
    NotLoggedIn,

    #[error("No password given (use --password or set SHOPDESK_PASSWORD)")]
    MissingPassword,

    #[error("{kind} {id} is not in the loaded list")]
    NotFound { kind: &'static str, id: String },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Whether the console already emitted a notice for this error.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Console(_))
    }
}

/// Stop early when logged out.
///
/// The console checks this too; checking here keeps commands from doing
/// local work (like reading an image) before failing.
pub(crate) fn require_login(console: &Console) -> Result<(), CliError> {
    match console.gate() {
        AuthGate::Authenticated => Ok(()),
        AuthGate::Unauthenticated => Err(CliError::NotLoggedIn),
    }
}

/// Say whether the customer behind a mutation heard about it.
pub(crate) fn report_delivery(
    out: &mut impl Write,
    recipient: &str,
    delivery: &NotificationDelivery,
) -> std::io::Result<()> {
    match delivery {
        NotificationDelivery::Sent => writeln!(out, "{recipient} notified."),
        NotificationDelivery::Failed(reason) => {
            writeln!(out, "{recipient} not notified: {reason}")
        }
        NotificationDelivery::Skipped => writeln!(
            out,
            "{recipient} not notified: no recipient known (record not loaded or has no user id)."
        ),
    }
}
