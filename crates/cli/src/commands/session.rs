//! Login, logout, and session status.

use std::io::Write;

use secrecy::SecretString;
use shopdesk_admin::{AuthGate, Console};

use super::CliError;

/// Log in with `password`, or `SHOPDESK_PASSWORD` when none is given.
pub async fn login(
    console: &mut Console,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = password
        .or_else(|| std::env::var("SHOPDESK_PASSWORD").ok())
        .filter(|p| !p.is_empty())
        .map(SecretString::from)
        .ok_or(CliError::MissingPassword)?;

    console.login(email, &password).await?;
    Ok(())
}

pub async fn logout(console: &mut Console) -> Result<(), CliError> {
    console.logout().await?;
    Ok(())
}

pub fn status(console: &Console, out: &mut impl Write) -> Result<(), CliError> {
    let gate = match console.gate() {
        AuthGate::Authenticated => "logged in",
        AuthGate::Unauthenticated => "logged out",
    };
    writeln!(out, "Backend: {}", console.config().backend_url)?;
    writeln!(out, "Session: {gate}")?;
    if let Some(path) = console.session().path() {
        writeln!(out, "Stored:  {}", path.display())?;
    }
    Ok(())
}
