//! The admin console.
//!
//! [`Console`] is what the screens talk to. It owns the session, the backend
//! client, and the view state, and is the only writer of the view state.
//!
//! Every operation follows the same shape:
//!
//! 1. check the authentication gate and any client-side preconditions
//! 2. issue the backend call
//! 3. emit one success or failure [`Notice`]
//! 4. on success, replace or patch the view state
//!
//! Failures are returned as [`ConsoleError`] so the caller can decide whether
//! to go on; the view state is left as it was.

mod carts;
mod comments;
mod dashboard;
mod notifications;
mod products;

use std::sync::Arc;

use chrono::Utc;
use secrecy::SecretString;
use shopdesk_core::{Email, EmailError, NotificationDraft, UserId};
use thiserror::Error;

use crate::backend::{BackendClient, BackendError};
use crate::config::AdminConfig;
use crate::forms::FormError;
use crate::notices::{Notice, NoticeSink};
use crate::session::{AuthGate, SessionError, SessionStore};
use crate::state::{Selection, ViewState};

/// Errors surfaced by console operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error("Not logged in")]
    NotAuthenticated,
}

impl ConsoleError {
    /// Whether the failure came from the backend rejecting the admin token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Backend(e) if e.is_unauthorized())
    }
}

/// Whether the follow-up notification of a two-step operation went out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationDelivery {
    Sent,
    /// The notification call failed; the primary change stands.
    Failed(String),
    /// There was nobody to notify (the record was not loaded, or has no owner).
    Skipped,
}

impl NotificationDelivery {
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Result of a mutation followed by a best-effort customer notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// The backend's message for the primary call.
    pub message: String,
    pub notification: NotificationDelivery,
}

/// The admin console.
pub struct Console {
    config: AdminConfig,
    client: BackendClient,
    session: SessionStore,
    state: ViewState,
    notices: Arc<dyn NoticeSink>,
}

impl Console {
    /// Open the console with the session persisted at the configured path.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be read or the HTTP
    /// client cannot be built.
    pub async fn open(config: AdminConfig, notices: Arc<dyn NoticeSink>) -> Result<Self, ConsoleError> {
        let session = SessionStore::load(&config.session_file)?;
        Self::with_session(config, session, notices).await
    }

    /// Open the console over an existing session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub async fn with_session(
        config: AdminConfig,
        session: SessionStore,
        notices: Arc<dyn NoticeSink>,
    ) -> Result<Self, ConsoleError> {
        let client = BackendClient::new(config.backend_url.clone(), config.request_timeout)?;
        if let Some(token) = session.token() {
            client.set_token(token.clone()).await;
        }

        tracing::debug!(backend = %config.backend_url, gate = ?session.gate(), "Console opened");
        Ok(Self {
            config,
            client,
            session,
            state: ViewState::new(),
            notices,
        })
    }

    #[must_use]
    pub const fn gate(&self) -> AuthGate {
        self.session.gate()
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Change the product search term.
    pub fn set_search(&mut self, raw: &str) {
        self.state.set_search(raw);
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.state.selection
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in and persist the token.
    ///
    /// Any previous session is dropped first, so a failed login always
    /// leaves the console logged out.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is malformed, the backend refuses the
    /// credentials, or the token cannot be persisted.
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<(), ConsoleError> {
        self.end_session().await;

        let email = Email::parse(email).map_err(|e| self.fail(e))?;
        let token = match self.client.login(&email, password).await {
            Ok(token) => token,
            Err(e) => return Err(self.fail(e)),
        };

        self.session.set_token(token.clone()).map_err(|e| self.fail(e))?;
        self.client.set_token(token).await;

        tracing::info!(email = %email, "Logged in");
        self.succeed("Login successful");
        Ok(())
    }

    /// Log out: forget the token in memory and in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be removed. The in-memory
    /// session is cleared regardless.
    pub async fn logout(&mut self) -> Result<(), ConsoleError> {
        self.client.clear_token().await;
        self.state.reset();
        self.session.clear().map_err(|e| self.fail(e))?;

        tracing::info!("Logged out");
        self.succeed("Logged out");
        Ok(())
    }

    /// Clear every trace of the session, logging rather than reporting
    /// storage errors.
    async fn end_session(&mut self) {
        self.client.clear_token().await;
        self.state.reset();
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Failed to remove session file");
        }
    }

    // =========================================================================
    // Shared plumbing
    // =========================================================================

    fn ensure_authenticated(&self) -> Result<(), ConsoleError> {
        if self.gate().is_authenticated() {
            Ok(())
        } else {
            Err(self.fail(ConsoleError::NotAuthenticated))
        }
    }

    fn succeed(&self, message: impl Into<String>) {
        self.notices.push(Notice::success(message));
    }

    /// Report a failure that needs no further handling.
    fn fail(&self, err: impl Into<ConsoleError>) -> ConsoleError {
        let err = err.into();
        self.notices.push(Notice::error(err.to_string()));
        err
    }

    /// Report a backend failure, ending the session if the backend rejected
    /// the token and the console is configured to react to that.
    async fn backend_failure(&mut self, err: BackendError) -> ConsoleError {
        let err = self.fail(err);
        if err.is_unauthorized() && self.config.logout_on_unauthorized {
            tracing::warn!(error = %err, "Backend rejected the admin token, logging out");
            self.end_session().await;
        }
        err
    }

    /// Best-effort customer notification following a confirmed mutation.
    async fn notify_customer(&mut self, user_id: &UserId, text: String) -> NotificationDelivery {
        if user_id.as_str().is_empty() {
            tracing::warn!("No customer to notify");
            return NotificationDelivery::Skipped;
        }

        let draft = NotificationDraft::new(user_id.clone(), text, Utc::now());
        match self.client.create_notification(&draft).await {
            Ok(_) => {
                tracing::debug!(user_id = %user_id, "Customer notified");
                NotificationDelivery::Sent
            }
            Err(e) => {
                let err = self.backend_failure(e).await;
                NotificationDelivery::Failed(err.to_string())
            }
        }
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("client", &self.client)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notices::NoticeLog;

    fn config() -> AdminConfig {
        AdminConfig::for_backend(
            url::Url::parse("http://127.0.0.1:9/").unwrap(),
            std::path::PathBuf::from("unused.json"),
        )
    }

    async fn console(log: &NoticeLog) -> Console {
        Console::with_session(config(), SessionStore::in_memory(), Arc::new(log.clone()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_operations_require_login() {
        let log = NoticeLog::new();
        let mut console = console(&log).await;

        let err = console.load_carts().await.unwrap_err();
        assert!(matches!(err, ConsoleError::NotAuthenticated));
        assert_eq!(log.drain(), vec![Notice::error("Not logged in")]);
    }

    #[tokio::test]
    async fn test_malformed_email_never_reaches_backend() {
        let log = NoticeLog::new();
        let mut console = console(&log).await;

        let err = console
            .login("not-an-email", &SecretString::from("pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Email(_)));
        assert_eq!(console.gate(), AuthGate::Unauthenticated);
        assert_eq!(log.drain().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let log = NoticeLog::new();
        let mut session = SessionStore::in_memory();
        session.set_token(SecretString::from("tok")).unwrap();
        let mut console = Console::with_session(config(), session, Arc::new(log.clone()))
            .await
            .unwrap();
        assert!(console.gate().is_authenticated());

        console.logout().await.unwrap();
        assert_eq!(console.gate(), AuthGate::Unauthenticated);
        assert!(console.session().token().is_none());
        assert_eq!(log.drain(), vec![Notice::success("Logged out")]);
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ConsoleError::from(BackendError::Unauthorized("jwt expired".to_string()));
        assert!(err.is_unauthorized());
        assert!(!ConsoleError::NotAuthenticated.is_unauthorized());
    }
}
