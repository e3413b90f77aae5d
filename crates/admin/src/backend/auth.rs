//! Admin login.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use shopdesk_core::Email;
use tracing::instrument;

use super::{BackendClient, BackendError, routes};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl BackendClient {
    /// Exchange admin credentials for a token.
    ///
    /// Does not store the token; the caller decides where it goes.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` with the backend's message when the
    /// credentials are refused, or a decode error when the backend reports
    /// success without a usable token.
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<SecretString, BackendError> {
        let body = LoginRequest {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let mut envelope = self.post_json_anonymous(routes::LOGIN, &body).await?;

        let token: String = envelope.take("token")?;
        if token.trim().is_empty() {
            return Err(BackendError::Decode("empty token in login response".to_string()));
        }

        tracing::info!("Admin login accepted");
        Ok(SecretString::from(token))
    }
}
