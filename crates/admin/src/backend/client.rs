//! HTTP plumbing shared by every backend operation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::sync::RwLock;
use url::Url;

use super::BackendError;
use super::envelope::{Envelope, error_message};

/// Header the backend reads the admin token from.
pub(crate) const TOKEN_HEADER: &str = "aToken";

/// Store backend client.
///
/// Cheap to clone; clones share the HTTP connection pool and the token.
///
/// # Authentication
///
/// The token is cached in memory and attached to every request except
/// login. The client never refreshes or validates it.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    /// In-memory token cache
    token: RwLock<Option<SecretString>>,
}

impl BackendClient {
    /// Create a new client for the backend at `base_url`.
    ///
    /// Requests wait for the backend indefinitely unless `timeout` is set.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("shopdesk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url,
                token: RwLock::new(None),
            }),
        })
    }

    /// The backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Token
    // =========================================================================

    /// Set the admin token used for subsequent requests.
    pub async fn set_token(&self, token: SecretString) {
        *self.inner.token.write().await = Some(token);
    }

    /// Forget the admin token.
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    async fn token_header(&self) -> Result<String, BackendError> {
        self.inner
            .token
            .read()
            .await
            .as_ref()
            .map(|t| t.expose_secret().to_string())
            .ok_or(BackendError::NoToken)
    }

    // =========================================================================
    // Requests
    // =========================================================================

    pub(crate) fn url(&self, route: &str) -> Result<Url, BackendError> {
        self.inner
            .base_url
            .join(route)
            .map_err(|e| BackendError::Decode(format!("invalid route {route}: {e}")))
    }

    /// `route` followed by `id` as one percent-encoded path segment, so an id
    /// can never change the path, query, or fragment.
    pub(crate) fn item_url(&self, route: &str, id: &str) -> Result<Url, BackendError> {
        if matches!(id, "" | "." | "..") {
            return Err(BackendError::InvalidId(id.to_string()));
        }
        let mut url = self.url(route)?;
        url.path_segments_mut()
            .map_err(|()| BackendError::Decode(format!("cannot append an id to {route}")))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Authenticated GET.
    pub(crate) async fn get(&self, route: &str) -> Result<Envelope, BackendError> {
        self.get_url(self.url(route)?).await
    }

    /// Authenticated GET of a single record under `route`.
    pub(crate) async fn get_item(&self, route: &str, id: &str) -> Result<Envelope, BackendError> {
        self.get_url(self.item_url(route, id)?).await
    }

    async fn get_url(&self, url: Url) -> Result<Envelope, BackendError> {
        let token = self.token_header().await?;
        let request = self.inner.client.get(url).header(TOKEN_HEADER, token);
        Self::send(request).await
    }

    /// Authenticated POST with a JSON body.
    pub(crate) async fn post_json<B: Serialize + Sync + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<Envelope, BackendError> {
        self.post_json_url(self.url(route)?, body).await
    }

    /// Authenticated POST with a JSON body to a single record under `route`.
    pub(crate) async fn post_json_item<B: Serialize + Sync + ?Sized>(
        &self,
        route: &str,
        id: &str,
        body: &B,
    ) -> Result<Envelope, BackendError> {
        self.post_json_url(self.item_url(route, id)?, body).await
    }

    async fn post_json_url<B: Serialize + Sync + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<Envelope, BackendError> {
        let token = self.token_header().await?;
        let request = self
            .inner
            .client
            .post(url)
            .header(TOKEN_HEADER, token)
            .json(body);
        Self::send(request).await
    }

    /// Authenticated POST with a multipart body.
    pub(crate) async fn post_multipart(
        &self,
        route: &str,
        form: Form,
    ) -> Result<Envelope, BackendError> {
        let token = self.token_header().await?;
        let request = self
            .inner
            .client
            .post(self.url(route)?)
            .header(TOKEN_HEADER, token)
            .multipart(form);
        Self::send(request).await
    }

    /// Unauthenticated POST with a JSON body (login).
    pub(crate) async fn post_json_anonymous<B: Serialize + Sync + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<Envelope, BackendError> {
        let request = self.inner.client.post(self.url(route)?).json(body);
        Self::send(request).await
    }

    /// Send a request and classify the single response.
    async fn send(request: reqwest::RequestBuilder) -> Result<Envelope, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Envelope::parse(&body)?.into_success();
        }

        let fallback = status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
        let message = error_message(&body, &fallback);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(BackendError::Unauthorized(message));
        }

        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
