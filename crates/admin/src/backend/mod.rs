//! Store backend REST client.
//!
//! One method per admin endpoint. Each method issues exactly one HTTP
//! request, attaches the admin token as the `aToken` header, and decides
//! success or failure from that single response. Nothing is retried, cached,
//! or batched.
//!
//! # Response envelope
//!
//! The backend wraps every payload in a loose envelope:
//!
//! ```json
//! {"success": true, "message": "Product added", "products": [...]}
//! ```
//!
//! A response is a failure when the HTTP status is not 2xx, or when
//! `success` is present and `false`. List endpoints that omit `success` are
//! successful as long as the expected payload field is present.

mod auth;
mod carts;
mod client;
mod comments;
mod dashboard;
mod envelope;
mod notifications;
mod products;
pub mod routes;
mod upload;

pub use client::BackendClient;
pub use products::ProductForm;
pub use upload::ImageUpload;

use thiserror::Error;

/// Errors that can occur when talking to the store backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 2xx but reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// The backend refused the admin token (HTTP 401/403).
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON we expected.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A record id that cannot be placed in a URL path segment.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// An authenticated endpoint was called without a token.
    #[error("Not logged in")]
    NoToken,

    /// A local file needed for the request could not be read.
    #[error("Cannot read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl BackendError {
    /// Whether the backend rejected the admin token itself.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Rejected("Product not found".to_string());
        assert_eq!(err.to_string(), "Product not found");

        let err = BackendError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");

        assert_eq!(BackendError::NoToken.to_string(), "Not logged in");
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(BackendError::Unauthorized("jwt expired".to_string()).is_unauthorized());
        assert!(!BackendError::Rejected("nope".to_string()).is_unauthorized());
    }
}
