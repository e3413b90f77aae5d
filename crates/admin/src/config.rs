//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPDESK_BACKEND_URL` - Base URL of the store backend (e.g., `https://api.shop.example`)
//!
//! ## Optional
//! - `SHOPDESK_SESSION_FILE` - Where the admin token is persisted (default: `.shopdesk/session.json`)
//! - `SHOPDESK_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: none)
//! - `SHOPDESK_LOGOUT_ON_UNAUTHORIZED` - Clear the session when the backend
//!   answers 401/403 (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_SESSION_FILE: &str = ".shopdesk/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the store backend (routes are joined onto it)
    pub backend_url: Url,
    /// File holding the persisted admin token
    pub session_file: PathBuf,
    /// Per-request timeout; requests wait indefinitely when unset
    pub request_timeout: Option<Duration>,
    /// Clear the session when the backend rejects the token
    pub logout_on_unauthorized: bool,
    /// Sentry error tracking (optional)
    pub sentry: Option<SentryConfig>,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry DSN
    pub dsn: String,
    /// Environment name (e.g., "staging", "production")
    pub environment: Option<String>,
    /// Error sample rate (0.0 to 1.0)
    pub sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let backend_url = parse_backend_url(&env.required("SHOPDESK_BACKEND_URL")?)?;
        let session_file = PathBuf::from(env.or_default("SHOPDESK_SESSION_FILE", DEFAULT_SESSION_FILE));
        let request_timeout = env
            .optional("SHOPDESK_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar("SHOPDESK_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?;
        let logout_on_unauthorized = match env.optional("SHOPDESK_LOGOUT_ON_UNAUTHORIZED") {
            Some(raw) => parse_bool("SHOPDESK_LOGOUT_ON_UNAUTHORIZED", &raw)?,
            None => true,
        };

        let sentry = env.optional("SENTRY_DSN").map(|dsn| SentryConfig {
            dsn,
            environment: env.optional("SENTRY_ENVIRONMENT"),
            sample_rate: env
                .optional("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
        });

        Ok(Self {
            backend_url,
            session_file,
            request_timeout,
            logout_on_unauthorized,
            sentry,
        })
    }

    /// Configuration pointing at `backend_url` with every optional value at
    /// its default.
    #[must_use]
    pub fn for_backend(backend_url: Url, session_file: PathBuf) -> Self {
        Self {
            backend_url,
            session_file,
            request_timeout: None,
            logout_on_unauthorized: true,
            sentry: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a required variable. Blank values count as missing.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse the backend URL, requiring http(s) and a trailing slash so that
/// relative routes join underneath any path prefix.
fn parse_backend_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("SHOPDESK_BACKEND_URL".to_string(), msg);

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme: {}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got {other}"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AdminConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AdminConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_backend_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "SHOPDESK_BACKEND_URL"));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SHOPDESK_BACKEND_URL", "http://localhost:4000")]).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://localhost:4000/");
        assert_eq!(config.session_file, PathBuf::from(".shopdesk/session.json"));
        assert_eq!(config.request_timeout, None);
        assert!(config.logout_on_unauthorized);
        assert!(config.sentry.is_none());
    }

    #[test]
    fn test_backend_url_keeps_path_prefix() {
        let config = load(&[("SHOPDESK_BACKEND_URL", "https://shop.example/backend")]).unwrap();
        assert_eq!(
            config.backend_url.join("api/admin/login").unwrap().as_str(),
            "https://shop.example/backend/api/admin/login"
        );
    }

    #[test]
    fn test_backend_url_rejects_other_schemes() {
        let err = load(&[("SHOPDESK_BACKEND_URL", "ftp://shop.example")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_optional_overrides() {
        let config = load(&[
            ("SHOPDESK_BACKEND_URL", "http://localhost:4000/"),
            ("SHOPDESK_SESSION_FILE", "/tmp/shopdesk.json"),
            ("SHOPDESK_REQUEST_TIMEOUT_SECS", "5"),
            ("SHOPDESK_LOGOUT_ON_UNAUTHORIZED", "no"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();
        assert_eq!(config.session_file, PathBuf::from("/tmp/shopdesk.json"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert!(!config.logout_on_unauthorized);
        let sentry = config.sentry.unwrap();
        assert!((sentry.sample_rate - 0.25).abs() < f32::EPSILON);
        assert!(sentry.environment.is_none());
    }

    #[test]
    fn test_invalid_bool_and_timeout() {
        let err = load(&[
            ("SHOPDESK_BACKEND_URL", "http://localhost:4000"),
            ("SHOPDESK_LOGOUT_ON_UNAUTHORIZED", "maybe"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SHOPDESK_LOGOUT_ON_UNAUTHORIZED"));

        let err = load(&[
            ("SHOPDESK_BACKEND_URL", "http://localhost:4000"),
            ("SHOPDESK_REQUEST_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SHOPDESK_REQUEST_TIMEOUT_SECS"));
    }
}
