//! Decoding of the backend's `{success, message, ...payload}` envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::BackendError;

/// A decoded 2xx response body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Envelope {
    /// Parse a 2xx body. An empty body is an empty envelope.
    pub(crate) fn parse(body: &str) -> Result<Self, BackendError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Fail if the backend reported `success: false`.
    pub(crate) fn into_success(self) -> Result<Self, BackendError> {
        if self.success == Some(false) {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Request failed".to_string());
            return Err(BackendError::Rejected(message));
        }
        Ok(self)
    }

    /// The backend's message, if any.
    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// The backend's message or `fallback`.
    pub(crate) fn message_or(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }

    /// Take and decode a named payload field.
    pub(crate) fn take<T: DeserializeOwned>(&mut self, field: &str) -> Result<T, BackendError> {
        let value = self
            .payload
            .remove(field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| BackendError::Decode(format!("missing `{field}` in response")))?;
        serde_json::from_value(value).map_err(|e| BackendError::Decode(format!("`{field}`: {e}")))
    }
}

/// Extract a human-readable message from an error body.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|env| env.message().map(str::to_string))
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty() && text.len() <= 200 && !text.starts_with('<')).then(|| text.to_string())
        })
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_false_is_rejected_with_message() {
        let env = Envelope::parse(r#"{"success": false, "message": "Invalid credentials"}"#).unwrap();
        let err = env.into_success().unwrap_err();
        assert!(matches!(err, BackendError::Rejected(ref m) if m == "Invalid credentials"));
    }

    #[test]
    fn test_success_false_without_message() {
        let err = Envelope::parse(r#"{"success": false}"#)
            .unwrap()
            .into_success()
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn test_missing_success_flag_is_success() {
        let mut env = Envelope::parse(r#"{"carts": [{"_id": "c1"}]}"#)
            .unwrap()
            .into_success()
            .unwrap();
        let carts: Vec<shopdesk_core::Cart> = env.take("carts").unwrap();
        assert_eq!(carts.len(), 1);
    }

    #[test]
    fn test_missing_payload_field() {
        let mut env = Envelope::parse(r#"{"success": true}"#).unwrap();
        let err = env.take::<Vec<shopdesk_core::Cart>>("carts").unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[test]
    fn test_empty_body() {
        let env = Envelope::parse("").unwrap().into_success().unwrap();
        assert_eq!(env.message_or("Done"), "Done");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"success": false, "message": "jwt expired"}"#, "Unauthorized"),
            "jwt expired"
        );
        assert_eq!(error_message("Bad Gateway", "HTTP 502"), "Bad Gateway");
        assert_eq!(
            error_message("<html><body>oops</body></html>", "HTTP 500"),
            "HTTP 500"
        );
    }
}
