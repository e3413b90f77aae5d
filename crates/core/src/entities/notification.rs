//! Customer notifications created by admin actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{NotificationId, UserId};

use super::lenient::{null_as_default, timestamp};

/// A notification stored on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: NotificationId,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_read: bool,
}

/// Request body for creating a notification.
///
/// The backend expects the creation time in epoch milliseconds under
/// `createAt` (sic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    pub user_id: UserId,
    pub text: String,
    #[serde(rename = "createAt")]
    pub created_at_ms: i64,
    pub is_read: bool,
}

impl NotificationDraft {
    /// An unread notification stamped with `now`.
    #[must_use]
    pub fn new(user_id: UserId, text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            text: text.into(),
            created_at_ms: now.timestamp_millis(),
            is_read: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_notification() {
        let n: Notification = serde_json::from_str(
            r#"{"_id": "n1", "userId": "u1", "text": "hi", "createdAt": "2025-05-01T08:30:00.000Z", "isRead": false}"#,
        )
        .unwrap();
        assert_eq!(n.id.as_str(), "n1");
        assert_eq!(n.created_at.unwrap().timestamp(), 1_746_088_200);
    }

    #[test]
    fn test_created_at_accepts_epoch_millis() {
        let n: Notification =
            serde_json::from_str(r#"{"_id": "n2", "createdAt": 1700000000000}"#).unwrap();
        assert_eq!(n.created_at.unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let list: Vec<Notification> = serde_json::from_str(
            r#"[{"_id": "n1", "userId": null, "text": null, "createdAt": null, "isRead": null},
                {"_id": "n2", "userId": "u2", "text": "hi"}]"#,
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert!(list[0].user_id.as_str().is_empty());
        assert!(list[0].created_at.is_none());
        assert!(!list[0].is_read);
    }

    #[test]
    fn test_draft_wire_format() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let draft = NotificationDraft::new(UserId::new("u1"), "Your order shipped", now);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": "u1",
                "text": "Your order shipped",
                "createAt": 1_700_000_000_000_i64,
                "isRead": false
            })
        );
    }
}
