//! Product comments and the admin's replies to them.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, ReplyId, UserId};

use super::lenient::null_as_default;

/// Public profile of the customer who wrote a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentAuthor {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
}

/// The product a comment was left on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentProduct {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// A customer comment on a product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: CommentId,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub user_data: CommentAuthor,
    #[serde(deserialize_with = "null_as_default")]
    pub product_data: CommentProduct,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

impl Comment {
    /// Notification text sent to the author after the admin replies.
    #[must_use]
    pub fn replied_message(&self, reply_text: &str) -> String {
        format!(
            "The admin replied your comment in {} page: {reply_text}.",
            self.product_data.name
        )
    }
}

/// An admin reply to a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: ReplyId,
    #[serde(deserialize_with = "null_as_default")]
    pub comment_id: CommentId,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_comment() {
        let comment: Comment = serde_json::from_str(
            r#"{
                "_id": "m1",
                "userId": "u3",
                "userData": {"name": "Lan", "image": "lan.png"},
                "productData": {"name": "Dell XPS"},
                "text": "Does it ship with Windows?"
            }"#,
        )
        .unwrap();
        assert_eq!(comment.user_data.name, "Lan");
        assert_eq!(comment.product_data.name, "Dell XPS");
    }

    #[test]
    fn test_comment_from_deleted_user() {
        let comments: Vec<Comment> = serde_json::from_str(
            r#"[{"_id": "m1", "userId": null, "userData": null, "productData": {"name": null},
                 "text": "Great phone"}]"#,
        )
        .unwrap();
        assert_eq!(comments[0].text, "Great phone");
        assert!(comments[0].user_data.name.is_empty());
        assert!(comments[0].user_id.as_str().is_empty());
    }

    #[test]
    fn test_replied_message() {
        let comment = Comment {
            product_data: CommentProduct {
                name: "Dell XPS".to_owned(),
            },
            ..Comment::default()
        };
        assert_eq!(
            comment.replied_message("Yes, Windows 11"),
            "The admin replied your comment in Dell XPS page: Yes, Windows 11."
        );
    }

    #[test]
    fn test_deserialize_reply() {
        let reply: Reply =
            serde_json::from_str(r#"{"_id": "r1", "commentId": "m1", "text": "Thanks!"}"#).unwrap();
        assert_eq!(reply.comment_id.as_str(), "m1");
    }
}
