//! Comment moderation and admin replies.

use serde::Serialize;
use shopdesk_core::{Comment, CommentId, Reply, ReplyId};
use tracing::instrument;

use super::{BackendClient, BackendError, routes};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewReply<'a> {
    comment_id: &'a CommentId,
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyEdit<'a> {
    reply_id: &'a ReplyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

impl BackendClient {
    /// List every customer comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn list_comments(&self) -> Result<Vec<Comment>, BackendError> {
        let mut envelope = self.get(routes::COMMENTS).await?;
        envelope.take("comments")
    }

    /// List every admin reply, across all comments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self))]
    pub async fn list_replies(&self) -> Result<Vec<Reply>, BackendError> {
        let mut envelope = self.get(routes::ALL_REPLIES).await?;
        envelope.take("replies")
    }

    /// Reply to a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, comment_id, text), fields(comment_id = %comment_id))]
    pub async fn add_reply(&self, comment_id: &CommentId, text: &str) -> Result<String, BackendError> {
        let body = NewReply { comment_id, text };
        let envelope = self.post_json(routes::REPLY, &body).await?;
        Ok(envelope.message_or("Reply successfully"))
    }

    /// Replace the text of a reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self, text), fields(reply_id = %id))]
    pub async fn edit_reply(&self, id: &ReplyId, text: &str) -> Result<String, BackendError> {
        let body = ReplyEdit {
            reply_id: id,
            text: Some(text),
        };
        let envelope = self.post_json(routes::UPDATE_REPLY, &body).await?;
        Ok(envelope.message_or("Edit successfully"))
    }

    /// Delete a reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend reports failure.
    #[instrument(skip(self), fields(reply_id = %id))]
    pub async fn delete_reply(&self, id: &ReplyId) -> Result<String, BackendError> {
        let body = ReplyEdit {
            reply_id: id,
            text: None,
        };
        let envelope = self.post_json(routes::REMOVE_REPLY, &body).await?;
        Ok(envelope.message_or("Reply removed successfully"))
    }
}
