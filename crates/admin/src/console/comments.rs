//! Comment moderation screen.

use shopdesk_core::{CommentId, ReplyId};

use super::{Console, ConsoleError, MutationOutcome, NotificationDelivery};
use crate::forms::FormError;
use crate::state::Collection;

impl Console {
    /// Fetch every comment.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the fetch fails.
    pub async fn load_comments(&mut self) -> Result<(), ConsoleError> {
        self.ensure_authenticated()?;
        let ticket = self.state.begin_fetch(Collection::Comments);
        match self.client.list_comments().await {
            Ok(comments) => {
                let count = comments.len();
                self.state.apply_comments(ticket, comments);
                self.succeed(format!("Loaded {count} comments"));
                Ok(())
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Fetch every admin reply.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the fetch fails.
    pub async fn load_replies(&mut self) -> Result<(), ConsoleError> {
        self.ensure_authenticated()?;
        let ticket = self.state.begin_fetch(Collection::Replies);
        match self.client.list_replies().await {
            Ok(replies) => {
                let count = replies.len();
                self.state.apply_replies(ticket, replies);
                self.succeed(format!("Loaded {count} replies"));
                Ok(())
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Reply to a comment, then tell its author.
    ///
    /// The reply shows up locally after the next reply fetch. On failure no
    /// notification is sent and the error is returned so the caller can
    /// stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank, if not logged in, or if the
    /// backend refuses the reply.
    pub async fn reply_to_comment(
        &mut self,
        comment_id: &CommentId,
        text: &str,
    ) -> Result<MutationOutcome, ConsoleError> {
        self.ensure_authenticated()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(self.fail(FormError::EmptyReply));
        }
        let comment = self.state.comment(comment_id).cloned();

        let message = match self.client.add_reply(comment_id, text).await {
            Ok(message) => message,
            Err(e) => return Err(self.backend_failure(e).await),
        };
        self.state.selection.comment = Some(comment_id.clone());
        self.succeed(message.clone());

        let notification = match comment {
            Some(comment) => {
                self.notify_customer(&comment.user_id, comment.replied_message(text))
                    .await
            }
            None => {
                tracing::warn!(comment_id = %comment_id, "Comment not loaded, author not notified");
                NotificationDelivery::Skipped
            }
        };

        Ok(MutationOutcome {
            message,
            notification,
        })
    }

    /// Replace a reply's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank, if not logged in, or if the
    /// backend refuses the edit.
    pub async fn edit_reply(&mut self, id: &ReplyId, text: &str) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(self.fail(FormError::EmptyReply));
        }

        match self.client.edit_reply(id, text).await {
            Ok(message) => {
                self.state.set_reply_text(id, text);
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }

    /// Delete a reply.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the backend refuses the deletion.
    pub async fn delete_reply(&mut self, id: &ReplyId) -> Result<String, ConsoleError> {
        self.ensure_authenticated()?;
        match self.client.delete_reply(id).await {
            Ok(message) => {
                self.state.remove_reply(id);
                self.succeed(message.clone());
                Ok(message)
            }
            Err(e) => Err(self.backend_failure(e).await),
        }
    }
}
