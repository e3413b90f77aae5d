//! Comment moderation commands.

use std::io::Write;

use clap::Subcommand;
use shopdesk_admin::Console;
use shopdesk_core::{CommentId, ReplyId};

use super::{CliError, report_delivery, require_login};
use crate::render;

#[derive(Subcommand)]
pub enum CommentsAction {
    /// List every comment
    List {
        /// Show admin replies under each comment
        #[arg(long)]
        replies: bool,
    },
    /// Reply to a comment and notify its author
    Reply { comment_id: CommentId, text: String },
    /// Change the text of a reply
    EditReply { reply_id: ReplyId, text: String },
    /// Delete a reply
    DeleteReply { reply_id: ReplyId },
}

pub async fn run(
    console: &mut Console,
    action: CommentsAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    require_login(console)?;

    match action {
        CommentsAction::List { replies } => {
            console.load_comments().await?;
            if replies {
                console.load_replies().await?;
            }
            render::comments(out, console.state(), replies)?;
        }
        CommentsAction::Reply { comment_id, text } => {
            // The author and product name for the notification come from here
            console.load_comments().await?;
            let outcome = console.reply_to_comment(&comment_id, &text).await?;
            report_delivery(out, "Author", &outcome.notification)?;
        }
        CommentsAction::EditReply { reply_id, text } => {
            console.edit_reply(&reply_id, &text).await?;
        }
        CommentsAction::DeleteReply { reply_id } => {
            console.delete_reply(&reply_id).await?;
        }
    }
    Ok(())
}
