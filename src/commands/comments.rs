use tabled::Tabled;

use crate::cli::{CommentArgs, PageArgs, RepoArgs};
use crate::client::Session;
use crate::config::Config;
use crate::discussions::comments::{self, AddComment};
use crate::error::Result;
use crate::output::{self, is_json_output, truncate};
use crate::pagination::PageRequest;
use crate::types::{DiscussionComment, MutationIdentity};

use super::Target;

#[derive(Tabled)]
struct CommentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Comment")]
    body: String,
}

impl From<&DiscussionComment> for CommentRow {
    fn from(comment: &DiscussionComment) -> Self {
        Self {
            id: comment.id.clone(),
            body: truncate(&comment.body.replace('\n', " "), 60),
        }
    }
}

pub async fn list(
    session: &Session<'_>,
    config: &Config,
    repo: RepoArgs,
    number: u64,
    page: PageArgs,
) -> Result<()> {
    let target = Target::repository(config, &repo)?;
    let page = comments::list(
        session,
        &target.owner,
        &target.repo,
        number,
        &PageRequest::from(&page),
    )
    .await?;

    if page.comments.is_empty() && !is_json_output() {
        return output::print_message(&format!("No comments on discussion #{number}"));
    }

    output::print_page(
        &page,
        &page.comments,
        &page.page_info,
        |c| CommentRow::from(c),
        |c| format!("{}\t{}", c.id, c.body.replace('\n', " ")),
    )
}

fn print_identity(message: String, identity: &MutationIdentity) -> Result<()> {
    if is_json_output() {
        output::print_item(identity, |_| {})
    } else {
        output::print_message(&message)
    }
}

pub async fn add(session: &Session<'_>, config: &Config, args: CommentArgs) -> Result<()> {
    let target = Target::repository(config, &args.repo)?;
    let request = AddComment {
        owner: target.owner,
        repo: target.repo,
        number: args.number,
        body: args.body,
        reply_to: args.reply_to,
    };

    let identity = comments::add(session, &request).await?;
    print_identity(
        format!("Added comment to discussion #{}: {}", args.number, identity.url),
        &identity,
    )
}

pub async fn edit(session: &Session<'_>, id: &str, body: &str) -> Result<()> {
    let identity = comments::update(session, id, body).await?;
    print_identity(format!("Updated comment {}", identity.id), &identity)
}

pub async fn delete(session: &Session<'_>, id: &str) -> Result<()> {
    comments::delete(session, id).await?;
    output::print_message(&format!("Deleted comment {id}"))
}
