//! Discussion comment operations.

use serde::Deserialize;
use tracing::instrument;

use crate::client::Session;
use crate::error::{DiscussError, Result};
use crate::pagination::{PageRequest, Variables};
use crate::responses::{Fragment, FragmentSource};
use crate::types::{CommentPage, DiscussionComment, MutationIdentity};

use super::normalize::normalize_page;
use super::resolve::{resolve_discussion_id, scope};

const LIST_COMMENTS_QUERY: &str = r#"
query DiscussionComments($owner: String!, $repo: String!, $number: Int!, $first: Int!, $after: String) {
    repository(owner: $owner, name: $repo) {
        discussion(number: $number) {
            comments(first: $first, after: $after) {
                nodes {
                    id
                    body
                    url
                }
                pageInfo {
                    hasNextPage
                    hasPreviousPage
                    startCursor
                    endCursor
                }
                totalCount
            }
        }
    }
}
"#;

const ADD_COMMENT_MUTATION: &str = r#"
mutation AddDiscussionComment($input: AddDiscussionCommentInput!) {
    addDiscussionComment(input: $input) {
        comment {
            id
            url
        }
    }
}
"#;

const UPDATE_COMMENT_MUTATION: &str = r#"
mutation UpdateDiscussionComment($input: UpdateDiscussionCommentInput!) {
    updateDiscussionComment(input: $input) {
        comment {
            id
            url
        }
    }
}
"#;

const DELETE_COMMENT_MUTATION: &str = r#"
mutation DeleteDiscussionComment($input: DeleteDiscussionCommentInput!) {
    deleteDiscussionComment(input: $input) {
        clientMutationId
    }
}
"#;

#[derive(Debug, Clone)]
pub struct AddComment {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub body: String,
    pub reply_to: Option<String>,
}

#[derive(Deserialize)]
struct CommentsResponse {
    repository: Option<CommentsRepository>,
}

#[derive(Deserialize)]
struct CommentsRepository {
    discussion: Option<DiscussionWithComments>,
}

#[derive(Deserialize)]
struct DiscussionWithComments {
    comments: Fragment<DiscussionComment>,
}

impl FragmentSource for DiscussionWithComments {
    type Node = DiscussionComment;

    fn into_fragment(self) -> Fragment<DiscussionComment> {
        self.comments
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCommentResponse {
    add_discussion_comment: CommentPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCommentResponse {
    update_discussion_comment: CommentPayload,
}

#[derive(Deserialize)]
struct CommentPayload {
    comment: Option<MutatedComment>,
}

#[derive(Deserialize)]
struct MutatedComment {
    id: String,
    url: String,
}

impl From<MutatedComment> for MutationIdentity {
    fn from(c: MutatedComment) -> Self {
        Self {
            id: c.id,
            number: None,
            url: c.url,
        }
    }
}

/// List one page of comments on a discussion.
#[instrument(skip(session, page))]
pub async fn list(
    session: &Session<'_>,
    owner: &str,
    repo: &str,
    number: u64,
    page: &PageRequest,
) -> Result<CommentPage> {
    let cursor = page.to_cursor_args()?;
    let variables = cursor.bind(scope(owner, repo).with("number", number));

    let response: CommentsResponse = session
        .query("discussion comments", LIST_COMMENTS_QUERY, variables)
        .await?;

    let discussion = response
        .repository
        .and_then(|r| r.discussion)
        .ok_or_else(|| DiscussError::DiscussionNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })?;

    let page = normalize_page(discussion)?;
    Ok(CommentPage {
        comments: page.items,
        page_info: page.page_info,
        total_count: page.total_count,
    })
}

/// Add a comment, optionally as a reply to another comment.
#[instrument(skip_all, fields(owner = %request.owner, repo = %request.repo, number = request.number))]
pub async fn add(session: &Session<'_>, request: &AddComment) -> Result<MutationIdentity> {
    let discussion_id =
        resolve_discussion_id(session, &request.owner, &request.repo, request.number).await?;

    let input = Variables::new()
        .with("discussionId", discussion_id)
        .with("body", request.body.as_str())
        .with_opt(
            "replyToId",
            request.reply_to.as_deref().filter(|s| !s.is_empty()),
        );

    let response: AddCommentResponse = session
        .mutate("addDiscussionComment", ADD_COMMENT_MUTATION, input)
        .await?;

    response
        .add_discussion_comment
        .comment
        .map(MutationIdentity::from)
        .ok_or(DiscussError::EmptyResponse)
}

#[instrument(skip(session, body))]
pub async fn update(session: &Session<'_>, comment_id: &str, body: &str) -> Result<MutationIdentity> {
    let input = Variables::new()
        .with("commentId", comment_id)
        .with("body", body);

    let response: UpdateCommentResponse = session
        .mutate("updateDiscussionComment", UPDATE_COMMENT_MUTATION, input)
        .await?;

    response
        .update_discussion_comment
        .comment
        .map(MutationIdentity::from)
        .ok_or(DiscussError::EmptyResponse)
}

#[instrument(skip(session))]
pub async fn delete(session: &Session<'_>, comment_id: &str) -> Result<()> {
    let input = Variables::new().with("id", comment_id);

    let _: serde_json::Value = session
        .mutate("deleteDiscussionComment", DELETE_COMMENT_MUTATION, input)
        .await?;

    Ok(())
}
