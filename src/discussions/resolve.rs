//! Resolution of human-given identifiers into GitHub node ids.

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::client::Session;
use crate::error::{DiscussError, Result};
use crate::pagination::Variables;
use crate::responses::{Connection, IdNode};
use crate::types::DiscussionCategory;

/// Upper bound on categories fetched when resolving by name.
pub const CATEGORY_LOOKUP_PAGE_SIZE: u32 = 100;

const CATEGORY_LOOKUP_QUERY: &str = r#"
query DiscussionCategoryLookup($owner: String!, $repo: String!, $first: Int!) {
    repository(owner: $owner, name: $repo) {
        discussionCategories(first: $first) {
            nodes {
                id
                name
            }
        }
    }
}
"#;

const DISCUSSION_ID_QUERY: &str = r#"
query DiscussionId($owner: String!, $repo: String!, $number: Int!) {
    repository(owner: $owner, name: $repo) {
        discussion(number: $number) {
            id
        }
    }
}
"#;

const REPOSITORY_ID_QUERY: &str = r#"
query RepositoryId($owner: String!, $repo: String!) {
    repository(owner: $owner, name: $repo) {
        id
    }
}
"#;

/// How the caller identified a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    Id(String),
    Name(String),
}

impl CategorySelector {
    /// An explicit id wins over a name. Empty strings count as absent.
    pub fn from_parts(id: Option<String>, name: Option<String>) -> Option<Self> {
        let id = id.filter(|s| !s.is_empty());
        let name = name.filter(|s| !s.is_empty());
        match (id, name) {
            (Some(id), _) => Some(Self::Id(id)),
            (None, Some(name)) => Some(Self::Name(name)),
            (None, None) => None,
        }
    }
}

#[derive(Deserialize)]
struct CategoryLookupResponse {
    repository: Option<CategoryLookupRepository>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryLookupRepository {
    discussion_categories: Connection<DiscussionCategory>,
}

#[derive(Deserialize)]
struct DiscussionIdResponse {
    repository: Option<DiscussionIdRepository>,
}

#[derive(Deserialize)]
struct DiscussionIdRepository {
    discussion: Option<IdNode>,
}

#[derive(Deserialize)]
struct RepositoryIdResponse {
    repository: Option<IdNode>,
}

pub fn scope(owner: &str, repo: &str) -> Variables {
    Variables::new().with("owner", owner).with("repo", repo)
}

/// Resolve a category selector into a category node id.
///
/// Ids pass through untouched. Names are matched exactly, ignoring case,
/// against the first [`CATEGORY_LOOKUP_PAGE_SIZE`] categories.
#[instrument(skip(session))]
pub async fn resolve_category(
    session: &Session<'_>,
    owner: &str,
    repo: &str,
    selector: &CategorySelector,
) -> Result<String> {
    let name = match selector {
        CategorySelector::Id(id) => return Ok(id.clone()),
        CategorySelector::Name(name) => name,
    };

    let response: CategoryLookupResponse = session
        .query(
            "discussion categories",
            CATEGORY_LOOKUP_QUERY,
            scope(owner, repo).with("first", CATEGORY_LOOKUP_PAGE_SIZE),
        )
        .await?;

    let categories = response
        .repository
        .ok_or_else(|| DiscussError::RepositoryNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })?
        .discussion_categories
        .nodes;

    let category = categories
        .into_iter()
        .find(|c| eq_ignore_case(&c.name, name))
        .ok_or_else(|| DiscussError::CategoryNotFound(name.clone()))?;

    debug!(id = %category.id, "resolved category");
    Ok(category.id)
}

/// Case-insensitive equality by per-character lowercase mapping, so the
/// result does not depend on a letter's position in the word.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Resolve a discussion number into its node id.
#[instrument(skip(session))]
pub async fn resolve_discussion_id(
    session: &Session<'_>,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<String> {
    let response: DiscussionIdResponse = session
        .query(
            "discussion id",
            DISCUSSION_ID_QUERY,
            scope(owner, repo).with("number", number),
        )
        .await?;

    response
        .repository
        .and_then(|r| r.discussion)
        .map(|d| d.id)
        .ok_or_else(|| DiscussError::DiscussionNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
}

/// Resolve a repository into its node id.
#[instrument(skip(session))]
pub async fn resolve_repository_id(session: &Session<'_>, owner: &str, repo: &str) -> Result<String> {
    let response: RepositoryIdResponse = session
        .query("repository id", REPOSITORY_ID_QUERY, scope(owner, repo))
        .await?;

    response
        .repository
        .map(|r| r.id)
        .ok_or_else(|| DiscussError::RepositoryNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
}
