use serde::Deserialize;
use tracing::instrument;

use crate::client::Session;
use crate::error::{DiscussError, Result};
use crate::responses::{Fragment, FragmentSource};
use crate::types::{CategoryPage, DiscussionCategory};

use super::normalize::normalize_page;
use super::resolve::scope;

/// Number of categories shown by the listing.
pub const CATEGORY_LIST_PAGE_SIZE: u32 = 25;

const LIST_CATEGORIES_QUERY: &str = r#"
query DiscussionCategories($owner: String!, $repo: String!, $first: Int!) {
    repository(owner: $owner, name: $repo) {
        discussionCategories(first: $first) {
            nodes {
                id
                name
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
"#;

#[derive(Deserialize)]
struct CategoriesResponse {
    repository: Option<CategoriesRepository>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoriesRepository {
    discussion_categories: Fragment<DiscussionCategory>,
}

impl FragmentSource for CategoriesRepository {
    type Node = DiscussionCategory;

    fn into_fragment(self) -> Fragment<DiscussionCategory> {
        self.discussion_categories
    }
}

#[instrument(skip(session))]
pub async fn list(session: &Session<'_>, owner: &str, repo: &str) -> Result<CategoryPage> {
    let response: CategoriesResponse = session
        .query(
            "discussion categories",
            LIST_CATEGORIES_QUERY,
            scope(owner, repo).with("first", CATEGORY_LIST_PAGE_SIZE),
        )
        .await?;

    let repository = response
        .repository
        .ok_or_else(|| DiscussError::RepositoryNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })?;

    let page = normalize_page(repository)?;
    Ok(CategoryPage {
        categories: page.items,
        page_info: page.page_info,
        total_count: page.total_count,
    })
}
