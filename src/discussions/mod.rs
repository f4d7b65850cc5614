//! Discussion operations over a [`Session`].

pub mod categories;
pub mod comments;
pub mod normalize;
pub mod resolve;
pub mod variant;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::Session;
use crate::error::{DiscussError, Result};
use crate::pagination::{PageRequest, Variables};
use crate::responses::{Fragment, FragmentSource};
use crate::types::{
    Discussion, DiscussionOrderField, DiscussionPage, MutationIdentity, OrderDirection,
};

use normalize::{normalize_page, Normalize, RawDiscussion};
use resolve::{
    resolve_category, resolve_discussion_id, resolve_repository_id, scope, CategorySelector,
};
use variant::{Ordering, DISCUSSION_LISTING};

/// Repository holding organisation-wide discussions.
pub const ORG_DISCUSSIONS_REPO: &str = ".github";

const GET_DISCUSSION_QUERY: &str = r#"
query GetDiscussion($owner: String!, $repo: String!, $number: Int!) {
    repository(owner: $owner, name: $repo) {
        discussion(number: $number) {
            number
            title
            body
            url
            createdAt
            updatedAt
            closed
            isAnswered
            answerChosenAt
            author {
                login
            }
            category {
                name
            }
        }
    }
}
"#;

const CREATE_DISCUSSION_MUTATION: &str = r#"
mutation CreateDiscussion($input: CreateDiscussionInput!) {
    createDiscussion(input: $input) {
        discussion {
            id
            number
            url
        }
    }
}
"#;

const UPDATE_DISCUSSION_MUTATION: &str = r#"
mutation UpdateDiscussion($input: UpdateDiscussionInput!) {
    updateDiscussion(input: $input) {
        discussion {
            id
            number
            url
        }
    }
}
"#;

#[derive(Debug, Clone, Default)]
pub struct ListDiscussions {
    pub owner: String,
    pub repo: String,
    pub category: Option<CategorySelector>,
    pub order_by: Option<DiscussionOrderField>,
    pub direction: Option<OrderDirection>,
    pub page: PageRequest,
}

#[derive(Debug, Clone)]
pub struct CreateDiscussion {
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub body: String,
    pub category: Option<CategorySelector>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDiscussion {
    pub owner: String,
    pub repo: String,
    pub number: u64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<CategorySelector>,
}

#[derive(Deserialize)]
struct DiscussionsResponse {
    repository: Option<RepositoryDiscussions>,
}

#[derive(Deserialize)]
struct RepositoryDiscussions {
    discussions: Fragment<RawDiscussion>,
}

impl FragmentSource for RepositoryDiscussions {
    type Node = RawDiscussion;

    fn into_fragment(self) -> Fragment<RawDiscussion> {
        self.discussions
    }
}

#[derive(Deserialize)]
struct DiscussionResponse {
    repository: Option<RepositoryDiscussion>,
}

#[derive(Deserialize)]
struct RepositoryDiscussion {
    discussion: Option<RawDiscussion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDiscussionResponse {
    create_discussion: MutationPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateDiscussionResponse {
    update_discussion: MutationPayload,
}

#[derive(Deserialize)]
struct MutationPayload {
    discussion: Option<MutatedDiscussion>,
}

#[derive(Deserialize)]
struct MutatedDiscussion {
    id: String,
    number: u64,
    url: String,
}

impl From<MutatedDiscussion> for MutationIdentity {
    fn from(d: MutatedDiscussion) -> Self {
        Self {
            id: d.id,
            number: Some(d.number),
            url: d.url,
        }
    }
}

fn repository_not_found(owner: &str, repo: &str) -> DiscussError {
    DiscussError::RepositoryNotFound {
        owner: owner.to_string(),
        repo: repo.to_string(),
    }
}

/// List one page of discussions.
///
/// The query shape depends on whether a category filter and a complete
/// ordering were given; the result is normalized the same way for all of
/// them.
#[instrument(skip_all, fields(owner = %request.owner, repo = %request.repo))]
pub async fn list(session: &Session<'_>, request: &ListDiscussions) -> Result<DiscussionPage> {
    let page = request.page.to_cursor_args()?;

    let ordering = Ordering::from_parts(request.order_by, request.direction);
    if ordering.is_none() && (request.order_by.is_some() || request.direction.is_some()) {
        warn!("ordering needs both a field and a direction; listing unordered");
    }

    let filter = match &request.category {
        Some(selector) => Some(Value::from(
            resolve_category(session, &request.owner, &request.repo, selector).await?,
        )),
        None => None,
    };

    let plan = DISCUSSION_LISTING.plan(
        scope(&request.owner, &request.repo),
        &page,
        filter,
        ordering,
    );
    debug!(
        variant = ?plan.variant,
        filtered = plan.variant.has_category_filter(),
        ordered = plan.variant.has_ordering(),
        first = page.first,
        "listing discussions"
    );

    let response: DiscussionsResponse = session
        .query("discussions", plan.query, plan.variables)
        .await?;
    let repository = response
        .repository
        .ok_or_else(|| repository_not_found(&request.owner, &request.repo))?;

    let page = normalize_page(repository)?;
    Ok(DiscussionPage {
        discussions: page.items,
        page_info: page.page_info,
        total_count: page.total_count,
    })
}

/// Fetch a single discussion, including its body.
#[instrument(skip(session))]
pub async fn get(session: &Session<'_>, owner: &str, repo: &str, number: u64) -> Result<Discussion> {
    let response: DiscussionResponse = session
        .query(
            "discussion",
            GET_DISCUSSION_QUERY,
            scope(owner, repo).with("number", number),
        )
        .await?;

    response
        .repository
        .ok_or_else(|| repository_not_found(owner, repo))?
        .discussion
        .ok_or_else(|| DiscussError::DiscussionNotFound {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })?
        .normalize()
}

/// Create a discussion. The repository and category are resolved first; the
/// mutation is only sent once both ids are known.
#[instrument(skip_all, fields(owner = %request.owner, repo = %request.repo))]
pub async fn create(session: &Session<'_>, request: &CreateDiscussion) -> Result<MutationIdentity> {
    let selector = request.category.as_ref().ok_or_else(|| {
        DiscussError::InvalidArgument(
            "either --category-id or --category-name is required".to_string(),
        )
    })?;

    let repository_id = resolve_repository_id(session, &request.owner, &request.repo).await?;
    let category_id = resolve_category(session, &request.owner, &request.repo, selector).await?;

    let input = Variables::new()
        .with("repositoryId", repository_id)
        .with("categoryId", category_id)
        .with("title", request.title.as_str())
        .with("body", request.body.as_str());

    let response: CreateDiscussionResponse = session
        .mutate("createDiscussion", CREATE_DISCUSSION_MUTATION, input)
        .await?;

    response
        .create_discussion
        .discussion
        .map(MutationIdentity::from)
        .ok_or(DiscussError::EmptyResponse)
}

/// Update title, body and/or category of a discussion.
#[instrument(skip_all, fields(owner = %request.owner, repo = %request.repo, number = request.number))]
pub async fn update(session: &Session<'_>, request: &UpdateDiscussion) -> Result<MutationIdentity> {
    let title = request.title.as_deref().filter(|s| !s.is_empty());
    let body = request.body.as_deref().filter(|s| !s.is_empty());

    if title.is_none() && body.is_none() && request.category.is_none() {
        return Err(DiscussError::InvalidArgument(
            "at least one of --title, --body, --category-id or --category-name must be provided"
                .to_string(),
        ));
    }

    let discussion_id =
        resolve_discussion_id(session, &request.owner, &request.repo, request.number).await?;

    let category_id = match &request.category {
        Some(selector) => {
            Some(resolve_category(session, &request.owner, &request.repo, selector).await?)
        }
        None => None,
    };

    let input = Variables::new()
        .with("discussionId", discussion_id)
        .with_opt("title", title)
        .with_opt("body", body)
        .with_opt("categoryId", category_id);

    let response: UpdateDiscussionResponse = session
        .mutate("updateDiscussion", UPDATE_DISCUSSION_MUTATION, input)
        .await?;

    response
        .update_discussion
        .discussion
        .map(MutationIdentity::from)
        .ok_or(DiscussError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GraphQLExecutor;
    use crate::error::ErrorKind;
    use crate::testing::{FixtureExecutor, MockExecutor};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;
    use super::variant::QueryVariant;

    fn list_request(first: Option<i64>, after: Option<String>) -> ListDiscussions {
        ListDiscussions {
            owner: "acme".into(),
            repo: "core".into(),
            page: PageRequest::new(first, after),
            ..Default::default()
        }
    }

    fn numbers(page: &DiscussionPage) -> Vec<u64> {
        page.discussions.iter().map(|d| d.number).collect()
    }

    #[tokio::test]
    async fn test_list_pages_through_fixture() {
        let fixture = FixtureExecutor::discussions(5);
        let session = Session::new(&fixture, CancellationToken::new());

        let first = list(&session, &list_request(Some(2), None)).await.unwrap();
        assert_eq!(numbers(&first), vec![1, 2]);
        assert!(first.page_info.has_next_page);
        assert_eq!(first.total_count, 5);

        let second = list(&session, &list_request(Some(2), first.page_info.end_cursor.clone()))
            .await
            .unwrap();
        assert_eq!(numbers(&second), vec![3, 4]);
        assert!(second.page_info.has_previous_page);

        let calls = fixture.calls();
        assert_eq!(calls[0].query, DISCUSSION_LISTING.query(QueryVariant::Basic));
        assert_eq!(calls[0].variables.get("first"), Some(&json!(2)));
        assert_eq!(calls[0].variables.get("after"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_cursor_round_trip_visits_every_node_once() {
        let fixture = FixtureExecutor::discussions(7);
        let session = Session::new(&fixture, CancellationToken::new());

        let mut seen = Vec::new();
        let mut after = None;
        loop {
            let page = list(&session, &list_request(Some(3), after)).await.unwrap();
            seen.extend(numbers(&page));
            if !page.page_info.has_next_page {
                break;
            }
            after = page.page_info.end_cursor;
        }

        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_default_page_size_sent() {
        let fixture = FixtureExecutor::discussions(3);
        let session = Session::new(&fixture, CancellationToken::new());

        let page = list(&session, &list_request(None, None)).await.unwrap();

        assert_eq!(numbers(&page), vec![1, 2, 3]);
        assert_eq!(fixture.calls()[0].variables.get("first"), Some(&json!(30)));
    }

    #[tokio::test]
    async fn test_invalid_page_size_issues_no_call() {
        let fixture = FixtureExecutor::discussions(3);
        let session = Session::new(&fixture, CancellationToken::new());

        let err = list(&session, &list_request(Some(0), None)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(fixture.calls().is_empty());
    }

    #[tokio::test]
    async fn test_ordered_listing_uses_ordered_shape() {
        let fixture = FixtureExecutor::discussions(4);
        let session = Session::new(&fixture, CancellationToken::new());
        let request = ListDiscussions {
            order_by: Some(DiscussionOrderField::CreatedAt),
            direction: Some(OrderDirection::Desc),
            ..list_request(Some(2), None)
        };

        let page = list(&session, &request).await.unwrap();

        assert_eq!(numbers(&page), vec![4, 3]);
        let call = &fixture.calls()[0];
        assert_eq!(call.query, DISCUSSION_LISTING.query(QueryVariant::BasicOrdered));
        assert_eq!(call.variables.get("orderByField"), Some(&json!("CREATED_AT")));
    }

    #[tokio::test]
    async fn test_direction_without_field_lists_unordered() {
        let fixture = FixtureExecutor::discussions(4);
        let session = Session::new(&fixture, CancellationToken::new());
        let request = ListDiscussions {
            direction: Some(OrderDirection::Desc),
            ..list_request(Some(2), None)
        };

        let page = list(&session, &request).await.unwrap();

        assert_eq!(numbers(&page), vec![1, 2]);
        let call = &fixture.calls()[0];
        assert_eq!(call.query, DISCUSSION_LISTING.query(QueryVariant::Basic));
        assert!(!call.variables.contains_key("orderByDirection"));
    }

    #[tokio::test]
    async fn test_category_id_filter() {
        let fixture = FixtureExecutor::discussions(5);
        let session = Session::new(&fixture, CancellationToken::new());
        let request = ListDiscussions {
            category: Some(CategorySelector::Id("DIC_qa".into())),
            ..list_request(None, None)
        };

        let page = list(&session, &request).await.unwrap();

        assert_eq!(numbers(&page), vec![2, 4]);
        assert_eq!(page.total_count, 2);
        assert!(page.discussions.iter().all(|d| d.answer_chosen_at.is_some()));
        assert_eq!(
            fixture.calls()[0].query,
            DISCUSSION_LISTING.query(QueryVariant::CategoryFiltered)
        );
    }

    #[tokio::test]
    async fn test_category_name_resolved_before_listing() {
        let mock = MockExecutor::new(vec![
            Ok(json!({
                "repository": {
                    "discussionCategories": {
                        "nodes": [{ "id": "DIC_ideas", "name": "Ideas" }]
                    }
                }
            })),
            Ok(json!({
                "repository": {
                    "discussions": {
                        "nodes": [],
                        "pageInfo": {
                            "hasNextPage": false,
                            "hasPreviousPage": false,
                            "startCursor": null,
                            "endCursor": null
                        },
                        "totalCount": 0
                    }
                }
            })),
        ]);
        let session = Session::new(&mock, CancellationToken::new());
        let request = ListDiscussions {
            category: Some(CategorySelector::Name("ideas".into())),
            order_by: Some(DiscussionOrderField::UpdatedAt),
            direction: Some(OrderDirection::Asc),
            ..list_request(None, None)
        };

        let page = list(&session, &request).await.unwrap();

        assert!(page.discussions.is_empty());
        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].query,
            DISCUSSION_LISTING.query(QueryVariant::CategoryFilteredOrdered)
        );
        assert_eq!(calls[1].variables.get("categoryId"), Some(&json!("DIC_ideas")));
    }

    #[tokio::test]
    async fn test_remote_error_passes_through() {
        let mock = MockExecutor::new(vec![Err(DiscussError::GraphQL {
            messages: vec!["Could not resolve to a Repository with the name 'acme/gone'.".into()],
        })]);
        let session = Session::new(&mock, CancellationToken::new());

        let err = list(&session, &list_request(None, None)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RemoteFailure);
        assert_eq!(
            err.to_string(),
            "Could not resolve to a Repository with the name 'acme/gone'."
        );
    }

    #[tokio::test]
    async fn test_get_includes_body_and_omits_missing_answer() {
        let mock = MockExecutor::new(vec![Ok(json!({
            "repository": {
                "discussion": {
                    "number": 12,
                    "title": "Roadmap",
                    "body": "What's next?",
                    "url": "https://github.com/acme/core/discussions/12",
                    "createdAt": "2024-05-01T00:00:00Z",
                    "updatedAt": "2024-05-02T00:00:00Z",
                    "closed": true,
                    "isAnswered": false,
                    "answerChosenAt": null,
                    "author": null,
                    "category": { "name": "Announcements" }
                }
            }
        }))]);
        let session = Session::new(&mock, CancellationToken::new());

        let discussion = get(&session, "acme", "core", 12).await.unwrap();
        let value = serde_json::to_value(&discussion).unwrap();

        assert_eq!(value["body"], json!("What's next?"));
        assert_eq!(value["closed"], json!(true));
        assert!(value.get("answerChosenAt").is_none());
        assert_eq!(mock.calls()[0].variables.get("number"), Some(&json!(12)));
    }

    #[tokio::test]
    async fn test_get_missing_discussion() {
        let mock = MockExecutor::new(vec![Ok(json!({ "repository": { "discussion": null } }))]);
        let session = Session::new(&mock, CancellationToken::new());

        let err = get(&session, "acme", "core", 404).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    fn create_request(category: Option<CategorySelector>) -> CreateDiscussion {
        CreateDiscussion {
            owner: "acme".into(),
            repo: "core".into(),
            title: "Hello".into(),
            body: "First post".into(),
            category,
        }
    }

    #[tokio::test]
    async fn test_create_requires_category() {
        let mock = MockExecutor::new(vec![]);
        let session = Session::new(&mock, CancellationToken::new());

        let err = create(&session, &create_request(None)).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_resolves_then_mutates() {
        let mock = MockExecutor::new(vec![
            Ok(json!({ "repository": { "id": "R_kgDOA" } })),
            Ok(json!({
                "repository": {
                    "discussionCategories": { "nodes": [{ "id": "DIC_general", "name": "General" }] }
                }
            })),
            Ok(json!({
                "createDiscussion": {
                    "discussion": {
                        "id": "D_new",
                        "number": 42,
                        "url": "https://github.com/acme/core/discussions/42"
                    }
                }
            })),
        ]);
        let session = Session::new(&mock, CancellationToken::new());

        let identity = create(
            &session,
            &create_request(Some(CategorySelector::Name("general".into()))),
        )
        .await
        .unwrap();

        assert_eq!(identity.number, Some(42));
        assert_eq!(identity.id, "D_new");
        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].query, CREATE_DISCUSSION_MUTATION);
        assert_eq!(
            calls[2].variables.get("input"),
            Some(&json!({
                "repositoryId": "R_kgDOA",
                "categoryId": "DIC_general",
                "title": "Hello",
                "body": "First post"
            }))
        );
    }

    #[tokio::test]
    async fn test_unresolved_category_blocks_mutation() {
        let mock = MockExecutor::new(vec![
            Ok(json!({ "repository": { "id": "R_kgDOA" } })),
            Ok(json!({
                "repository": {
                    "discussionCategories": { "nodes": [{ "id": "DIC_general", "name": "General" }] }
                }
            })),
        ]);
        let session = Session::new(&mock, CancellationToken::new());

        let err = create(
            &session,
            &create_request(Some(CategorySelector::Name("Announcements".into()))),
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(mock
            .calls()
            .iter()
            .all(|c| !c.query.contains("createDiscussion")));
    }

    #[tokio::test]
    async fn test_empty_update_rejected_before_any_call() {
        let mock = MockExecutor::new(vec![]);
        let session = Session::new(&mock, CancellationToken::new());
        let request = UpdateDiscussion {
            owner: "acme".into(),
            repo: "core".into(),
            number: 3,
            title: Some(String::new()),
            ..Default::default()
        };

        let err = update(&session, &request).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_only_given_fields() {
        let mock = MockExecutor::new(vec![
            Ok(json!({ "repository": { "discussion": { "id": "D_3" } } })),
            Ok(json!({
                "updateDiscussion": {
                    "discussion": {
                        "id": "D_3",
                        "number": 3,
                        "url": "https://github.com/acme/core/discussions/3"
                    }
                }
            })),
        ]);
        let session = Session::new(&mock, CancellationToken::new());
        let request = UpdateDiscussion {
            owner: "acme".into(),
            repo: "core".into(),
            number: 3,
            title: Some("Renamed".into()),
            ..Default::default()
        };

        let identity = update(&session, &request).await.unwrap();

        assert_eq!(identity.id, "D_3");
        assert_eq!(
            mock.calls()[1].variables.get("input"),
            Some(&json!({ "discussionId": "D_3", "title": "Renamed" }))
        );
    }

    /// Cancels the token after the first call completes.
    struct CancelAfterFirst<'a> {
        inner: &'a MockExecutor,
        cancel: CancellationToken,
    }

    #[async_trait]
    impl<'a> GraphQLExecutor for CancelAfterFirst<'a> {
        async fn execute(&self, query: &str, variables: Variables) -> Result<Value> {
            let result = self.inner.execute(query, variables).await;
            self.cancel.cancel();
            result
        }
    }

    #[tokio::test]
    async fn test_cancellation_between_lookup_and_mutation() {
        let mock = MockExecutor::new(vec![Ok(json!({
            "repository": { "discussion": { "id": "D_3" } }
        }))]);
        let cancel = CancellationToken::new();
        let executor = CancelAfterFirst {
            inner: &mock,
            cancel: cancel.clone(),
        };
        let session = Session::new(&executor, cancel);
        let request = UpdateDiscussion {
            owner: "acme".into(),
            repo: "core".into(),
            number: 3,
            body: Some("edited".into()),
            ..Default::default()
        };

        let err = update(&session, &request).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(mock.calls().len(), 1);
    }
}
