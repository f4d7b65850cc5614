//! Query shape selection for listings with optional filter and ordering.
//!
//! GitHub rejects an `orderBy` or `categoryId` argument bound to `null`, so
//! leaving one out has to happen in the query text itself. Each combination
//! of "has a filter" and "has an ordering" gets its own document, and the
//! variable map only carries the keys that document declares.

use std::fmt;

use const_format::concatcp;
use serde_json::Value;

use crate::pagination::{CursorArgs, Variables};

/// One of the four listing query shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryVariant {
    Basic,
    BasicOrdered,
    CategoryFiltered,
    CategoryFilteredOrdered,
}

impl QueryVariant {
    #[cfg(test)]
    pub const ALL: [QueryVariant; 4] = [
        QueryVariant::Basic,
        QueryVariant::BasicOrdered,
        QueryVariant::CategoryFiltered,
        QueryVariant::CategoryFilteredOrdered,
    ];

    pub fn select(has_category_filter: bool, has_ordering: bool) -> Self {
        match (has_category_filter, has_ordering) {
            (false, false) => QueryVariant::Basic,
            (false, true) => QueryVariant::BasicOrdered,
            (true, false) => QueryVariant::CategoryFiltered,
            (true, true) => QueryVariant::CategoryFilteredOrdered,
        }
    }

    pub fn has_category_filter(self) -> bool {
        matches!(
            self,
            QueryVariant::CategoryFiltered | QueryVariant::CategoryFilteredOrdered
        )
    }

    pub fn has_ordering(self) -> bool {
        matches!(
            self,
            QueryVariant::BasicOrdered | QueryVariant::CategoryFilteredOrdered
        )
    }
}

/// A complete order clause. Only built when both halves were supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordering<F, D> {
    pub field: F,
    pub direction: D,
}

impl<F, D> Ordering<F, D> {
    /// Combine an optional field and direction. Either one alone yields `None`.
    pub fn from_parts(field: Option<F>, direction: Option<D>) -> Option<Self> {
        match (field, direction) {
            (Some(field), Some(direction)) => Some(Self { field, direction }),
            _ => None,
        }
    }
}

/// Query documents and variable names for a listing with one optional
/// filter argument and one optional ordering argument.
#[derive(Debug)]
pub struct ListingShape {
    pub basic: &'static str,
    pub ordered: &'static str,
    pub filtered: &'static str,
    pub filtered_ordered: &'static str,
    pub filter_var: &'static str,
    pub order_field_var: &'static str,
    pub order_direction_var: &'static str,
}

/// The chosen query document with its bindings.
#[derive(Debug, Clone)]
pub struct ListingPlan {
    pub variant: QueryVariant,
    pub query: &'static str,
    pub variables: Variables,
}

impl ListingShape {
    pub fn query(&self, variant: QueryVariant) -> &'static str {
        match variant {
            QueryVariant::Basic => self.basic,
            QueryVariant::BasicOrdered => self.ordered,
            QueryVariant::CategoryFiltered => self.filtered,
            QueryVariant::CategoryFilteredOrdered => self.filtered_ordered,
        }
    }

    /// Pick the query shape and build its variables on top of `scope`.
    pub fn plan<F, D>(
        &self,
        scope: Variables,
        page: &CursorArgs,
        filter: Option<Value>,
        ordering: Option<Ordering<F, D>>,
    ) -> ListingPlan
    where
        F: fmt::Display,
        D: fmt::Display,
    {
        let variant = QueryVariant::select(filter.is_some(), ordering.is_some());

        let mut variables = page.bind(scope).with_opt(self.filter_var, filter);
        if let Some(ordering) = ordering {
            variables = variables
                .with(self.order_field_var, ordering.field.to_string())
                .with(self.order_direction_var, ordering.direction.to_string());
        }

        ListingPlan {
            variant,
            query: self.query(variant),
            variables,
        }
    }
}

const DISCUSSION_FIELDS: &str = r#"
fragment DiscussionFields on DiscussionConnection {
    nodes {
        number
        title
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
    pageInfo {
        hasNextPage
        hasPreviousPage
        startCursor
        endCursor
    }
    totalCount
}
"#;

const LIST_DISCUSSIONS_QUERY: &str = concatcp!(
    r#"
query ListDiscussions($owner: String!, $repo: String!, $first: Int!, $after: String) {
    repository(owner: $owner, name: $repo) {
        discussions(first: $first, after: $after) {
            ...DiscussionFields
        }
    }
}
"#,
    DISCUSSION_FIELDS
);

const LIST_DISCUSSIONS_ORDERED_QUERY: &str = concatcp!(
    r#"
query ListDiscussionsOrdered($owner: String!, $repo: String!, $first: Int!, $after: String, $orderByField: DiscussionOrderField!, $orderByDirection: OrderDirection!) {
    repository(owner: $owner, name: $repo) {
        discussions(first: $first, after: $after, orderBy: { field: $orderByField, direction: $orderByDirection }) {
            ...DiscussionFields
        }
    }
}
"#,
    DISCUSSION_FIELDS
);

const LIST_DISCUSSIONS_BY_CATEGORY_QUERY: &str = concatcp!(
    r#"
query ListDiscussionsByCategory($owner: String!, $repo: String!, $first: Int!, $after: String, $categoryId: ID!) {
    repository(owner: $owner, name: $repo) {
        discussions(first: $first, after: $after, categoryId: $categoryId) {
            ...DiscussionFields
        }
    }
}
"#,
    DISCUSSION_FIELDS
);

const LIST_DISCUSSIONS_BY_CATEGORY_ORDERED_QUERY: &str = concatcp!(
    r#"
query ListDiscussionsByCategoryOrdered($owner: String!, $repo: String!, $first: Int!, $after: String, $categoryId: ID!, $orderByField: DiscussionOrderField!, $orderByDirection: OrderDirection!) {
    repository(owner: $owner, name: $repo) {
        discussions(first: $first, after: $after, categoryId: $categoryId, orderBy: { field: $orderByField, direction: $orderByDirection }) {
            ...DiscussionFields
        }
    }
}
"#,
    DISCUSSION_FIELDS
);

pub const DISCUSSION_LISTING: ListingShape = ListingShape {
    basic: LIST_DISCUSSIONS_QUERY,
    ordered: LIST_DISCUSSIONS_ORDERED_QUERY,
    filtered: LIST_DISCUSSIONS_BY_CATEGORY_QUERY,
    filtered_ordered: LIST_DISCUSSIONS_BY_CATEGORY_ORDERED_QUERY,
    filter_var: "categoryId",
    order_field_var: "orderByField",
    order_direction_var: "orderByDirection",
};
