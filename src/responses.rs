//! Shared GraphQL response types used across operations.

use serde::{Deserialize, Serialize};

/// Pagination info for cursor-based pagination.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

/// The `{ nodes, pageInfo, totalCount }` selection shared by every listing.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Fragment<T> {
    pub nodes: Vec<T>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

/// Anything that carries a [`Fragment`], whichever query produced it.
pub trait FragmentSource {
    type Node;

    fn into_fragment(self) -> Fragment<Self::Node>;
}

impl<T> FragmentSource for Fragment<T> {
    type Node = T;

    fn into_fragment(self) -> Fragment<T> {
        self
    }
}

/// Node carrying only its opaque id, for lookups.
#[derive(Deserialize, Debug)]
pub struct IdNode {
    pub id: String,
}

/// Wrapper for `{ nodes }` selections without page info.
#[derive(Deserialize, Debug)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}
