use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::responses::PageInfo;

/// A discussion as presented to callers.
///
/// `answer_chosen_at` and `body` are only present when the remote payload
/// carried them; they are left out of the serialized form otherwise.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub category: CategoryName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed: bool,
    pub is_answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_chosen_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryName {
    pub name: String,
}

/// One page of discussions.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionPage {
    pub discussions: Vec<Discussion>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

/// Identity returned by discussion and comment mutations.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MutationIdentity {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    pub url: String,
}
