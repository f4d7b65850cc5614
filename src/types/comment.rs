use serde::{Deserialize, Serialize};

use crate::responses::PageInfo;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DiscussionComment {
    pub id: String,
    pub body: String,
    pub url: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub comments: Vec<DiscussionComment>,
    pub page_info: PageInfo,
    pub total_count: u64,
}
