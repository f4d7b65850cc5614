use serde::{Deserialize, Serialize};

use crate::responses::PageInfo;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DiscussionCategory {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub categories: Vec<DiscussionCategory>,
    pub page_info: PageInfo,
    pub total_count: u64,
}
