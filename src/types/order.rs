use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fields a discussion listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscussionOrderField {
    /// Order by creation time
    CreatedAt,
    /// Order by last update time
    UpdatedAt,
}

impl DiscussionOrderField {
    pub fn as_graphql(self) -> &'static str {
        match self {
            Self::CreatedAt => "CREATED_AT",
            Self::UpdatedAt => "UPDATED_AT",
        }
    }
}

impl fmt::Display for DiscussionOrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_graphql())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    /// Ascending (oldest first)
    Asc,
    /// Descending (newest first)
    Desc,
}

impl OrderDirection {
    pub fn as_graphql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_graphql())
    }
}
