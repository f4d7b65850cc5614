//! Mapping of remote payloads into caller-facing records.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{DiscussError, Result};
use crate::responses::{FragmentSource, PageInfo};
use crate::types::{CategoryName, Discussion, DiscussionCategory, DiscussionComment};

/// A discussion node as GitHub returns it.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawDiscussion {
    pub number: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub closed: bool,
    // null for categories that do not accept answers
    pub is_answered: Option<bool>,
    pub answer_chosen_at: Option<String>,
    pub author: Option<RawActor>,
    pub category: RawCategory,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawActor {
    pub login: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawCategory {
    pub name: String,
}

/// Conversion from a remote node into its output record.
pub trait Normalize {
    type Output;

    fn normalize(self) -> Result<Self::Output>;
}

impl Normalize for RawDiscussion {
    type Output = Discussion;

    fn normalize(self) -> Result<Discussion> {
        let number = u64::try_from(self.number).map_err(|_| DiscussError::InvalidField {
            field: "number",
            value: self.number.to_string(),
        })?;

        Ok(Discussion {
            number,
            title: self.title,
            url: self.url,
            body: self.body,
            author: self.author.map(|a| a.login),
            category: CategoryName {
                name: self.category.name,
            },
            created_at: parse_timestamp("createdAt", &self.created_at)?,
            updated_at: parse_timestamp("updatedAt", &self.updated_at)?,
            closed: self.closed,
            is_answered: self.is_answered.unwrap_or(false),
            answer_chosen_at: self
                .answer_chosen_at
                .as_deref()
                .map(|ts| parse_timestamp("answerChosenAt", ts))
                .transpose()?,
        })
    }
}

impl Normalize for DiscussionComment {
    type Output = DiscussionComment;

    fn normalize(self) -> Result<DiscussionComment> {
        Ok(self)
    }
}

impl Normalize for DiscussionCategory {
    type Output = DiscussionCategory;

    fn normalize(self) -> Result<DiscussionCategory> {
        Ok(self)
    }
}

/// Normalized nodes of one page with its pagination state.
#[derive(Debug)]
pub struct NormalizedPage<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

/// Normalize any result that carries a fragment, regardless of which query
/// shape produced it.
pub fn normalize_page<S>(source: S) -> Result<NormalizedPage<<S::Node as Normalize>::Output>>
where
    S: FragmentSource,
    S::Node: Normalize,
{
    let fragment = source.into_fragment();
    let items = fragment
        .nodes
        .into_iter()
        .map(Normalize::normalize)
        .collect::<Result<Vec<_>>>()?;

    Ok(NormalizedPage {
        items,
        page_info: fragment.page_info,
        total_count: fragment.total_count,
    })
}

pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DiscussError::InvalidField {
            field,
            value: value.to_string(),
        })
}
