//! Executors for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::GraphQLExecutor;
use crate::error::Result;
use crate::pagination::Variables;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub query: String,
    pub variables: Variables,
}

/// Returns scripted responses in order and records every request.
pub struct MockExecutor {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockExecutor {
    pub fn new(responses: Vec<Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphQLExecutor for MockExecutor {
    async fn execute(&self, query: &str, variables: Variables) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            query: query.to_string(),
            variables,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected GraphQL call: {query}"))
    }
}

/// Serves a fixed set of discussions with real cursor semantics.
///
/// Cursors are `cursor:<index>` positions in the (optionally ordered and
/// filtered) collection.
pub struct FixtureExecutor {
    nodes: Vec<Value>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FixtureExecutor {
    /// `count` discussions numbered from 1, created one day apart. Odd
    /// numbers are in "General", even numbers in "Q&A" and answered.
    pub fn discussions(count: u64) -> Self {
        let nodes = (1..=count)
            .map(|n| {
                let answered = n % 2 == 0;
                let (category_id, category_name) = if answered {
                    ("DIC_qa", "Q&A")
                } else {
                    ("DIC_general", "General")
                };
                json!({
                    "number": n,
                    "title": format!("Discussion {n}"),
                    "url": format!("https://github.com/acme/core/discussions/{n}"),
                    "createdAt": format!("2024-01-{:02}T09:00:00Z", n),
                    "updatedAt": format!("2024-02-{:02}T09:00:00Z", 29 - n),
                    "closed": false,
                    "isAnswered": answered,
                    "answerChosenAt": if answered {
                        json!(format!("2024-01-{:02}T18:00:00Z", n))
                    } else {
                        Value::Null
                    },
                    "author": { "login": "octocat" },
                    "category": { "id": category_id, "name": category_name }
                })
            })
            .collect();

        Self {
            nodes,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphQLExecutor for FixtureExecutor {
    async fn execute(&self, query: &str, variables: Variables) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            query: query.to_string(),
            variables: variables.clone(),
        });

        let mut nodes = self.nodes.clone();
        if let Some(category) = variables.get("categoryId").and_then(Value::as_str) {
            nodes.retain(|n| n["category"]["id"] == category);
        }
        if let Some(field) = variables.get("orderByField").and_then(Value::as_str) {
            let key = match field {
                "UPDATED_AT" => "updatedAt",
                _ => "createdAt",
            };
            nodes.sort_by(|a, b| a[key].as_str().cmp(&b[key].as_str()));
            if variables.get("orderByDirection") == Some(&json!("DESC")) {
                nodes.reverse();
            }
        }

        let total = nodes.len();
        let start = match variables.get("after").and_then(Value::as_str) {
            Some(cursor) => {
                let index: usize = cursor
                    .strip_prefix("cursor:")
                    .and_then(|i| i.parse().ok())
                    .unwrap_or_else(|| panic!("foreign cursor {cursor}"));
                index + 1
            }
            None => 0,
        }
        .min(total);
        let first = variables.get("first").and_then(Value::as_u64).unwrap_or(30) as usize;
        let end = (start + first).min(total);
        let cursor = |i: usize| json!(format!("cursor:{i}"));
        let (start_cursor, end_cursor) = if start < end {
            (cursor(start), cursor(end - 1))
        } else {
            (Value::Null, Value::Null)
        };

        let page = nodes[start..end].to_vec();

        Ok(json!({
            "repository": {
                "discussions": {
                    "nodes": page,
                    "pageInfo": {
                        "hasNextPage": end < total,
                        "hasPreviousPage": start > 0,
                        "startCursor": start_cursor,
                        "endCursor": end_cursor
                    },
                    "totalCount": total
                }
            }
        }))
    }
}
