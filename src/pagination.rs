//! Cursor pagination and GraphQL variable bindings.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DiscussError, Result};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Largest page GitHub accepts for a connection.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A generic forward-pagination request as decoded from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub first: Option<i64>,
    pub after: Option<String>,
}

/// Pagination arguments ready to bind into a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorArgs {
    pub first: u32,
    pub after: Option<String>,
}

impl PageRequest {
    pub fn new(first: Option<i64>, after: Option<String>) -> Self {
        Self { first, after }
    }

    pub fn to_cursor_args(&self) -> Result<CursorArgs> {
        let first = match self.first {
            None => DEFAULT_PAGE_SIZE,
            Some(n) if n <= 0 => {
                return Err(DiscussError::InvalidArgument(format!(
                    "first must be a positive integer, got {n}"
                )))
            }
            Some(n) => u32::try_from(n)
                .ok()
                .filter(|n| *n <= MAX_PAGE_SIZE)
                .ok_or_else(|| {
                    DiscussError::InvalidArgument(format!(
                        "first must be at most {MAX_PAGE_SIZE}, got {n}"
                    ))
                })?,
        };

        Ok(CursorArgs {
            first,
            after: self.after.clone(),
        })
    }
}

impl CursorArgs {
    /// Bind `first` and `after`. A missing cursor is sent as an explicit
    /// `null`: GitHub accepts a null `after`, and the key must be present
    /// because every listing query declares `$after`.
    pub fn bind(&self, variables: Variables) -> Variables {
        variables
            .with("first", Value::from(self.first))
            .with(
                "after",
                self.after
                    .as_deref()
                    .map(Value::from)
                    .unwrap_or(Value::Null),
            )
    }
}

/// Variable map for one GraphQL request.
///
/// Keys are inserted only when a value is meant to be sent. An absent key and
/// a key bound to `null` are different things to the remote schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Variables(Map<String, Value>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Insert `key` only when `value` is present.
    pub fn with_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[cfg(test)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
