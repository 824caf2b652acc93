//! Response envelope shared by every endpoint of the admin API.
//!
//! Successful responses look like
//! `{ "message": "...", "data": { "<resource>": T | [T], "pagination": {...} } }`.
//! Failed responses carry at least `{ "message": "..." }`.

use crate::core::{ConsoleError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: JsonValue,
}

impl ApiEnvelope {
    pub fn new(message: impl Into<String>, data: JsonValue) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    /// Wrap a single resource under `key`.
    pub fn single<T: Serialize>(message: impl Into<String>, key: &str, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(Self::new(message, json!({ key: value })))
    }

    /// Wrap a page of resources under `key` together with its pagination block.
    pub fn page<T: Serialize>(
        message: impl Into<String>,
        key: &str,
        items: &[T],
        pagination: &Pagination,
    ) -> Result<Self> {
        let items = serde_json::to_value(items)?;
        let pagination = serde_json::to_value(pagination)?;
        Ok(Self::new(
            message,
            json!({ key: items, "pagination": pagination }),
        ))
    }

    /// Extract `data.<key>` as `T`.
    pub fn resource<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let raw = self
            .data
            .get(key)
            .ok_or_else(|| ConsoleError::Decode(format!("response is missing data.{key}")))?;
        Ok(T::deserialize(raw)?)
    }

    /// Extract `data.<key>` as a list plus the optional pagination block.
    pub fn list<T: DeserializeOwned>(&self, key: &str) -> Result<RemoteListResult<T>> {
        let items: Vec<T> = self.resource(key)?;
        let pagination = match self.data.get("pagination") {
            Some(JsonValue::Null) | None => None,
            Some(raw) => Some(Pagination::deserialize(raw)?),
        };
        Ok(RemoteListResult::from_parts(items, pagination))
    }
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_pages: u32,
    pub current_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
}

impl Pagination {
    /// Pagination block for `total` items split into pages of `limit`.
    pub fn for_total(total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if total == 0 || limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            total_pages,
            current_page: page,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
            total_items: Some(total),
        }
    }
}

/// Immutable snapshot of one fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteListResult<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub current_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> RemoteListResult<T> {
    pub fn from_parts(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        match pagination {
            Some(p) => Self {
                items,
                total_pages: p.total_pages,
                current_page: p.current_page.max(1),
                has_next_page: p.has_next_page,
                has_prev_page: p.has_prev_page,
            },
            // Unpaginated endpoints return everything at once.
            None => {
                let total_pages = if items.is_empty() { 0 } else { 1 };
                Self {
                    items,
                    total_pages,
                    current_page: 1,
                    has_next_page: false,
                    has_prev_page: false,
                }
            }
        }
    }

    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), None)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
