use super::entity::{ALL, FilterScope, ListEntity, NAME_SORT_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }
}

/// Pagination, search, filter and sort state of one list screen.
///
/// `page` is reset to 1 whenever the committed search or a filter changes,
/// so a narrowed result set is never shown on an out-of-range page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    search_text: String,
    debounced_search: String,
    page: u32,
    limit: u32,
    filters: BTreeMap<String, String>,
    sort: SortSpec,
}

impl ListQuery {
    pub fn new(limit: u32, sort: SortSpec) -> Self {
        Self {
            search_text: String::new(),
            debounced_search: String::new(),
            page: 1,
            limit: limit.max(1),
            filters: BTreeMap::new(),
            sort,
        }
    }

    /// Defaults for `T`: every declared filter at its first option, name sort.
    pub fn for_entity<T: ListEntity>(limit: u32) -> Self {
        let mut query = Self::new(limit, SortSpec::ascending(NAME_SORT_KEY));
        for def in T::FILTERS {
            query
                .filters
                .insert(def.name.to_string(), def.default_value().to_string());
        }
        query
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Record a raw keystroke value. Does not affect the fetch.
    pub fn set_search_text(&mut self, raw: &str) {
        self.search_text = raw.to_string();
    }

    /// Commit a debounced search value. Returns whether it changed.
    pub fn commit_search(&mut self, value: &str) -> bool {
        let value = value.trim();
        if self.debounced_search == value {
            return false;
        }
        self.debounced_search = value.to_string();
        self.page = 1;
        true
    }

    /// Set a discrete filter. Returns whether it changed.
    pub fn set_filter(&mut self, name: &str, value: &str) -> bool {
        if self.filter(name) == Some(value) {
            return false;
        }
        self.filters.insert(name.to_string(), value.to_string());
        self.page = 1;
        true
    }

    /// Move to `page` (clamped to 1). Filters are untouched.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// Same key flips direction; a new key starts ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort.key == key {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort = SortSpec::ascending(key);
        }
    }

    /// Identity of the server-visible part of this query.
    pub fn key<T: ListEntity>(&self) -> QueryKey {
        let filters = self
            .filters
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .filter(|(name, _)| {
                T::filter_def(name).is_none_or(|def| def.scope == FilterScope::Server)
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        QueryKey {
            page: self.page,
            limit: self.limit,
            search: self.debounced_search.clone(),
            filters,
            sort_by: self.sort.key.clone(),
            order: self.sort.direction,
        }
    }
}

/// Cache key and request parameters of one list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub filters: Vec<(String, String)>,
    pub sort_by: String,
    pub order: SortDirection,
}

impl QueryKey {
    /// Query-string pairs; an empty search is omitted.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            params.push(("search".to_string(), self.search.clone()));
        }
        params.extend(self.filters.iter().cloned());
        params.push(("sort_by".to_string(), self.sort_by.clone()));
        params.push(("order".to_string(), self.order.as_param().to_string()));
        params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .to_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        f.write_str(&params)
    }
}
