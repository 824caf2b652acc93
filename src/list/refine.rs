//! Client-side refinement of a fetched page.
//!
//! Covers what the backend query cannot express: client-scope filters and the
//! case-insensitive display-name sort. It is a pure function of the snapshot
//! and the query and is recomputed for every view, never stored.

use super::entity::{ALL, FilterScope, ListEntity, NAME_SORT_KEY};
use super::query::{ListQuery, SortDirection};
use std::cmp::Ordering;

pub fn refine<'a, T: ListEntity>(items: &'a [T], query: &ListQuery) -> Vec<&'a T> {
    let client_filters: Vec<(&str, &str)> = query
        .filters()
        .filter(|(_, value)| *value != ALL)
        .filter(|(name, _)| {
            T::filter_def(name).is_some_and(|def| def.scope == FilterScope::Client)
        })
        .collect();

    let mut rows: Vec<&T> = items
        .iter()
        .filter(|item| {
            client_filters
                .iter()
                .all(|(name, value)| item.matches_client_filter(name, value))
        })
        .collect();

    let sort = query.sort();
    if sort.key == NAME_SORT_KEY {
        sort_by_display_name(&mut rows, sort.direction);
    }
    rows
}

/// Stable, case-insensitive sort. Equal names keep backend order in both
/// directions.
pub fn sort_by_display_name<T: ListEntity>(rows: &mut [&T], direction: SortDirection) {
    rows.sort_by(|left, right| {
        let ordering = compare_case_insensitive(left.display_name(), right.display_name());
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_case_insensitive(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}
