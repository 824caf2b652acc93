//! The list screen state owner.
//!
//! [`ListController`] ties together the query state, the debounced search, the
//! snapshot cache, client-side refinement and the delete confirmation for one
//! entity type. Network calls are split into an *issue* step that returns a
//! ticket and an *apply* step that consumes the ticket with the result, so a
//! UI loop can run the request on its own task and feed the outcome back. The
//! async convenience methods ([`ListController::refresh`],
//! [`ListController::delete_confirmed`]) do both steps inline.

use super::cache::{FetchTicket, QueryCache};
use super::debounce::{CommittedSearch, Debouncer};
use super::entity::ListEntity;
use super::query::ListQuery;
use super::refine::refine;
use super::table::{PageSummary, RowView, TableState, TableView, empty_message};
use crate::actions::{DeleteConfirmation, DeleteOutcome, DeleteTicket};
use crate::api::{ListSource, RemoteListResult};
use crate::config::ConsoleConfig;
use crate::core::{ConsoleError, Result};
use crate::notify::{Notifier, Toast};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ListController<T: ListEntity, S: ListSource<T>> {
    source: Arc<S>,
    query: ListQuery,
    cache: QueryCache<T>,
    in_flight: Option<FetchTicket>,
    displayed: Option<Arc<RemoteListResult<T>>>,
    /// Toast text of the latest failed fetch, cleared by the next success.
    failure: Option<String>,
    debouncer: Debouncer,
    committed: CommittedSearch,
    deletes: DeleteConfirmation,
    notifier: Arc<dyn Notifier>,
}

impl<T: ListEntity, S: ListSource<T>> ListController<T, S> {
    pub fn new(source: S, config: &ConsoleConfig, notifier: Arc<dyn Notifier>) -> Self {
        let (debouncer, committed) = Debouncer::channel(config.search_debounce);
        Self {
            source: Arc::new(source),
            query: ListQuery::for_entity::<T>(config.page_size),
            cache: QueryCache::new(config.cache_capacity),
            in_flight: None,
            displayed: None,
            failure: None,
            debouncer,
            committed,
            deletes: DeleteConfirmation::new(),
            notifier,
        }
    }

    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    // ---- query inputs ----

    /// Record a keystroke in the search box and (re)schedule its commit.
    pub fn type_search(&mut self, raw: &str) {
        self.query.set_search_text(raw);
        self.debouncer.push(raw);
    }

    /// Apply the most recent debounced value, if one arrived. Returns whether
    /// the query changed.
    pub fn poll_search(&mut self) -> bool {
        let mut latest = None;
        while let Some(value) = self.committed.try_recv() {
            latest = Some(value);
        }
        latest.is_some_and(|value| self.query.commit_search(&value))
    }

    /// Wait for the next debounced value and apply it.
    pub async fn wait_for_search(&mut self) -> bool {
        match self.committed.recv().await {
            Some(value) => self.query.commit_search(&value),
            None => false,
        }
    }

    /// Commit a search value immediately, dropping any pending keystrokes.
    pub fn commit_search(&mut self, value: &str) -> bool {
        self.debouncer.cancel();
        self.query.set_search_text(value);
        self.query.commit_search(value)
    }

    pub fn set_filter(&mut self, name: &str, value: &str) -> Result<bool> {
        let def = T::filter_def(name).ok_or_else(|| {
            ConsoleError::validation(format!(
                "{} cannot be filtered by {name}",
                T::RESOURCE.title()
            ))
        })?;
        if !def.accepts(value) {
            return Err(ConsoleError::validation(format!(
                "{value} is not a valid {name} filter"
            )));
        }
        Ok(self.query.set_filter(name, value))
    }

    /// Advance filter `name` to its next option.
    pub fn cycle_filter(&mut self, name: &str) -> Result<bool> {
        let def = T::filter_def(name)
            .ok_or_else(|| ConsoleError::validation(format!("unknown filter {name}")))?;
        let current = self.query.filter(name).unwrap_or(def.default_value());
        let next = def.next_option(current);
        Ok(self.query.set_filter(name, next))
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        self.query.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        let has_next = self
            .displayed
            .as_ref()
            .is_some_and(|snapshot| snapshot.has_next_page);
        has_next && self.query.set_page(self.query.page() + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.query.page() > 1 && self.query.set_page(self.query.page() - 1)
    }

    pub fn toggle_sort(&mut self, key: &str) {
        self.query.toggle_sort(key);
    }

    // ---- fetching ----

    /// Issue a fetch for the current query.
    ///
    /// A cached snapshot for the same key is shown right away; otherwise the
    /// previously displayed snapshot stays until the result is applied.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let key = self.query.key::<T>();
        if let Some(snapshot) = self.cache.get(&key) {
            self.displayed = Some(snapshot);
        }
        let ticket = self.cache.issue(key);
        debug!(resource = %T::RESOURCE, seq = ticket.seq(), query = %ticket.key, "fetch issued");
        self.in_flight = Some(ticket.clone());
        ticket
    }

    /// Apply the result of a fetch. Returns whether the display changed.
    ///
    /// Results for superseded tickets are cached (unless something newer is)
    /// but never displayed. A failed fetch raises one toast and leaves the
    /// last good snapshot in place.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<RemoteListResult<T>>) -> bool {
        let is_latest = self
            .in_flight
            .as_ref()
            .is_some_and(|latest| latest.seq() == ticket.seq());

        if !is_latest {
            debug!(seq = ticket.seq(), "discarding superseded fetch");
            if let Ok(page) = result {
                self.cache.store(&ticket, page);
            }
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                debug!(seq = ticket.seq(), rows = page.len(), "fetch applied");
                self.displayed = Some(self.cache.store(&ticket, page));
                self.failure = None;
                true
            }
            Err(err) => {
                warn!(resource = %T::RESOURCE, error = %err, "list fetch failed");
                let message = err.toast_message();
                self.notifier.notify(Toast::error(message.clone()));
                self.failure = Some(message);
                false
            }
        }
    }

    pub async fn refresh(&mut self) -> bool {
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&ticket.key).await;
        self.apply(ticket, result)
    }

    /// Nothing has ever been displayed and a fetch is pending.
    pub fn is_full_page_loading(&self) -> bool {
        self.displayed.is_none() && self.in_flight.is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.displayed.is_some() && self.in_flight.is_some()
    }

    pub fn snapshot(&self) -> Option<&RemoteListResult<T>> {
        self.displayed.as_deref()
    }

    /// Displayed rows after client-side filters and sort.
    pub fn rows(&self) -> Vec<&T> {
        match &self.displayed {
            Some(snapshot) => refine(&snapshot.items, &self.query),
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> TableView {
        let title = T::RESOURCE.title();
        let Some(snapshot) = &self.displayed else {
            let state = match (&self.in_flight, &self.failure) {
                (None, Some(message)) => TableState::Failed {
                    message: message.clone(),
                },
                _ => TableState::Loading,
            };
            return TableView {
                title,
                columns: T::COLUMNS.to_vec(),
                state,
                refreshing: false,
                pagination: None,
            };
        };

        let rows: Vec<RowView> = refine(&snapshot.items, &self.query)
            .into_iter()
            .map(|item| RowView {
                id: item.id().to_string(),
                cells: item.cells(),
                deleting: self.deletes.is_deleting(item.id()),
            })
            .collect();

        let state = if rows.is_empty() {
            TableState::Empty {
                message: empty_message(title),
            }
        } else {
            TableState::Rows(rows)
        };

        TableView {
            title,
            columns: T::COLUMNS.to_vec(),
            state,
            refreshing: self.in_flight.is_some(),
            pagination: Some(PageSummary {
                current_page: snapshot.current_page,
                total_pages: snapshot.total_pages,
                has_next_page: snapshot.has_next_page,
                has_prev_page: snapshot.has_prev_page,
            }),
        }
    }

    // ---- delete ----

    pub fn delete_dialog(&self) -> &DeleteConfirmation {
        &self.deletes
    }

    pub fn open_delete(&mut self, id: &str) -> Result<()> {
        self.deletes.open(id)
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.deletes.cancel()
    }

    pub fn confirm_delete(&mut self) -> Option<DeleteTicket> {
        self.deletes.confirm()
    }

    /// Record the outcome of a delete. On success every cached snapshot is
    /// dropped; the caller is expected to refetch.
    pub fn finish_delete(&mut self, ticket: DeleteTicket, result: Result<()>) -> DeleteOutcome {
        let outcome = self.deletes.finish(ticket, result);
        match &outcome {
            DeleteOutcome::Deleted(id) => {
                debug!(resource = %T::RESOURCE, id = %id, "deleted");
                self.cache.invalidate_all();
                self.notifier.notify(Toast::success("Deleted successfully"));
            }
            DeleteOutcome::Failed(err) => {
                warn!(resource = %T::RESOURCE, error = %err, "delete failed");
                self.notifier.notify(Toast::error(err.toast_message()));
            }
            DeleteOutcome::Stale => {}
        }
        outcome
    }

    /// Confirm the open dialog, run the delete and refetch on success.
    pub async fn delete_confirmed(&mut self) -> Option<DeleteOutcome> {
        let ticket = self.confirm_delete()?;
        let result = self.source.delete(ticket.id()).await;
        let outcome = self.finish_delete(ticket, result);
        if matches!(outcome, DeleteOutcome::Deleted(_)) {
            self.refresh().await;
        }
        Some(outcome)
    }
}
