use async_trait::async_trait;
use care_console::actions::DeleteOutcome;
use care_console::api::{ListSource, Pagination, RemoteListResult};
use care_console::config::ConsoleConfig;
use care_console::core::{ConsoleError, GENERIC_FAILURE_MESSAGE, Result};
use care_console::entities::{Caregiver, Gender};
use care_console::list::{ListController, QueryKey, TableState};
use care_console::notify::{ToastLevel, ToastQueue};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

struct FakeCaregivers {
    rows: Mutex<Vec<Caregiver>>,
    calls: Mutex<Vec<QueryKey>>,
    deletes: Mutex<Vec<String>>,
    fail_fetch: Mutex<Option<ConsoleError>>,
    fail_delete: AtomicBool,
}

impl FakeCaregivers {
    fn new(rows: Vec<Caregiver>) -> Self {
        Self {
            rows: Mutex::new(rows),
            calls: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
            fail_fetch: Mutex::new(None),
            fail_delete: AtomicBool::new(false),
        }
    }

    fn calls(&self) -> Vec<QueryKey> {
        self.calls.lock().unwrap().clone()
    }

    fn fail_next_fetch(&self, err: ConsoleError) {
        *self.fail_fetch.lock().unwrap() = Some(err);
    }
}

#[async_trait]
impl ListSource<Caregiver> for FakeCaregivers {
    async fn fetch(&self, key: &QueryKey) -> Result<RemoteListResult<Caregiver>> {
        self.calls.lock().unwrap().push(key.clone());
        if let Some(err) = self.fail_fetch.lock().unwrap().take() {
            return Err(err);
        }

        let search = key.search.to_lowercase();
        let status = key
            .filters
            .iter()
            .find(|(name, _)| name == "status")
            .map(|(_, value)| value.clone());
        let matching: Vec<Caregiver> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| search.is_empty() || c.full_name.to_lowercase().contains(&search))
            .filter(|c| status.as_deref().is_none_or(|s| c.review_status == s))
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let start = ((key.page - 1) * key.limit) as usize;
        let items = matching
            .into_iter()
            .skip(start)
            .take(key.limit as usize)
            .collect();
        Ok(RemoteListResult::from_parts(
            items,
            Some(Pagination::for_total(total, key.page, key.limit)),
        ))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ConsoleError::api(409, "Caregiver has active bookings"));
        }
        self.deletes.lock().unwrap().push(id.to_string());
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

fn caregiver(id: usize, name: &str, gender: Gender, review: &str, allocated: u32) -> Caregiver {
    Caregiver {
        id: format!("cg-{id}"),
        full_name: name.to_string(),
        email: format!("cg{id}@example.com"),
        gender,
        review_status: review.to_string(),
        allocated_bookings: allocated,
    }
}

fn roster() -> Vec<Caregiver> {
    let names = [
        "Jane Doe", "Mark Ellis", "jane Okafor", "Priya Shah", "Tom Becker", "Alex Rivera",
        "Grace Kim", "Omar Haddad", "Lucy Brown", "Daniel Novak", "Hannah Weiss", "Samuel Ade",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let gender = if i % 2 == 0 { Gender::Female } else { Gender::Male };
            let review = if i % 3 == 0 { "pending" } else { "approved" };
            caregiver(i + 1, name, gender, review, (i % 4) as u32)
        })
        .collect()
}

fn controller(
    rows: Vec<Caregiver>,
) -> (ListController<Caregiver, FakeCaregivers>, ToastQueue) {
    let toasts = ToastQueue::new();
    let config = ConsoleConfig::default();
    let controller = ListController::new(FakeCaregivers::new(rows), &config, Arc::new(toasts.clone()));
    (controller, toasts)
}

#[tokio::test(start_paused = true)]
async fn typing_jane_issues_one_debounced_request() {
    let (mut list, _toasts) = controller(roster());
    list.refresh().await;
    assert_eq!(list.view().pagination.map(|p| p.total_pages), Some(2));

    for raw in ["j", "ja", "jan", "jane"] {
        list.type_search(raw);
        sleep(Duration::from_millis(100)).await;
        assert!(!list.poll_search());
    }
    assert_eq!(list.source().calls().len(), 1);

    assert!(list.wait_for_search().await);
    list.refresh().await;

    let calls = list.source().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].search, "jane");
    assert_eq!(calls[1].page, 1);

    let view = list.view();
    assert_eq!(view.rows().len(), 2);
    assert!(!view.show_pagination());
}

#[tokio::test]
async fn filter_change_resets_page_and_page_change_keeps_filters() {
    let (mut list, _toasts) = controller(roster());
    list.refresh().await;
    assert!(list.next_page());
    list.refresh().await;
    assert_eq!(list.query().page(), 2);

    assert!(list.set_filter("status", "approved").unwrap());
    assert_eq!(list.query().page(), 1);
    list.refresh().await;

    let last = list.source().calls().pop().unwrap();
    assert_eq!(last.page, 1);
    assert_eq!(last.filters, vec![("status".to_string(), "approved".to_string())]);

    list.set_page(2);
    assert_eq!(list.query().filter("status"), Some("approved"));
}

#[tokio::test]
async fn invalid_filters_fail_locally() {
    let (mut list, _toasts) = controller(roster());
    assert!(matches!(
        list.set_filter("status", "archived"),
        Err(ConsoleError::Validation(_))
    ));
    assert!(matches!(
        list.set_filter("colour", "red"),
        Err(ConsoleError::Validation(_))
    ));
    assert!(list.source().calls().is_empty());
}

#[tokio::test]
async fn first_fetch_shows_loading_then_keeps_stale_rows() {
    let (mut list, _toasts) = controller(roster());

    let first = list.begin_fetch();
    assert!(list.is_full_page_loading());
    assert_eq!(list.view().state, TableState::Loading);
    let page = list.source().fetch(&first.key).await;
    assert!(list.apply(first, page));

    list.next_page();
    let second = list.begin_fetch();
    assert!(!list.is_full_page_loading());
    assert!(list.is_refreshing());
    let view = list.view();
    assert!(view.refreshing);
    assert_eq!(view.rows().len(), 10);
    assert_eq!(list.snapshot().unwrap().current_page, 1);

    let page = list.source().fetch(&second.key).await;
    assert!(list.apply(second, page));
    assert_eq!(list.snapshot().unwrap().current_page, 2);
    assert_eq!(list.view().rows().len(), 2);
}

#[tokio::test]
async fn superseded_response_is_cached_but_not_displayed() {
    let (mut list, _toasts) = controller(roster());

    let older = list.begin_fetch();
    list.set_page(2);
    let newer = list.begin_fetch();

    let newer_page = list.source().fetch(&newer.key).await;
    let older_page = list.source().fetch(&older.key).await;
    assert!(list.apply(newer, newer_page));
    assert!(!list.apply(older, older_page));
    assert_eq!(list.snapshot().unwrap().current_page, 2);

    // The late page-1 response still seeds the cache.
    list.set_page(1);
    let _revalidate = list.begin_fetch();
    assert_eq!(list.snapshot().unwrap().current_page, 1);
}

#[tokio::test]
async fn late_response_does_not_overwrite_newer_cached_page() {
    let (mut list, _toasts) = controller(roster());

    let older = list.begin_fetch();
    let older_page = list.source().fetch(&older.key).await;
    list.source().delete("cg-1").await.unwrap();
    let newer = list.begin_fetch();
    let newer_page = list.source().fetch(&newer.key).await;

    assert!(list.apply(newer, newer_page));
    assert!(!list.apply(older, older_page));

    list.set_page(2);
    let _away = list.begin_fetch();
    list.set_page(1);
    let _back = list.begin_fetch();
    let cached = list.snapshot().unwrap();
    assert_eq!(cached.current_page, 1);
    assert!(cached.items.iter().all(|c| c.id != "cg-1"));
}

#[tokio::test]
async fn response_issued_before_a_delete_is_not_cached() {
    let (mut list, _toasts) = controller(roster());
    list.refresh().await;

    list.set_page(2);
    let stale = list.begin_fetch();
    let stale_page = list.source().fetch(&stale.key).await;
    assert!(stale_page.as_ref().unwrap().items.iter().any(|c| c.id == "cg-11"));

    list.open_delete("cg-11").unwrap();
    let ticket = list.confirm_delete().unwrap();
    let result = list.source().delete(ticket.id()).await;
    assert_eq!(
        list.finish_delete(ticket, result),
        DeleteOutcome::Deleted("cg-11".to_string())
    );
    list.set_page(1);
    assert!(list.refresh().await);
    assert!(!list.apply(stale, stale_page));

    // Page 2 is not cached, so page 1 stays on screen while it loads.
    list.set_page(2);
    let _fresh = list.begin_fetch();
    assert_eq!(list.snapshot().unwrap().current_page, 1);
}

#[tokio::test]
async fn failed_first_fetch_shows_the_error_instead_of_loading() {
    let (mut list, toasts) = controller(roster());
    list.source()
        .fail_next_fetch(ConsoleError::api(503, "Database unavailable"));

    assert!(!list.refresh().await);
    assert!(!list.is_full_page_loading());
    assert_eq!(
        list.view().state,
        TableState::Failed {
            message: "Database unavailable".to_string()
        }
    );
    assert_eq!(toasts.drain().len(), 1);

    let retry = list.begin_fetch();
    assert_eq!(list.view().state, TableState::Loading);
    let page = list.source().fetch(&retry.key).await;
    assert!(list.apply(retry, page));
    assert_eq!(list.view().rows().len(), 10);
}

#[tokio::test]
async fn failed_fetch_toasts_once_and_keeps_last_good_rows() {
    let (mut list, toasts) = controller(roster());
    list.refresh().await;

    list.source()
        .fail_next_fetch(ConsoleError::api(503, "Database unavailable"));
    list.next_page();
    assert!(!list.refresh().await);

    let raised = toasts.drain();
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].level, ToastLevel::Error);
    assert_eq!(raised[0].message, "Database unavailable");
    assert_eq!(list.snapshot().unwrap().current_page, 1);
    assert_eq!(list.view().rows().len(), 10);

    list.source()
        .fail_next_fetch(ConsoleError::Network("connection reset".to_string()));
    list.refresh().await;
    assert_eq!(toasts.drain()[0].message, GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn client_filters_and_name_sort_apply_to_the_page() {
    let (mut list, _toasts) = controller(vec![
        caregiver(1, "zoe", Gender::Female, "approved", 1),
        caregiver(2, "Adam", Gender::Male, "approved", 0),
        caregiver(3, "beth", Gender::Female, "approved", 0),
        caregiver(4, "Amy", Gender::Female, "approved", 2),
    ]);
    list.set_filter("gender", "female").unwrap();
    list.refresh().await;

    // Client-scope filters never reach the backend.
    assert!(list.source().calls()[0].filters.is_empty());
    let names: Vec<_> = list.rows().iter().map(|c| c.full_name.as_str()).collect();
    assert_eq!(names, vec!["Amy", "beth", "zoe"]);

    list.set_filter("activity", "active").unwrap();
    list.toggle_sort("name");
    let names: Vec<_> = list.rows().iter().map(|c| c.full_name.as_str()).collect();
    assert_eq!(names, vec!["zoe", "Amy"]);
}

#[tokio::test]
async fn delete_spinner_is_scoped_to_its_row() {
    let (mut list, toasts) = controller(roster());
    list.refresh().await;

    list.open_delete("cg-2").unwrap();
    let ticket = list.confirm_delete().unwrap();
    let view = list.view();
    for row in view.rows() {
        assert_eq!(row.deleting, row.id == "cg-2", "row {}", row.id);
    }

    let result = list.source().delete(ticket.id()).await;
    assert_eq!(
        list.finish_delete(ticket, result),
        DeleteOutcome::Deleted("cg-2".to_string())
    );
    assert!(!list.delete_dialog().is_open());
    assert!(list.view().rows().iter().all(|row| !row.deleting));
    assert_eq!(toasts.latest().unwrap().level, ToastLevel::Success);
}

#[tokio::test]
async fn confirmed_delete_refetches_and_failure_keeps_dialog() {
    let (mut list, toasts) = controller(roster());
    list.refresh().await;

    list.open_delete("cg-1").unwrap();
    let outcome = list.delete_confirmed().await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted("cg-1".to_string()));
    assert_eq!(list.source().calls().len(), 2);
    assert!(list.view().rows().iter().all(|row| row.id != "cg-1"));

    list.source().fail_delete.store(true, Ordering::SeqCst);
    list.open_delete("cg-3").unwrap();
    let outcome = list.delete_confirmed().await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert!(list.delete_dialog().is_open());
    assert!(!list.delete_dialog().is_deleting("cg-3"));
    assert_eq!(list.delete_dialog().error(), Some("Caregiver has active bookings"));
    assert_eq!(toasts.latest().unwrap().message, "Caregiver has active bookings");
    // No refetch after a failed delete.
    assert_eq!(list.source().calls().len(), 2);
}
