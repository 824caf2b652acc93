use super::query::QueryKey;
use crate::api::envelope::RemoteListResult;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Snapshot cache keyed by the server-visible query.
///
/// Entries are shared immutable snapshots; replacing one never mutates a
/// snapshot a view may still hold. Each entry remembers the ticket that
/// produced it, so a slow response can never overwrite a newer one and a
/// response issued before [`QueryCache::invalidate_all`] is never stored.
pub struct QueryCache<T> {
    entries: LruCache<QueryKey, CacheEntry<T>>,
    next_seq: u64,
    invalidated_through: u64,
}

struct CacheEntry<T> {
    seq: u64,
    snapshot: Arc<RemoteListResult<T>>,
}

/// Identifies one issued fetch. Only the most recently issued ticket may
/// update what is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    seq: u64,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn supersedes(&self, other: &FetchTicket) -> bool {
        self.seq > other.seq
    }
}

impl<T> QueryCache<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            next_seq: 0,
            invalidated_through: 0,
        }
    }

    pub fn get(&mut self, key: &QueryKey) -> Option<Arc<RemoteListResult<T>>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry.snapshot))
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains(key)
    }

    /// Whether a result for `ticket` may be stored: it was issued after the
    /// last invalidation and nothing newer is cached for its key.
    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        ticket.seq > self.invalidated_through
            && self
                .entries
                .peek(&ticket.key)
                .is_none_or(|entry| entry.seq < ticket.seq)
    }

    /// Store the result for `ticket` if [`QueryCache::accepts`] allows it.
    /// The snapshot is returned either way.
    pub fn store(
        &mut self,
        ticket: &FetchTicket,
        result: RemoteListResult<T>,
    ) -> Arc<RemoteListResult<T>> {
        let snapshot = Arc::new(result);
        if self.accepts(ticket) {
            self.entries.put(
                ticket.key.clone(),
                CacheEntry {
                    seq: ticket.seq,
                    snapshot: Arc::clone(&snapshot),
                },
            );
        }
        snapshot
    }

    /// Forget every snapshot, e.g. after a delete changed the collection.
    /// Tickets issued before this call can no longer populate the cache.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.invalidated_through = self.next_seq;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocate a ticket for a new fetch of `key`.
    pub fn issue(&mut self, key: QueryKey) -> FetchTicket {
        self.next_seq += 1;
        FetchTicket {
            key,
            seq: self.next_seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::query::SortDirection;

    fn key(page: u32) -> QueryKey {
        QueryKey {
            page,
            limit: 10,
            search: String::new(),
            filters: Vec::new(),
            sort_by: "name".to_string(),
            order: SortDirection::Ascending,
        }
    }

    fn page(items: Vec<u32>) -> RemoteListResult<u32> {
        RemoteListResult::from_parts(items, None)
    }

    #[test]
    fn evicts_least_recently_used_snapshot() {
        let mut cache = QueryCache::<u32>::new(2);
        for n in 1..=2 {
            let ticket = cache.issue(key(n));
            cache.store(&ticket, page(vec![n]));
        }
        assert!(cache.get(&key(1)).is_some());
        let ticket = cache.issue(key(3));
        cache.store(&ticket, page(vec![3]));

        assert!(cache.contains(&key(1)));
        assert!(!cache.contains(&key(2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn tickets_are_strictly_increasing() {
        let mut cache = QueryCache::<u32>::new(4);
        let first = cache.issue(key(1));
        let second = cache.issue(key(1));
        assert!(second.supersedes(&first));
        assert!(!first.supersedes(&second));
    }

    #[test]
    fn older_response_never_replaces_newer_snapshot() {
        let mut cache = QueryCache::<u32>::new(4);
        let older = cache.issue(key(1));
        let newer = cache.issue(key(1));

        cache.store(&newer, page(vec![2]));
        assert!(!cache.accepts(&older));
        let returned = cache.store(&older, page(vec![1]));

        assert_eq!(returned.items, vec![1]);
        assert_eq!(cache.get(&key(1)).unwrap().items, vec![2]);
    }

    #[test]
    fn tickets_issued_before_invalidation_are_not_stored() {
        let mut cache = QueryCache::<u32>::new(4);
        let before = cache.issue(key(2));
        cache.invalidate_all();
        let after = cache.issue(key(1));

        cache.store(&before, page(vec![1]));
        cache.store(&after, page(vec![2]));

        assert!(!cache.contains(&key(2)));
        assert!(cache.contains(&key(1)));
    }

    #[test]
    fn zero_capacity_still_holds_one_entry() {
        let mut cache = QueryCache::<u32>::new(0);
        let ticket = cache.issue(key(1));
        cache.store(&ticket, RemoteListResult::empty());
        assert_eq!(cache.len(), 1);
        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
