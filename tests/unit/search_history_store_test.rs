//! Unit tests for SearchHistoryStore: ordering, bounds, persistence and notifications.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use navsync::managers::search_history_store::SearchHistoryStore;
use navsync::storage::{KeyValueStorage, MemoryStorage, UnavailableStorage};
use navsync::types::errors::StorageError;
use navsync::types::history::HistoryEntry;

const KEY: &str = "searchHistory";

fn store_with(storage: Rc<dyn KeyValueStorage>, capacity: usize) -> SearchHistoryStore {
    SearchHistoryStore::new(storage, KEY, capacity)
}

fn fresh(capacity: usize) -> SearchHistoryStore {
    store_with(Rc::new(MemoryStorage::new()), capacity)
}

/// Memory storage that suspends before every read and write.
struct YieldingStorage {
    inner: MemoryStorage,
}

#[async_trait(?Send)]
impl KeyValueStorage for YieldingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::task::yield_now().await;
        let result = self.inner.set(key, value).await;
        tokio::task::yield_now().await;
        result
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        tokio::task::yield_now().await;
        self.inner.remove(key).await
    }
}

/// Collects every notification a subscriber receives.
fn recorder() -> (Rc<RefCell<Vec<Vec<String>>>>, impl Fn(&[String]) + 'static) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    (calls, move |terms: &[String]| sink.borrow_mut().push(terms.to_vec()))
}

#[tokio::test]
async fn test_re_adding_moves_to_front() {
    let store = fresh(20);
    store.add("Inception").await;
    store.add("Matrix").await;
    store.add("Inception").await;

    assert_eq!(store.get_all().await, vec!["Inception", "Matrix"]);
}

#[tokio::test]
async fn test_capacity_evicts_oldest() {
    let store = fresh(2);
    store.add("A").await;
    store.add("B").await;
    store.add("C").await;

    assert_eq!(store.get_all().await, vec!["C", "B"]);
}

#[tokio::test]
async fn test_add_trims_and_ignores_blank() {
    let store = fresh(20);
    let (calls, listener) = recorder();
    let _sub = store.subscribe(listener);

    store.add("   ").await;
    store.add("").await;
    store.add("  Dune  ").await;

    assert_eq!(store.get_all().await, vec!["Dune"]);
    assert_eq!(calls.borrow().len(), 1, "blank terms must not notify");
}

#[tokio::test]
async fn test_terms_are_case_sensitive() {
    let store = fresh(20);
    store.add("dune").await;
    store.add("Dune").await;
    assert_eq!(store.get_all().await, vec!["Dune", "dune"]);
}

#[tokio::test]
async fn test_timestamps_strictly_descending() {
    let store = fresh(20);
    for term in ["a", "b", "c", "a", "d"] {
        store.add(term).await;
    }
    let entries = store.entries().await;
    for pair in entries.windows(2) {
        assert!(pair[0].last_used_at > pair[1].last_used_at);
    }
}

#[tokio::test]
async fn test_remove_and_absent_remove() {
    let store = fresh(20);
    let (calls, listener) = recorder();
    let _sub = store.subscribe(listener);

    store.add("A").await;
    store.add("B").await;
    store.remove("A").await;
    assert_eq!(store.get_all().await, vec!["B"]);

    store.remove("missing").await;
    assert_eq!(store.get_all().await, vec!["B"]);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 4, "an absent remove still notifies once");
    assert_eq!(calls[3], vec!["B".to_string()]);
}

#[tokio::test]
async fn test_clear_empties() {
    let store = fresh(20);
    store.add("A").await;
    store.add("B").await;
    store.clear().await;
    assert!(store.get_all().await.is_empty());
}

#[tokio::test]
async fn test_every_subscriber_sees_every_mutation_in_order() {
    let store = fresh(20);
    let (desktop, l1) = recorder();
    let (mobile, l2) = recorder();
    let _s1 = store.subscribe(l1);
    let _s2 = store.subscribe(l2);

    store.add("A").await;
    store.add("B").await;
    store.remove("A").await;

    let expected = vec![
        vec!["A".to_string()],
        vec!["B".to_string(), "A".to_string()],
        vec!["B".to_string()],
    ];
    assert_eq!(*desktop.borrow(), expected);
    assert_eq!(*mobile.borrow(), expected);
}

#[tokio::test]
async fn test_unsubscribe_is_idempotent_and_stops_delivery() {
    let store = fresh(20);
    let (calls, listener) = recorder();
    let sub = store.subscribe(listener);

    store.add("A").await;
    sub.unsubscribe();
    sub.unsubscribe();
    assert!(!sub.is_active());
    store.add("B").await;

    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[tokio::test]
async fn test_dropping_subscription_deregisters() {
    let store = fresh(20);
    {
        let (_calls, listener) = recorder();
        let _sub = store.subscribe(listener);
        assert_eq!(store.subscriber_count(), 1);
    }
    assert_eq!(store.subscriber_count(), 0);
}

#[tokio::test]
async fn test_listener_may_unsubscribe_itself() {
    let store = fresh(20);
    let slot: Rc<RefCell<Option<navsync::managers::search_history_store::Subscription>>> =
        Rc::new(RefCell::new(None));
    let count = Rc::new(RefCell::new(0));

    let slot_in = slot.clone();
    let count_in = count.clone();
    let sub = store.subscribe(move |_| {
        *count_in.borrow_mut() += 1;
        if let Some(sub) = slot_in.borrow().as_ref() {
            sub.unsubscribe();
        }
    });
    *slot.borrow_mut() = Some(sub);

    store.add("A").await;
    store.add("B").await;
    assert_eq!(*count.borrow(), 1);
}

#[tokio::test]
async fn test_concurrent_adds_are_all_reflected() {
    let store = fresh(20);
    let (calls, listener) = recorder();
    let _sub = store.subscribe(listener);

    tokio::join!(store.add("A"), store.add("B"), store.add("C"));

    let all = store.get_all().await;
    assert_eq!(all.len(), 3);
    for term in ["A", "B", "C"] {
        assert!(all.contains(&term.to_string()));
    }

    let calls = calls.borrow();
    assert_eq!(calls.len(), 3, "one notification per mutation");
    let lengths: Vec<usize> = calls.iter().map(Vec::len).collect();
    assert_eq!(lengths, vec![1, 2, 3]);
    assert_eq!(calls[2], all);
}

#[tokio::test]
async fn test_persists_across_store_instances() {
    let storage: Rc<dyn KeyValueStorage> = Rc::new(MemoryStorage::new());
    {
        let store = store_with(storage.clone(), 20);
        store.add("Inception").await;
        store.add("Matrix").await;
    }
    let reloaded = store_with(storage, 20);
    assert_eq!(reloaded.get_all().await, vec!["Matrix", "Inception"]);
}

#[tokio::test]
async fn test_persisted_format_is_entry_array() {
    let storage = Rc::new(MemoryStorage::new());
    let store = store_with(storage.clone(), 20);
    store.add("Dune").await;

    let raw = storage.get(KEY).await.unwrap().unwrap();
    let entries: Vec<HistoryEntry> = serde_json::from_str(&raw).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].term, "Dune");
}

#[tokio::test]
async fn test_malformed_persisted_history_starts_empty() {
    let storage = Rc::new(MemoryStorage::new().with_value(KEY, "{not json"));
    let store = store_with(storage, 20);
    assert!(store.get_all().await.is_empty());

    store.add("A").await;
    assert_eq!(store.get_all().await, vec!["A"]);
}

#[tokio::test]
async fn test_unavailable_storage_keeps_session_consistent() {
    let store = store_with(Rc::new(UnavailableStorage::new("disabled")), 20);
    let (calls, listener) = recorder();
    let _sub = store.subscribe(listener);

    store.add("A").await;
    store.add("B").await;

    assert_eq!(store.get_all().await, vec!["B", "A"]);
    assert_eq!(calls.borrow().len(), 2);
}

#[tokio::test]
async fn test_interleaved_mutations_over_suspending_storage() {
    let storage = Rc::new(YieldingStorage {
        inner: MemoryStorage::new(),
    });
    let store = store_with(storage.clone(), 20);
    let (calls, listener) = recorder();
    let _sub = store.subscribe(listener);

    tokio::join!(
        store.add("A"),
        store.add("B"),
        store.add("C"),
        store.remove("A"),
    );

    assert_eq!(store.get_all().await, vec!["C", "B"]);
    let calls = calls.borrow();
    assert_eq!(calls.len(), 4, "one notification per mutation");
    assert_eq!(calls[3], vec!["C", "B"]);

    let reloaded = store_with(storage, 20);
    assert_eq!(reloaded.get_all().await, vec!["C", "B"]);
}
