//! Search History Store for navsync.
//!
//! Owns the single writable copy of the search history list. The list is loaded lazily
//! from [`KeyValueStorage`] once per store, mutated under a write lock so logically
//! concurrent mutations are applied one after another, persisted, and then broadcast to
//! every subscriber as the full ordered term list.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, warn};

use crate::storage::KeyValueStorage;
use crate::types::history::HistoryEntry;

/// Observer of history changes; receives the full term list, most recent first.
pub type HistoryListener = Rc<dyn Fn(&[String])>;

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, HistoryListener)>,
}

/// Handle returned by [`SearchHistoryStore::subscribe`].
///
/// Dropping it deregisters the listener; `unsubscribe` does the same and is idempotent.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.borrow().listeners.iter().any(|(id, _)| *id == self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

struct StoreInner {
    storage: Rc<dyn KeyValueStorage>,
    key: String,
    capacity: usize,
    cache: RefCell<Vec<HistoryEntry>>,
    loaded: OnceCell<()>,
    write_lock: Mutex<()>,
    registry: Rc<RefCell<ListenerRegistry>>,
}

/// Ordered, deduplicated, capacity-bounded search history with change notifications.
///
/// Clones share the same list and subscriber set.
#[derive(Clone)]
pub struct SearchHistoryStore {
    inner: Rc<StoreInner>,
}

impl SearchHistoryStore {
    /// Creates a store persisting under `key`, holding at most `capacity` terms.
    pub fn new(storage: Rc<dyn KeyValueStorage>, key: &str, capacity: usize) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                storage,
                key: key.to_string(),
                capacity: capacity.max(1),
                cache: RefCell::new(Vec::new()),
                loaded: OnceCell::new(),
                write_lock: Mutex::new(()),
                registry: Rc::new(RefCell::new(ListenerRegistry::default())),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Records `term` as the most recently used search.
    ///
    /// Empty or whitespace-only terms are ignored and do not notify.
    pub async fn add(&self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }

        let _guard = self.inner.write_lock.lock().await;
        self.ensure_loaded().await;

        let snapshot = {
            let mut entries = self.inner.cache.borrow_mut();
            let stamp = next_stamp(&entries);
            entries.retain(|e| e.term != term);
            entries.insert(0, HistoryEntry::new(term, stamp));
            entries.truncate(self.inner.capacity);
            entries.clone()
        };
        debug!(term, len = snapshot.len(), "search history add");

        self.persist(&snapshot).await;
        self.notify(&snapshot);
    }

    /// Deletes `term` if present. An absent term still persists and notifies once.
    pub async fn remove(&self, term: &str) {
        let _guard = self.inner.write_lock.lock().await;
        self.ensure_loaded().await;

        let snapshot = {
            let mut entries = self.inner.cache.borrow_mut();
            entries.retain(|e| e.term != term);
            entries.clone()
        };
        debug!(term, len = snapshot.len(), "search history remove");

        self.persist(&snapshot).await;
        self.notify(&snapshot);
    }

    /// Empties the history.
    pub async fn clear(&self) {
        let _guard = self.inner.write_lock.lock().await;
        self.ensure_loaded().await;

        self.inner.cache.borrow_mut().clear();
        debug!("search history cleared");

        self.persist(&[]).await;
        self.notify(&[]);
    }

    /// Current terms, most recent first.
    pub async fn get_all(&self) -> Vec<String> {
        self.entries()
            .await
            .into_iter()
            .map(|e| e.term)
            .collect()
    }

    /// Current entries with their timestamps, most recent first.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.ensure_loaded().await;
        self.inner.cache.borrow().clone()
    }

    /// Registers `listener` for every subsequent mutation.
    ///
    /// The current list is not replayed; fetch it with [`Self::get_all`] after subscribing.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[String]) + 'static,
    {
        let mut registry = self.inner.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner.registry),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.registry.borrow().listeners.len()
    }

    async fn ensure_loaded(&self) {
        self.inner
            .loaded
            .get_or_init(|| async {
                let entries = self.read_persisted().await;
                *self.inner.cache.borrow_mut() = entries;
            })
            .await;
    }

    async fn read_persisted(&self) -> Vec<HistoryEntry> {
        let raw = match self.inner.storage.get(&self.inner.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "search history unavailable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => sanitize(entries, self.inner.capacity),
            Err(e) => {
                warn!(error = %e, "malformed persisted search history, starting empty");
                Vec::new()
            }
        }
    }

    async fn persist(&self, entries: &[HistoryEntry]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize search history");
                return;
            }
        };
        if let Err(e) = self.inner.storage.set(&self.inner.key, &json).await {
            warn!(error = %e, "search history not persisted");
        }
    }

    fn notify(&self, entries: &[HistoryEntry]) {
        let terms: Vec<String> = entries.iter().map(|e| e.term.clone()).collect();
        // Snapshot the listeners so they can (un)subscribe while being called.
        let listeners: Vec<HistoryListener> = self
            .inner
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&terms);
        }
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// A timestamp strictly newer than the current head, so order stays strict.
fn next_stamp(entries: &[HistoryEntry]) -> i64 {
    let now = now_millis();
    match entries.first() {
        Some(head) if head.last_used_at >= now => head.last_used_at + 1,
        _ => now,
    }
}

/// Restores the list invariants on data read back from storage.
fn sanitize(entries: Vec<HistoryEntry>, capacity: usize) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = entries
        .into_iter()
        .filter_map(|e| {
            let term = e.term.trim();
            (!term.is_empty()).then(|| HistoryEntry::new(term, e.last_used_at))
        })
        .collect();
    entries.sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));

    let mut seen = HashSet::new();
    entries.retain(|e| seen.insert(e.term.clone()));
    entries.truncate(capacity);
    entries
}
