//! Memoization primitives.
//!
//! Two flavors are used across the workspace:
//!
//! * [`Memo`] -- a once-computed cell for memoizing a single expensive
//!   result per instance (e.g. an org payload fetched over HTTP).
//! * [`ResponseCache`] -- a keyed cache for memoizing repeated lookups
//!   (query strings, URLs) across calls.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use tokio::sync::{OnceCell, RwLock};

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

/// A memoized async computation result.
///
/// The first call to [`Memo::get_or_try_init`] runs the initializer and
/// stores its output; every later call returns the stored value without
/// re-running it. A failed initialization leaves the cell empty so the
/// next call can retry.
#[derive(Debug, Default)]
pub struct Memo<T> {
    cell: OnceCell<T>,
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the stored value if the cell has been initialized.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Return the stored value, running `init` first if the cell is empty.
    pub async fn get_or_try_init<E, F, Fut>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell.get_or_try_init(init).await
    }
}

// ---------------------------------------------------------------------------
// ResponseCache
// ---------------------------------------------------------------------------

/// A keyed in-memory cache behind an async `RwLock`.
///
/// Values are cloned out on read, so `V` is expected to be cheap to
/// clone (or wrapped in an `Arc` by the caller).
#[derive(Debug, Default)]
pub struct ResponseCache<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a cached value by key.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.read().await.get(key).cloned()
    }

    /// Store a value, replacing any previous entry for the key.
    pub async fn insert(&self, key: K, value: V) {
        self.entries.write().await.insert(key, value);
    }

    /// Number of cached entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop all cached entries.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
