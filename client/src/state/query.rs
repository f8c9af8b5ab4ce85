//! Keyed query cache.
//!
//! DESIGN
//! ======
//! Each key holds at most one cached value. A fetch on a cached key returns
//! the value without calling the fetcher. Every miss takes a ticket from a
//! monotonically increasing counter; the result is stored only if that ticket
//! is still the latest for the key when the fetch completes. Starting a newer
//! fetch or invalidating the key therefore discards late responses.
//!
//! The cache is `Clone + Send + Sync` so it can live in Leptos context and be
//! shared by every page in the tab.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct Slots<K, V> {
    values: HashMap<K, V>,
    tickets: HashMap<K, u64>,
    next_ticket: u64,
}

pub struct QueryCache<K, V> {
    slots: Arc<Mutex<Slots<K, V>>>,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self { slots: Arc::clone(&self.slots) }
    }
}

impl<K, V> fmt::Debug for QueryCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache").finish_non_exhaustive()
    }
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self { slots: Arc::new(Mutex::new(Slots { values: HashMap::new(), tickets: HashMap::new(), next_ticket: 0 })) }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slots<K, V>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().values.get(key).cloned()
    }

    /// Cached value for `key`, or the result of `fetcher` (stored unless
    /// superseded while in flight).
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's error; nothing is cached on failure.
    pub async fn fetch<F, Fut, E>(&self, key: &K, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let ticket = self.begin(key);
        let value = fetcher().await?;
        self.complete(key, ticket, value.clone());
        Ok(value)
    }

    /// Overwrite the cached value directly.
    pub fn set(&self, key: K, value: V) {
        let mut slots = self.lock();
        slots.tickets.remove(&key);
        slots.values.insert(key, value);
    }

    pub fn invalidate(&self, key: &K) {
        let mut slots = self.lock();
        slots.values.remove(key);
        slots.tickets.remove(key);
    }

    /// Drop every key matching `predicate`, cached or in flight.
    pub fn invalidate_where(&self, predicate: impl Fn(&K) -> bool) {
        let mut slots = self.lock();
        slots.values.retain(|key, _| !predicate(key));
        slots.tickets.retain(|key, _| !predicate(key));
    }

    pub fn clear(&self) {
        let mut slots = self.lock();
        slots.values.clear();
        slots.tickets.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn begin(&self, key: &K) -> u64 {
        let mut slots = self.lock();
        slots.next_ticket += 1;
        let ticket = slots.next_ticket;
        slots.tickets.insert(key.clone(), ticket);
        ticket
    }

    fn complete(&self, key: &K, ticket: u64, value: V) {
        let mut slots = self.lock();
        if slots.tickets.get(key) == Some(&ticket) {
            slots.tickets.remove(key);
            slots.values.insert(key.clone(), value);
        }
    }
}
