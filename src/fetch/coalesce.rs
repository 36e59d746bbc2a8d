//! Request coalescing
//!
//! Concurrent fetches of the same resource key, made with the same
//! credential, share one in-flight request. The entry is dropped as soon as
//! that request settles or its last waiter goes away, so the next fetch
//! always goes to the network again; nothing is cached.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::{hash_map, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::ApiError;

/// Result shared between every waiter of one request
pub type Fetched<T> = Result<Arc<T>, Arc<ApiError>>;

type InFlight<T> = Shared<BoxFuture<'static, Fetched<T>>>;

/// Requests are shared only between callers holding the same credential
type Slot = (String, String);

struct Entry<T> {
    generation: u64,
    request: InFlight<T>,
    waiters: usize,
}

type Table<T> = Mutex<HashMap<Slot, Entry<T>>>;

/// Deduplicates in-flight requests for one resource type
pub struct Coalescer<T> {
    inflight: Table<T>,
    generation: AtomicU64,
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }
}

/// One waiter's claim on an entry. Settling releases the entry; a waiter
/// that is dropped early only releases it once no other waiter is left.
struct Waiter<'a, T> {
    table: &'a Table<T>,
    slot: Slot,
    generation: u64,
    settled: bool,
}

impl<T> Drop for Waiter<'_, T> {
    fn drop(&mut self) {
        let mut inflight = self.table.lock().unwrap_or_else(|p| p.into_inner());
        let Some(entry) = inflight.get_mut(&self.slot) else {
            return;
        };
        if entry.generation != self.generation {
            return;
        }
        entry.waiters = entry.waiters.saturating_sub(1);
        if self.settled || entry.waiters == 0 {
            inflight.remove(&self.slot);
        }
    }
}

impl<T: Send + Sync + 'static> Coalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `key` on behalf of `credential`, joining a request already in
    /// flight for the same pair.
    ///
    /// `start` is only called when no such request is running.
    pub async fn fetch<F, Fut>(&self, credential: &str, key: &str, start: F) -> Fetched<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let slot = (credential.to_string(), key.to_string());
        let (mut waiter, request) = {
            let mut inflight = self.inflight.lock().unwrap_or_else(|p| p.into_inner());
            let entry = match inflight.entry(slot.clone()) {
                hash_map::Entry::Occupied(occupied) => {
                    tracing::debug!(key, "Joining in-flight request");
                    occupied.into_mut()
                }
                hash_map::Entry::Vacant(vacant) => {
                    let request = start()
                        .map(|result| result.map(Arc::new).map_err(Arc::new))
                        .boxed()
                        .shared();
                    vacant.insert(Entry {
                        generation: self.next_generation(),
                        request,
                        waiters: 0,
                    })
                }
            };
            entry.waiters += 1;
            let waiter = Waiter {
                table: &self.inflight,
                slot,
                generation: entry.generation,
                settled: false,
            };
            (waiter, entry.request.clone())
        };

        let result = request.await;
        waiter.settled = true;
        result
    }

    /// Number of keys with a request in flight
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::Relaxed) + 1
    }
}
