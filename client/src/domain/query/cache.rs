//! Generic query cache with stale-while-revalidate reads.
//!
//! One [`QueryCache`] instance serves one resource; slots are addressed by
//! [`QueryKey`]. Reads serve a fresh slot without touching the network,
//! revalidate a stale slot in the background while the previous value stays
//! readable, and fetch inline only when nothing is cached yet. Every fetch
//! carries a per-slot sequence token; a completing fetch that is no longer
//! the latest issued for its slot is discarded, so a slow, stale response can
//! never overwrite a newer one.
//!
//! Slots live until process teardown; mutations mark them stale rather than
//! evicting them.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use pagination::{Page, PageInfo};
use tracing::{debug, warn};

use super::key::{FilterRecord, QueryKey};
use crate::domain::error::Error;

/// How a read should treat an existing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Serve fresh data without fetching; revalidate stale data in the
    /// background; fetch inline on a miss.
    CachedOrFetch,
    /// Always fetch, regardless of slot state (the `refetch` contract).
    Force,
}

/// Point-in-time view of one slot, returned to callers.
#[derive(Debug)]
pub struct Snapshot<T> {
    /// Most recent successful value, if any fetch has succeeded.
    pub value: Option<Arc<T>>,
    /// Whether a fetch for this slot is currently in flight.
    pub is_loading: bool,
    /// Whether the most recent settled fetch failed.
    pub is_error: bool,
    /// Error of the most recent failed fetch, cleared on success.
    pub error: Option<Error>,
    /// When the value was last successfully fetched.
    pub fetched_at: Option<Instant>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            is_loading: self.is_loading,
            is_error: self.is_error,
            error: self.error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

impl<T> Snapshot<T> {
    fn empty() -> Self {
        Self {
            value: None,
            is_loading: false,
            is_error: false,
            error: None,
            fetched_at: None,
        }
    }
}

impl<I> Snapshot<Page<I>> {
    /// Items of the cached page, empty when nothing has been fetched.
    #[must_use]
    pub fn items(&self) -> &[I] {
        self.value.as_deref().map_or(&[], |page| page.items.as_slice())
    }

    /// Pagination metadata, zero-valued when nothing has been fetched.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        self.value.as_deref().map_or_else(PageInfo::default, |page| page.page_info)
    }
}

struct Slot<T> {
    value: Option<Arc<T>>,
    fresh: bool,
    issued_seq: u64,
    in_flight: u32,
    error: Option<Error>,
    fetched_at: Option<Instant>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            fresh: false,
            issued_seq: 0,
            in_flight: 0,
            error: None,
            fetched_at: None,
        }
    }
}

impl<T> Slot<T> {
    fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.in_flight += 1;
        self.issued_seq
    }

    fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            value: self.value.clone(),
            is_loading: self.in_flight > 0,
            is_error: self.error.is_some(),
            error: self.error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

enum Plan {
    Serve,
    Inline(u64),
    Background(u64),
}

/// Per-resource query cache.
pub struct QueryCache<T> {
    resource: &'static str,
    slots: Mutex<HashMap<QueryKey, Slot<T>>>,
}

impl<T> QueryCache<T> {
    /// Empty cache for the named resource.
    #[must_use]
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Resource tag this cache serves.
    #[must_use]
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Derive the slot key for a filter record.
    #[must_use]
    pub fn key(&self, filters: &FilterRecord) -> QueryKey {
        QueryKey::for_resource(self.resource, filters)
    }

    /// Current view of a slot without fetching.
    #[must_use]
    pub fn peek(&self, key: &QueryKey) -> Snapshot<T> {
        self.lock_slots()
            .get(key)
            .map_or_else(Snapshot::empty, Slot::snapshot)
    }

    /// Mark every slot stale so the next read of each key refetches.
    ///
    /// Called after successful mutations; cached values remain readable until
    /// their replacement arrives.
    pub fn invalidate_all(&self) {
        let mut slots = self.lock_slots();
        for slot in slots.values_mut() {
            slot.fresh = false;
        }
        debug!(resource = self.resource, "cache invalidated");
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<QueryKey, Slot<T>>> {
        // The lock is held only across map operations, never across awaits.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    /// Read a slot, fetching according to `mode`.
    ///
    /// `fetch` is invoked at most once per call. On a stale hit the previous
    /// value is returned immediately and the fetch settles in the background;
    /// the caller is never blocked on revalidation.
    pub async fn read<F, Fut>(self: &Arc<Self>, key: QueryKey, mode: ReadMode, fetch: F) -> Snapshot<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        let plan = {
            let mut slots = self.lock_slots();
            let slot = slots.entry(key.clone()).or_default();
            match mode {
                ReadMode::CachedOrFetch if slot.fresh && slot.value.is_some() => Plan::Serve,
                ReadMode::CachedOrFetch if slot.value.is_some() => {
                    Plan::Background(slot.begin_fetch())
                }
                _ => Plan::Inline(slot.begin_fetch()),
            }
        };

        match plan {
            Plan::Serve => {
                debug!(resource = self.resource, key = %key, "served from cache");
                self.peek(&key)
            }
            Plan::Background(seq) => {
                debug!(resource = self.resource, key = %key, seq, "revalidating in background");
                let stale = self.peek(&key);
                let cache = Arc::clone(self);
                let future = fetch();
                tokio::spawn(async move {
                    let outcome = future.await;
                    cache.settle(&key, seq, outcome);
                });
                stale
            }
            Plan::Inline(seq) => {
                debug!(resource = self.resource, key = %key, seq, "fetching");
                let outcome = fetch().await;
                self.settle(&key, seq, outcome);
                self.peek(&key)
            }
        }
    }

    fn settle(&self, key: &QueryKey, seq: u64, outcome: Result<T, Error>) {
        let mut slots = self.lock_slots();
        let Some(slot) = slots.get_mut(key) else {
            return;
        };
        slot.in_flight = slot.in_flight.saturating_sub(1);
        if seq != slot.issued_seq {
            debug!(
                resource = self.resource,
                key = %key,
                seq,
                latest = slot.issued_seq,
                "discarding out-of-sequence response"
            );
            return;
        }
        match outcome {
            Ok(value) => {
                slot.value = Some(Arc::new(value));
                slot.fresh = true;
                slot.error = None;
                slot.fetched_at = Some(Instant::now());
            }
            Err(error) => {
                // The previous successful value stays readable.
                warn!(resource = self.resource, key = %key, %error, "fetch failed");
                slot.error = Some(error);
            }
        }
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
