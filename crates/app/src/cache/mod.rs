//! Reference-Data Cache
//!
//! A TTL cache that front-ends catalog lookups. Concurrent reads of a missing key share a
//! single fetch. A successful fetch populates the cache only after it fully resolves. A
//! failed fetch leaves the key absent so the next read retries.
//!
//! Each fetch carries a ticket. [`ReferenceCache::invalidate`] and [`ReferenceCache::clear`]
//! drop the in-flight marker, so a fetch that was already running when the data went stale
//! still answers its waiters but never writes into the cache.

mod entry;
mod errors;
mod signal;

use std::{
    fmt::{self, Debug},
    future::Future,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use futures::future::{BoxFuture, FutureExt, Shared};
use rustc_hash::FxHashMap;
use tokio::time::Instant;
use tracing::{debug, warn};

pub use entry::CacheEntry;
pub use errors::CacheError;
pub use signal::{CancellationSignal, Canceller};

/// How long a fetched value stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// How long a settled fetch keeps accepting joiners.
pub const DEFAULT_COALESCE_GRACE: Duration = Duration::from_millis(100);

/// What to do with an expired entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Treat it as absent and fetch again.
    #[default]
    Reject,

    /// Return the last known value immediately and refresh it in the background.
    ServeStaleWhileRevalidate,
}

/// Cache tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime of a fetched value.
    pub ttl: Duration,

    /// How long after settling a fetch stays joinable. Never longer than its value is fresh.
    pub coalesce_grace: Duration,

    /// Handling of expired entries.
    pub stale: StalePolicy,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            coalesce_grace: DEFAULT_COALESCE_GRACE,
            stale: StalePolicy::Reject,
        }
    }
}

type FetchResult<V, E> = Result<V, Arc<E>>;
type SharedFetch<V, E> = Shared<BoxFuture<'static, FetchResult<V, E>>>;

struct InFlight<V, E> {
    ticket: u64,
    fetch: SharedFetch<V, E>,
    waiters: usize,
    settled_at: Option<Instant>,
}

struct State<K, V, E> {
    entries: FxHashMap<K, CacheEntry<V>>,
    in_flight: FxHashMap<K, InFlight<V, E>>,
    next_ticket: u64,
}

impl<K, V, E> Default for State<K, V, E> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            in_flight: FxHashMap::default(),
            next_ticket: 0,
        }
    }
}

impl<K: Eq + Hash + Clone + Debug, V: Clone, E: std::error::Error> State<K, V, E> {
    /// Record the outcome of fetch `ticket`, unless it has been superseded.
    fn settle(&mut self, key: &K, ticket: u64, result: &FetchResult<V, E>, ttl: Duration) {
        let Some(flight) = self.in_flight.get_mut(key) else {
            debug!(?key, "fetch settled after invalidation; not cached");
            return;
        };

        if flight.ticket != ticket {
            debug!(?key, "fetch superseded; not cached");
            return;
        }

        match result {
            Ok(value) => {
                let now = Instant::now();

                flight.settled_at = Some(now);
                self.entries
                    .insert(key.clone(), CacheEntry::new(value.clone(), now, ttl));

                debug!(?key, "reference data cached");
            }
            Err(error) => {
                let _removed = self.in_flight.remove(key);

                warn!(?key, %error, "reference data fetch failed");
            }
        }
    }

    /// Drop settled markers whose grace period has passed or whose entry is no longer fresh.
    ///
    /// A settled marker only repeats the cached value, so it must not outlive that value.
    fn purge_settled(&mut self, now: Instant, grace: Duration) {
        let entries = &self.entries;

        self.in_flight.retain(|key, flight| match flight.settled_at {
            None => true,
            Some(settled_at) => {
                now.saturating_duration_since(settled_at) <= grace
                    && entries.get(key).is_some_and(|entry| entry.is_valid(now))
            }
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tracks one caller waiting on a shared fetch.
///
/// When the last waiter of an unsettled fetch goes away, the in-flight marker is removed and
/// the underlying request is dropped with it.
struct Waiter<K: Eq + Hash, V, E> {
    state: Weak<Mutex<State<K, V, E>>>,
    key: K,
    ticket: u64,
}

impl<K: Eq + Hash, V, E> Drop for Waiter<K, V, E> {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };

        let abandoned = {
            let mut state = lock(&state);

            let abandoned = match state.in_flight.get_mut(&self.key) {
                Some(flight) if flight.ticket == self.ticket => {
                    flight.waiters = flight.waiters.saturating_sub(1);
                    flight.waiters == 0 && flight.settled_at.is_none()
                }
                Some(_) | None => false,
            };

            if abandoned {
                state.in_flight.remove(&self.key)
            } else {
                None
            }
        };

        if abandoned.is_some() {
            debug!("all waiters left; in-flight reference fetch dropped");
        }
    }
}

enum Lookup<K: Eq + Hash, V, E> {
    Ready(V),
    Wait(SharedFetch<V, E>, Waiter<K, V, E>),
}

/// Request-coalescing TTL cache, keyed by query identity.
///
/// Cloning yields another handle onto the same cache.
pub struct ReferenceCache<K, V, E> {
    state: Arc<Mutex<State<K, V, E>>>,
    policy: CachePolicy,
}

impl<K, V, E> Clone for ReferenceCache<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            policy: self.policy,
        }
    }
}

impl<K, V, E> Debug for ReferenceCache<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);

        f.debug_struct("ReferenceCache")
            .field("policy", &self.policy)
            .field("entries", &state.entries.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

impl<K, V, E> ReferenceCache<K, V, E>
where
    K: Eq + Hash + Clone + Debug + Send + 'static,
    V: Clone + Send + Sync + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    /// An empty cache.
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            policy,
        }
    }

    /// The policy this cache was built with.
    pub const fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Read `key`, fetching it with `fetcher` when absent.
    ///
    /// `fetcher` is only invoked when no fresh entry and no in-flight request exist for
    /// `key`. If `signal` fires first, this caller gets [`CacheError::Cancelled`] while other
    /// callers sharing the fetch are unaffected.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Fetch`]: the shared fetch failed.
    /// - [`CacheError::Cancelled`]: `signal` fired before the data arrived.
    pub async fn get<F, Fut>(
        &self,
        key: K,
        fetcher: F,
        signal: Option<&CancellationSignal>,
    ) -> Result<V, CacheError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let (fetch, waiter) = match self.lookup(key, fetcher) {
            Lookup::Ready(value) => return Ok(value),
            Lookup::Wait(fetch, waiter) => (fetch, waiter),
        };

        let result = match signal {
            Some(signal) => tokio::select! {
                biased;

                () = signal.cancelled() => Err(CacheError::Cancelled),
                result = fetch => result.map_err(CacheError::Fetch),
            },
            None => fetch.await.map_err(CacheError::Fetch),
        };

        drop(waiter);

        result
    }

    /// A fresh cached value, without fetching.
    pub fn peek(&self, key: &K) -> Option<V> {
        let state = lock(&self.state);

        state
            .entries
            .get(key)
            .filter(|entry| entry.is_valid(Instant::now()))
            .map(|entry| entry.data.clone())
    }

    /// Drop the entry for `key` and any fetch for it that is still running.
    pub fn invalidate(&self, key: &K) {
        let removed = {
            let mut state = lock(&self.state);

            (state.entries.remove(key), state.in_flight.remove(key))
        };

        debug!(?key, had_entry = removed.0.is_some(), "reference data invalidated");
    }

    /// Drop every entry and every in-flight marker.
    pub fn clear(&self) {
        let removed = {
            let mut state = lock(&self.state);

            (
                std::mem::take(&mut state.entries),
                std::mem::take(&mut state.in_flight),
            )
        };

        debug!(entries = removed.0.len(), "reference cache cleared");
    }

    /// Number of entries held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    /// Whether no entries are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup<F, Fut>(&self, key: K, fetcher: F) -> Lookup<K, V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let mut state = lock(&self.state);
        let now = Instant::now();

        let cached = state
            .entries
            .get(&key)
            .map(|entry| (entry.is_valid(now), entry.data.clone()));

        state.purge_settled(now, self.policy.coalesce_grace);

        match cached {
            Some((true, value)) => {
                debug!(?key, "reference cache hit");

                return Lookup::Ready(value);
            }
            Some((false, stale)) if self.policy.stale == StalePolicy::ServeStaleWhileRevalidate => {
                if !state.in_flight.contains_key(&key) {
                    debug!(?key, "serving stale reference data while revalidating");

                    let (fetch, waiter) = self.start_fetch(&mut state, key, fetcher);
                    tokio::spawn(revalidate(fetch, waiter));
                }

                return Lookup::Ready(stale);
            }
            Some((false, _)) => {
                let _expired = state.entries.remove(&key);
            }
            None => {}
        }

        if let Some(flight) = state.in_flight.get_mut(&key) {
            debug!(?key, "joining in-flight reference fetch");

            flight.waiters += 1;

            let waiter = Waiter {
                state: Arc::downgrade(&self.state),
                ticket: flight.ticket,
                key,
            };

            return Lookup::Wait(flight.fetch.clone(), waiter);
        }

        debug!(?key, "reference cache miss");

        let (fetch, waiter) = self.start_fetch(&mut state, key, fetcher);

        Lookup::Wait(fetch, waiter)
    }

    fn start_fetch<F, Fut>(
        &self,
        state: &mut State<K, V, E>,
        key: K,
        fetcher: F,
    ) -> (SharedFetch<V, E>, Waiter<K, V, E>)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>> + Send + 'static,
    {
        let ticket = state.next_ticket;
        state.next_ticket = state.next_ticket.wrapping_add(1);

        let request = fetcher();
        let weak = Arc::downgrade(&self.state);
        let settle_key = key.clone();
        let ttl = self.policy.ttl;

        let fetch = async move {
            let result = request.await.map_err(Arc::new);

            if let Some(state) = weak.upgrade() {
                lock(&state).settle(&settle_key, ticket, &result, ttl);
            }

            result
        }
        .boxed()
        .shared();

        state.in_flight.insert(
            key.clone(),
            InFlight {
                ticket,
                fetch: fetch.clone(),
                waiters: 1,
                settled_at: None,
            },
        );

        let waiter = Waiter {
            state: Arc::downgrade(&self.state),
            key,
            ticket,
        };

        (fetch, waiter)
    }
}

async fn revalidate<K, V, E>(fetch: SharedFetch<V, E>, waiter: Waiter<K, V, E>)
where
    K: Eq + Hash,
    V: Clone,
{
    // Failures are already logged when the fetch settles.
    let _result = fetch.await;

    drop(waiter);
}
