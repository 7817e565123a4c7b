// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The cache-aside decorator.
//!
//! [`Cached`] wraps an async computation behind a key-value store entry and,
//! optionally, a distributed recompute lock. The call protocol is fixed:
//! look up, then on a miss lock, compute, and write. The write always happens
//! before the release and the release always before completion.

use std::time::Duration;

use herdlock::{DistributedLock, Lease};
use lockaside_store::Store;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace, warn};

use crate::{Error, builder::CachedBuilder, codec};

/// Suffix appended to a cache key to form its recompute-lock name.
///
/// Every process that recomputes a given key derives the same lock name, so
/// the exclusivity domain follows the key automatically.
pub const LOCK_SUFFIX: &str = ".lock";

/// An async computation decorated with cache-aside behavior.
///
/// A `Cached` instance binds one computation to one cache key: the key is
/// fixed at construction and every call reads and writes that single entry.
/// Calls complete exactly once with either the cached value, the freshly
/// computed value, or an [`Error`] describing which step failed.
///
/// When a lock is configured, a call that misses the cache first acquires
/// the distributed lock derived from the key ([`LOCK_SUFFIX`]), so across
/// cooperating processes at most one caller recomputes the entry at a time.
/// A call that finds a cached value never touches the lock.
///
/// Instances are created through [`Cached::builder`].
///
/// # Examples
///
/// ```
/// use lockaside::{Cached, MemoryStore};
/// use std::time::Duration;
/// # futures::executor::block_on(async {
///
/// let store = MemoryStore::new();
/// let cached = Cached::builder(store, "answer", Duration::from_secs(60))
///     .wrap(|x: u32| async move { Ok::<_, std::io::Error>(x * 2) });
///
/// assert_eq!(cached.call(21).await?, 42);
/// # Ok::<(), lockaside::Error>(())
/// # });
/// ```
pub struct Cached<S, L, F> {
    store: S,
    lock: Option<L>,
    func: F,
    key: String,
    lock_key: String,
    ttl: Duration,
    lock_ttl: Duration,
    acquire_timeout: Option<Duration>,
}

impl<S, L, F> std::fmt::Debug for Cached<S, L, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cached")
            .field("key", &self.key)
            .field("lock_key", &self.lock_key)
            .field("ttl", &self.ttl)
            .field("lock_ttl", &self.lock_ttl)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("locking", &self.lock.is_some())
            .finish_non_exhaustive()
    }
}

impl Cached<(), (), ()> {
    /// Creates a new builder for a decorator over `store`, caching under
    /// `key` with entries expiring after `ttl`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lockaside::{Cached, MemoryStore};
    /// use std::time::Duration;
    ///
    /// let cached = Cached::builder(MemoryStore::new(), "user:42", Duration::from_secs(300))
    ///     .wrap(|id: u64| async move { Ok::<_, std::io::Error>(id.to_string()) });
    /// ```
    #[must_use]
    pub fn builder<S: Store>(store: S, key: impl Into<String>, ttl: Duration) -> CachedBuilder<S> {
        CachedBuilder::new(store, key, ttl)
    }
}

impl<S, L, F> Cached<S, L, F> {
    pub(crate) fn new(
        store: S,
        lock: Option<L>,
        func: F,
        key: String,
        ttl: Duration,
        lock_ttl: Duration,
        acquire_timeout: Option<Duration>,
    ) -> Self {
        let lock_key = format!("{key}{LOCK_SUFFIX}");
        Self {
            store,
            lock,
            func,
            key,
            lock_key,
            ttl,
            lock_ttl,
            acquire_timeout,
        }
    }

    /// Returns the cache key this decorator reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the lock name derived from the cache key.
    #[must_use]
    pub fn lock_key(&self) -> &str {
        &self.lock_key
    }

    /// Returns the expiry applied to written entries.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the maximum duration a recompute lock may be held.
    #[must_use]
    pub fn lock_ttl(&self) -> Duration {
        self.lock_ttl
    }

    /// Returns true when concurrent recomputation is serialized through a
    /// distributed lock.
    #[must_use]
    pub fn locking_enabled(&self) -> bool {
        self.lock.is_some()
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S, L, F> Cached<S, L, F>
where
    S: Store,
    L: DistributedLock,
{
    /// Runs the decorated computation.
    ///
    /// The call first consults the store. A cached value is decoded and
    /// returned without invoking the computation or the lock. On a miss with
    /// locking enabled, the recompute lock is acquired before the
    /// computation runs; on success the result is written back with the
    /// configured TTL, and the lock (when held) is released after the write
    /// and before this call returns.
    ///
    /// Waiting for the lock is unbounded unless an acquisition timeout was
    /// configured on the builder.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup, the lock acquisition, the
    /// computation itself, or the write-back fails. A value that was
    /// computed but could not be cached is discarded, so retrying the call
    /// is always safe from the cache's point of view. A failed lock
    /// *release* is not an error; the claim then expires on its own
    /// lifetime.
    pub async fn call<A, Fut, V, E>(&self, args: A) -> Result<V, Error>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        V: Serialize + DeserializeOwned,
        E: std::error::Error + Send + Sync + 'static,
    {
        let cached = self.store.get(&self.key).await.map_err(|source| Error::StoreRead {
            key: self.key.clone(),
            source,
        })?;

        if let Some(raw) = cached {
            debug!(key = %self.key, "cache hit");
            return codec::decode(&raw).map_err(|source| Error::Decode {
                key: self.key.clone(),
                source,
            });
        }
        debug!(key = %self.key, locking = self.lock.is_some(), "cache miss");

        let guard = match &self.lock {
            Some(lock) => Some(self.acquire_guard(lock).await?),
            None => None,
        };

        let outcome = self.compute_and_store(args).await;

        if let Some(guard) = guard {
            if let Err(error) = guard.release().await {
                // The primary outcome wins; an unreleased claim only delays
                // other waiters until the lock's lifetime elapses.
                warn!(lock = %self.lock_key, %error, "failed to release recompute lock");
            }
        }

        outcome
    }

    /// Deletes this decorator's cache entry.
    ///
    /// Lock state is untouched: a recomputation already in flight may write
    /// the entry again once it completes.
    ///
    /// # Errors
    ///
    /// Forwards the store's error when the delete fails.
    pub async fn invalidate(&self) -> Result<(), Error> {
        invalidate(&self.store, &self.key).await
    }

    async fn acquire_guard(&self, lock: &L) -> Result<L::Guard, Error> {
        let acquire = lock.acquire(&self.lock_key, self.lock_ttl);
        match self.acquire_timeout {
            None => acquire.await.map_err(|source| Error::Lock {
                name: self.lock_key.clone(),
                source,
            }),
            Some(limit) => match tokio::time::timeout(limit, acquire).await {
                Ok(acquired) => acquired.map_err(|source| Error::Lock {
                    name: self.lock_key.clone(),
                    source,
                }),
                Err(_) => Err(Error::LockTimeout {
                    name: self.lock_key.clone(),
                    waited: limit,
                }),
            },
        }
    }

    async fn compute_and_store<A, Fut, V, E>(&self, args: A) -> Result<V, Error>
    where
        F: Fn(A) -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
        V: Serialize + DeserializeOwned,
        E: std::error::Error + Send + Sync + 'static,
    {
        let value = (self.func)(args).await.map_err(Error::computation)?;
        let raw = codec::encode(&value).map_err(|source| Error::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.store.set(&self.key, &raw, self.ttl).await.map_err(|source| Error::StoreWrite {
            key: self.key.clone(),
            source,
        })?;
        trace!(key = %self.key, ttl = ?self.ttl, "cached fresh value");
        Ok(value)
    }
}

/// Deletes the cache entry stored under `key`.
///
/// Invalidation is independent of any in-flight recomputation: it never
/// touches lock state, and a recomputation already past its lookup may
/// overwrite the invalidated entry when it completes. Deleting an absent
/// key completes without error.
///
/// # Errors
///
/// Forwards the store's error when the delete fails.
///
/// # Examples
///
/// ```
/// use lockaside::{MemoryStore, Store};
/// use std::time::Duration;
/// # futures::executor::block_on(async {
///
/// let store = MemoryStore::new();
/// store.set("user:42", "\"cached\"", Duration::from_secs(60)).await.unwrap();
///
/// lockaside::invalidate(&store, "user:42").await?;
/// assert_eq!(store.get("user:42").await.unwrap(), None);
/// # Ok::<(), lockaside::Error>(())
/// # });
/// ```
pub async fn invalidate<S: Store>(store: &S, key: &str) -> Result<(), Error> {
    store.delete(key).await.map_err(|source| Error::StoreDelete {
        key: key.to_owned(),
        source,
    })
}
