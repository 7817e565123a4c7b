// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for constructing cache-aside decorators.
//!
//! This module provides the builder pattern infrastructure for wrapping a
//! computation with configurable store, key, expiry, and recompute locking.

use std::time::Duration;

use herdlock::{DistributedLock, NoLock};
use lockaside_store::Store;

use crate::Cached;

/// Default maximum duration a recompute lock may be held.
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_millis(60_000);

/// Builder for a [`Cached`] decorator.
///
/// Created by calling [`Cached::builder`] with the required configuration
/// (store, key, entry TTL). Locking is off until [`lock`](Self::lock) is
/// called; the lock type parameter changes from [`NoLock`] to the supplied
/// client's type at that point.
///
/// # Examples
///
/// ```
/// use lockaside::{Cached, LockClient, MemoryLockBackend, MemoryStore};
/// use std::time::Duration;
///
/// let lock = LockClient::new(MemoryLockBackend::new(), Duration::from_millis(50));
/// let cached = Cached::builder(MemoryStore::new(), "user:42", Duration::from_secs(300))
///     .lock(lock)
///     .lock_ttl(Duration::from_secs(30))
///     .acquire_timeout(Duration::from_secs(5))
///     .wrap(|id: u64| async move { Ok::<_, std::io::Error>(id.to_string()) });
/// ```
#[derive(Debug)]
#[must_use]
pub struct CachedBuilder<S, L = NoLock> {
    store: S,
    key: String,
    ttl: Duration,
    lock: Option<L>,
    lock_ttl: Duration,
    acquire_timeout: Option<Duration>,
}

impl<S: Store> CachedBuilder<S> {
    pub(crate) fn new(store: S, key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
            lock: None,
            lock_ttl: DEFAULT_LOCK_TTL,
            acquire_timeout: None,
        }
    }

    /// Serializes concurrent recomputation through the given distributed
    /// lock.
    ///
    /// On a cache miss the decorator acquires the lock derived from its key
    /// before invoking the computation, so cooperating processes recompute
    /// one at a time. Without this call, concurrent misses may all compute.
    ///
    /// # Examples
    ///
    /// ```
    /// use lockaside::{Cached, LockClient, MemoryLockBackend, MemoryStore};
    /// use std::time::Duration;
    ///
    /// let lock = LockClient::new(MemoryLockBackend::new(), Duration::from_millis(50));
    /// let cached = Cached::builder(MemoryStore::new(), "user:42", Duration::from_secs(300))
    ///     .lock(lock)
    ///     .wrap(|id: u64| async move { Ok::<_, std::io::Error>(id.to_string()) });
    /// ```
    pub fn lock<L: DistributedLock>(self, lock: L) -> CachedBuilder<S, L> {
        CachedBuilder {
            store: self.store,
            key: self.key,
            ttl: self.ttl,
            lock: Some(lock),
            lock_ttl: self.lock_ttl,
            acquire_timeout: self.acquire_timeout,
        }
    }
}

impl<S, L> CachedBuilder<S, L> {
    /// Sets the maximum duration a recompute lock may be held before the
    /// backend treats the claim as expired.
    ///
    /// Expiry unblocks other waiters; it does not interrupt the holder.
    /// Defaults to [`DEFAULT_LOCK_TTL`].
    pub fn lock_ttl(mut self, lock_ttl: Duration) -> Self {
        self.lock_ttl = lock_ttl;
        self
    }

    /// Bounds how long a call may wait to acquire the recompute lock.
    ///
    /// When the bound elapses the call fails with
    /// [`Error::LockTimeout`](crate::Error::LockTimeout) instead of waiting
    /// further. By default there is no bound: a call waits as long as the
    /// lock stays contended.
    pub fn acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = Some(acquire_timeout);
        self
    }
}

impl<S, L> CachedBuilder<S, L>
where
    S: Store,
    L: DistributedLock,
{
    /// Wraps `func`, producing the decorated computation.
    ///
    /// The returned [`Cached`] has the same calling shape as `func`: the
    /// same argument type and the same result type, with caching and
    /// recompute coordination layered transparently around it.
    pub fn wrap<F>(self, func: F) -> Cached<S, L, F> {
        Cached::new(
            self.store,
            self.lock,
            func,
            self.key,
            self.ttl,
            self.lock_ttl,
            self.acquire_timeout,
        )
    }
}
