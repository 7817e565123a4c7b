// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory store implementation using moka.
//!
//! This module provides an in-memory key-value store backed by the moka
//! crate, which offers high-performance concurrent caching with eviction
//! policies. Expiry is enforced per entry, so every `set` can carry a
//! different TTL.

use std::time::{Duration, Instant};

use lockaside_store::{Error, Store};
use moka::{Expiry, future::Cache};

use crate::builder::MemoryStoreBuilder;

/// A stored value together with the expiry its writer requested.
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    value: String,
    expire_in: Duration,
}

/// Expiry policy that reads each entry's own TTL.
///
/// Overwriting an entry restarts its expiry from the new write.
struct PerEntryExpiry;

impl Expiry<String, Entry> for PerEntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.expire_in)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.expire_in)
    }
}

/// An in-memory key-value store backed by moka.
///
/// This store provides:
/// - Concurrent access with high performance
/// - Exact per-entry expiry, honoring sub-second TTLs
/// - Automatic eviction once an optional capacity is reached
///
/// Stores are cheap to clone; clones share the same entries.
///
/// # Examples
///
/// ```
/// use lockaside_memory::MemoryStore;
/// use lockaside_store::Store;
/// use std::time::Duration;
/// # futures::executor::block_on(async {
///
/// let store = MemoryStore::new();
///
/// store.set("key", "value", Duration::from_secs(60)).await.unwrap();
/// let value = store.get("key").await.unwrap();
/// assert_eq!(value.as_deref(), Some("value"));
/// # });
/// ```
#[derive(Clone)]
pub struct MemoryStore {
    inner: Cache<String, Entry>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entry_count", &self.inner.entry_count())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a new unbounded in-memory store.
    ///
    /// # Examples
    ///
    /// ```
    /// use lockaside_memory::MemoryStore;
    ///
    /// let store = MemoryStore::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new in-memory store with a maximum capacity.
    ///
    /// Once the capacity is reached, entries will be evicted using the
    /// `TinyLFU` policy (combination of LRU eviction and LFU admission).
    ///
    /// # Examples
    ///
    /// ```
    /// use lockaside_memory::MemoryStore;
    ///
    /// let store = MemoryStore::with_capacity(1000);
    /// ```
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::builder().max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an in-memory store.
    ///
    /// # Examples
    ///
    /// ```
    /// use lockaside_memory::MemoryStore;
    ///
    /// let store = MemoryStore::builder()
    ///     .max_capacity(1000)
    ///     .name("session-store")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::new()
    }

    /// Constructs a `MemoryStore` from a builder.
    ///
    /// This is called by `MemoryStoreBuilder::build()` and should not be
    /// called directly by users.
    pub(crate) fn from_builder(builder: &MemoryStoreBuilder) -> Self {
        let mut moka_builder = Cache::builder().expire_after(PerEntryExpiry);

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
        }
    }

    /// Returns the number of live entries.
    ///
    /// The count is approximate until moka's pending housekeeping runs.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.inner.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, expire_in: Duration) -> Result<(), Error> {
        self.inner
            .insert(
                key.to_owned(),
                Entry {
                    value: value.to_owned(),
                    expire_in,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        self.inner.invalidate(key).await;
        Ok(())
    }
}
