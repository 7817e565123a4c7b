// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory lock backend.
//!
//! A mutex-guarded claim table with the same claim-if-absent-or-expired
//! semantics a remote store would provide via set-if-absent-and-expire.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use herdlock::{Error, LockBackend};
use parking_lot::Mutex;

/// A single claim in the table. A `None` deadline never expires.
#[derive(Debug)]
struct Claim {
    token: String,
    expires_at: Option<Instant>,
}

impl Claim {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

/// An in-memory [`LockBackend`].
///
/// Claims are fenced by token: release only frees a lock when the caller's
/// token matches the live claim, so a holder whose claim already expired
/// cannot free a successor's lock. Expired claims are reclaimed by the next
/// `try_acquire` rather than by a background sweeper.
///
/// Backends are cheap to clone; clones share the same claim table.
///
/// # Examples
///
/// ```
/// use herdlock::LockBackend;
/// use lockaside_memory::MemoryLockBackend;
/// use std::time::Duration;
///
/// # futures::executor::block_on(async {
/// let backend = MemoryLockBackend::new();
///
/// assert!(backend.try_acquire("job.lock", "a", Duration::from_secs(30)).await.unwrap());
/// assert!(!backend.try_acquire("job.lock", "b", Duration::from_secs(30)).await.unwrap());
///
/// backend.release("job.lock", "a").await.unwrap();
/// assert!(backend.try_acquire("job.lock", "b", Duration::from_secs(30)).await.unwrap());
/// # });
/// ```
#[derive(Clone, Default)]
pub struct MemoryLockBackend {
    claims: Arc<Mutex<HashMap<String, Claim>>>,
}

impl std::fmt::Debug for MemoryLockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLockBackend")
            .field("claims", &self.claims.lock().len())
            .finish_non_exhaustive()
    }
}

impl MemoryLockBackend {
    /// Creates a new backend with an empty claim table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `name` currently has a live claim.
    #[must_use]
    pub fn is_held(&self, name: &str) -> bool {
        let now = Instant::now();
        self.claims.lock().get(name).is_some_and(|claim| claim.is_live(now))
    }
}

impl LockBackend for MemoryLockBackend {
    async fn try_acquire(&self, name: &str, token: &str, ttl: Duration) -> Result<bool, Error> {
        let now = Instant::now();
        let mut claims = self.claims.lock();
        match claims.get(name) {
            Some(claim) if claim.is_live(now) => Ok(false),
            _ => {
                claims.insert(
                    name.to_owned(),
                    Claim {
                        token: token.to_owned(),
                        expires_at: now.checked_add(ttl),
                    },
                );
                Ok(true)
            }
        }
    }

    async fn release(&self, name: &str, token: &str) -> Result<(), Error> {
        let mut claims = self.claims.lock();
        if claims.get(name).is_some_and(|claim| claim.token == token) {
            claims.remove(name);
        }
        Ok(())
    }
}
