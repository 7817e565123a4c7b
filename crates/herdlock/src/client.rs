// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The polling lock client.

use std::{sync::Arc, time::Duration};

use tracing::trace;
use uuid::Uuid;

use crate::{DistributedLock, Error, LockBackend, LockGuard};

/// A distributed lock client that acquires by polling.
///
/// `LockClient` wraps a [`LockBackend`] and implements [`DistributedLock`]:
/// each acquisition generates a fresh claim token and retries the backend's
/// atomic claim on a fixed interval until it succeeds. The poll interval is a
/// property of the client, set once at construction, never per call.
///
/// Clients are cheap to clone; clones share the same backend.
///
/// # Examples
///
/// ```no_run
/// use herdlock::{DistributedLock, Lease, LockBackend, LockClient};
/// use std::time::Duration;
///
/// # async fn example(backend: impl LockBackend + 'static) -> Result<(), herdlock::Error> {
/// let client = LockClient::new(backend, Duration::from_millis(50));
///
/// let guard = client.acquire("nightly-report.lock", Duration::from_secs(60)).await?;
/// // exclusive section
/// guard.release().await?;
/// # Ok(())
/// # }
/// ```
pub struct LockClient<B> {
    backend: Arc<B>,
    poll_interval: Duration,
}

impl<B> std::fmt::Debug for LockClient<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockClient")
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl<B> Clone for LockClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            poll_interval: self.poll_interval,
        }
    }
}

impl<B: LockBackend> LockClient<B> {
    /// Creates a new client over `backend`, retrying contended acquisitions
    /// every `poll_interval`.
    #[must_use]
    pub fn new(backend: B, poll_interval: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            poll_interval,
        }
    }

    /// Returns the fixed interval between claim retries.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns a reference to the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: LockBackend> DistributedLock for LockClient<B> {
    type Guard = LockGuard<B>;

    async fn acquire(&self, name: &str, max_hold: Duration) -> Result<LockGuard<B>, Error> {
        let token = Uuid::new_v4().to_string();
        loop {
            if self.backend.try_acquire(name, &token, max_hold).await? {
                trace!(name, "lock acquired");
                return Ok(LockGuard::new(Arc::clone(&self.backend), name.to_owned(), token));
            }
            trace!(name, "lock contended, polling");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
