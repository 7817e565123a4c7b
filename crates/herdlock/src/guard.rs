// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Ownership handle for an acquired lock.

use std::sync::Arc;

use crate::{Error, Lease, LockBackend};

/// Ownership of a lock acquired through a [`LockClient`](crate::LockClient).
///
/// The guard carries the claim token generated at acquisition; releasing
/// forwards it to the backend so only the current claim can be freed.
/// Release consumes the guard, making double release impossible. A guard
/// that is dropped instead of released leaves the claim to expire on its
/// own lifetime.
pub struct LockGuard<B> {
    backend: Arc<B>,
    name: String,
    token: String,
}

impl<B> std::fmt::Debug for LockGuard<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("name", &self.name)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl<B: LockBackend> LockGuard<B> {
    pub(crate) fn new(backend: Arc<B>, name: String, token: String) -> Self {
        Self { backend, name, token }
    }

    /// Returns the lock name this guard holds.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the claim token generated for this acquisition.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl<B: LockBackend> Lease for LockGuard<B> {
    async fn release(self) -> Result<(), Error> {
        self.backend.release(&self.name, &self.token).await
    }
}
