// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The mutual-exclusion abstraction consumers depend on.
//!
//! [`DistributedLock`] is what code that *uses* a lock should be generic
//! over; [`LockClient`](crate::LockClient) is the standard implementation.
//! [`NoLock`] satisfies the same contract with no coordination at all, for
//! call sites where exclusion is configured away.

use std::time::Duration;

use crate::Error;

/// A mutual-exclusion primitive keyed by lock name.
///
/// `acquire` suspends until the named lock is held by the caller. Every
/// claim carries a bounded lifetime of `max_hold`, after which the backend
/// treats it as expired and other waiters may claim the name; expiry
/// unblocks the others but does not interrupt the original holder.
pub trait DistributedLock: Send + Sync {
    /// The ownership handle returned by a successful acquisition.
    type Guard: Lease;

    /// Waits until the lock under `name` is held by this caller.
    ///
    /// There is no acquisition-failure outcome for a healthy backend: the
    /// call either eventually succeeds or keeps waiting. Implementations
    /// surface backend failures as errors.
    fn acquire(&self, name: &str, max_hold: Duration) -> impl Future<Output = Result<Self::Guard, Error>> + Send;
}

/// Ownership of an acquired lock.
///
/// Releasing consumes the lease, so a lock can only be released once.
/// Dropping a lease without releasing leaves the claim to expire on its own
/// lifetime, which delays other waiters but does not block them forever.
pub trait Lease: Send {
    /// Frees the lock immediately for other waiters.
    fn release(self) -> impl Future<Output = Result<(), Error>> + Send;
}

/// A lock that never excludes anyone.
///
/// `NoLock` acquires instantly and releases nothing. It exists so callers
/// can be generic over [`DistributedLock`] and still represent the
/// "exclusion disabled" configuration with a zero-cost type.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLock;

impl DistributedLock for NoLock {
    type Guard = ();

    async fn acquire(&self, _name: &str, _max_hold: Duration) -> Result<(), Error> {
        Ok(())
    }
}

impl Lease for () {
    async fn release(self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_lock_acquires_instantly_and_releases_cleanly() {
        let lock = NoLock;
        let guard = lock.acquire("anything", Duration::from_secs(60)).await.unwrap();
        guard.release().await.unwrap();
    }
}
