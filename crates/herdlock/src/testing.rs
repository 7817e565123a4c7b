// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock lock backend for testing.
//!
//! This module provides `MockLockBackend`, a configurable in-memory backend
//! that records all operations, supports failure injection, and lets tests
//! hold and free locks out of band to script contention.

use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;

use crate::{Error, LockBackend};

/// Recorded lock operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOp {
    /// A claim was attempted for the given name.
    TryAcquire {
        /// The lock name that was contended.
        name: String,
        /// The claim token the caller presented.
        token: String,
        /// The hold lifetime the caller requested.
        ttl: Duration,
    },
    /// A release was performed for the given name.
    Release {
        /// The lock name that was released.
        name: String,
        /// The claim token the caller presented.
        token: String,
    },
}

type FailPredicate = Box<dyn Fn(&LockOp) -> bool + Send + Sync>;

/// A configurable mock lock backend for testing.
///
/// Claims never expire on their own; use [`hold`](Self::hold) and
/// [`free`](Self::free) to script contention deterministically. Lifetimes
/// are recorded but not enforced; use a real backend when expiry behavior
/// itself is under test.
///
/// # Examples
///
/// ```
/// use herdlock::{testing::MockLockBackend, LockBackend};
/// use std::time::Duration;
///
/// # futures::executor::block_on(async {
/// let backend = MockLockBackend::new();
/// backend.hold("busy.lock");
///
/// // Another contender cannot claim a held lock.
/// let claimed = backend.try_acquire("busy.lock", "tok", Duration::from_secs(30)).await.unwrap();
/// assert!(!claimed);
///
/// backend.free("busy.lock");
/// let claimed = backend.try_acquire("busy.lock", "tok", Duration::from_secs(30)).await.unwrap();
/// assert!(claimed);
/// # });
/// ```
#[derive(Default)]
pub struct MockLockBackend {
    held: Arc<Mutex<HashMap<String, String>>>,
    operations: Arc<Mutex<Vec<LockOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
}

impl std::fmt::Debug for MockLockBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLockBackend")
            .field("held", &self.held)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl Clone for MockLockBackend {
    fn clone(&self) -> Self {
        Self {
            held: Arc::clone(&self.held),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

/// Token used by [`MockLockBackend::hold`] for out-of-band claims.
const EXTERNAL_HOLDER: &str = "held-out-of-band";

impl MockLockBackend {
    /// Creates a new empty mock backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `name` out of band, as if another process held it.
    pub fn hold(&self, name: &str) {
        self.held.lock().insert(name.to_owned(), EXTERNAL_HOLDER.to_owned());
    }

    /// Frees `name` regardless of who holds it.
    pub fn free(&self, name: &str) {
        self.held.lock().remove(name);
    }

    /// Returns true if `name` is currently claimed.
    #[must_use]
    pub fn is_held(&self, name: &str) -> bool {
        self.held.lock().contains_key(name)
    }

    /// Returns the token of the current claim on `name`, if any.
    #[must_use]
    pub fn holder_token(&self, name: &str) -> Option<String> {
        self.held.lock().get(name).cloned()
    }

    /// Sets a predicate that determines when operations should fail.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&LockOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<LockOp> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn record(&self, op: LockOp) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &LockOp) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

impl LockBackend for MockLockBackend {
    async fn try_acquire(&self, name: &str, token: &str, ttl: Duration) -> Result<bool, Error> {
        let op = LockOp::TryAcquire {
            name: name.to_owned(),
            token: token.to_owned(),
            ttl,
        };
        if self.should_fail(&op) {
            self.record(op);
            return Err(Error::from_message("mock: try_acquire failed"));
        }
        self.record(op);

        let mut held = self.held.lock();
        if held.contains_key(name) {
            Ok(false)
        } else {
            held.insert(name.to_owned(), token.to_owned());
            Ok(true)
        }
    }

    async fn release(&self, name: &str, token: &str) -> Result<(), Error> {
        let op = LockOp::Release {
            name: name.to_owned(),
            token: token.to_owned(),
        };
        if self.should_fail(&op) {
            self.record(op);
            return Err(Error::from_message("mock: release failed"));
        }
        self.record(op);

        let mut held = self.held.lock();
        if held.get(name).is_some_and(|holder| holder == token) {
            held.remove(name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn claim_then_contend_then_release() {
        let backend = MockLockBackend::new();

        assert!(backend.try_acquire("l", "a", Duration::from_secs(1)).await.unwrap());
        assert!(!backend.try_acquire("l", "b", Duration::from_secs(1)).await.unwrap());

        backend.release("l", "a").await.unwrap();
        assert!(backend.try_acquire("l", "b", Duration::from_secs(1)).await.unwrap());
    }

    #[tokio::test]
    async fn release_with_wrong_token_is_ignored() {
        let backend = MockLockBackend::new();

        assert!(backend.try_acquire("l", "a", Duration::from_secs(1)).await.unwrap());
        backend.release("l", "intruder").await.unwrap();

        assert!(backend.is_held("l"));
        assert_eq!(backend.holder_token("l").as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn failure_predicate_scopes_to_matching_ops() {
        let backend = MockLockBackend::new();
        backend.fail_when(|op| matches!(op, LockOp::Release { .. }));

        assert!(backend.try_acquire("l", "a", Duration::from_secs(1)).await.is_ok());
        assert!(backend.release("l", "a").await.is_err());

        // The failed release must not have freed the lock.
        assert!(backend.is_held("l"));
    }
}
