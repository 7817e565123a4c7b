// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the polling lock client.

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use herdlock::{DistributedLock, Error, Lease, LockBackend, LockClient};

const POLL: Duration = Duration::from_millis(10);
const HOLD: Duration = Duration::from_secs(30);

/// Minimal scripted backend: claims never expire on their own, and tests can
/// hold or free names out of band and flip operations into failing.
#[derive(Clone, Default)]
struct ScriptedBackend {
    held: Arc<Mutex<HashMap<String, String>>>,
    ttls: Arc<Mutex<Vec<Duration>>>,
    fail_acquire: Arc<AtomicBool>,
    fail_release: Arc<AtomicBool>,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self::default()
    }

    fn hold(&self, name: &str) {
        self.held
            .lock()
            .expect("lock poisoned")
            .insert(name.to_owned(), "held-out-of-band".to_owned());
    }

    fn free(&self, name: &str) {
        self.held.lock().expect("lock poisoned").remove(name);
    }

    fn is_held(&self, name: &str) -> bool {
        self.held.lock().expect("lock poisoned").contains_key(name)
    }

    fn holder_token(&self, name: &str) -> Option<String> {
        self.held.lock().expect("lock poisoned").get(name).cloned()
    }

    fn recorded_ttls(&self) -> Vec<Duration> {
        self.ttls.lock().expect("lock poisoned").clone()
    }
}

impl LockBackend for ScriptedBackend {
    async fn try_acquire(&self, name: &str, token: &str, ttl: Duration) -> Result<bool, Error> {
        if self.fail_acquire.load(Ordering::SeqCst) {
            return Err(Error::from_message("scripted: try_acquire failed"));
        }
        self.ttls.lock().expect("lock poisoned").push(ttl);

        let mut held = self.held.lock().expect("lock poisoned");
        if held.contains_key(name) {
            Ok(false)
        } else {
            held.insert(name.to_owned(), token.to_owned());
            Ok(true)
        }
    }

    async fn release(&self, name: &str, token: &str) -> Result<(), Error> {
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(Error::from_message("scripted: release failed"));
        }

        let mut held = self.held.lock().expect("lock poisoned");
        if held.get(name).is_some_and(|holder| holder == token) {
            held.remove(name);
        }
        Ok(())
    }
}

#[tokio::test]
async fn acquire_free_lock_claims_immediately() {
    let backend = ScriptedBackend::new();
    let client = LockClient::new(backend.clone(), POLL);

    let guard = client.acquire("job.lock", HOLD).await.unwrap();

    assert!(backend.is_held("job.lock"));
    assert_eq!(backend.holder_token("job.lock").as_deref(), Some(guard.token()));

    guard.release().await.unwrap();
    assert!(!backend.is_held("job.lock"));
}

#[tokio::test(start_paused = true)]
async fn acquire_polls_until_holder_frees() {
    let backend = ScriptedBackend::new();
    backend.hold("job.lock");

    let client = LockClient::new(backend.clone(), POLL);
    let waiter = tokio::spawn(async move { client.acquire("job.lock", HOLD).await });

    // Give the waiter several poll rounds; it must still be blocked.
    tokio::time::sleep(POLL * 5).await;
    assert!(!waiter.is_finished());

    backend.free("job.lock");

    let guard = waiter.await.unwrap().unwrap();
    assert!(backend.is_held("job.lock"));
    guard.release().await.unwrap();
}

#[tokio::test]
async fn each_acquisition_generates_a_fresh_token() {
    let backend = ScriptedBackend::new();
    let client = LockClient::new(backend.clone(), POLL);

    let first = client.acquire("job.lock", HOLD).await.unwrap();
    let first_token = first.token().to_owned();
    first.release().await.unwrap();

    let second = client.acquire("job.lock", HOLD).await.unwrap();
    assert_ne!(first_token, second.token());
    second.release().await.unwrap();
}

#[tokio::test]
async fn requested_hold_lifetime_reaches_the_backend() {
    let backend = ScriptedBackend::new();
    let client = LockClient::new(backend.clone(), POLL);

    let guard = client.acquire("job.lock", Duration::from_secs(7)).await.unwrap();
    guard.release().await.unwrap();

    assert_eq!(backend.recorded_ttls(), vec![Duration::from_secs(7)]);
}

#[tokio::test]
async fn backend_failure_surfaces_from_acquire() {
    let backend = ScriptedBackend::new();
    backend.fail_acquire.store(true, Ordering::SeqCst);

    let client = LockClient::new(backend, POLL);
    assert!(client.acquire("job.lock", HOLD).await.is_err());
}

#[tokio::test]
async fn backend_failure_surfaces_from_release() {
    let backend = ScriptedBackend::new();
    let client = LockClient::new(backend.clone(), POLL);

    let guard = client.acquire("job.lock", HOLD).await.unwrap();
    backend.fail_release.store(true, Ordering::SeqCst);

    assert!(guard.release().await.is_err());
}
