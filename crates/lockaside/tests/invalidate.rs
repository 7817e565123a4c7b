// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(feature = "memory")]

//! Integration tests for cache invalidation.

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use std::time::Duration;

use herdlock::LockClient;
use herdlock::testing::MockLockBackend;
use lockaside::{Cached, Error, MemoryStore, Store};
use lockaside_store::testing::{MockStore, StoreOp};

const TTL: Duration = Duration::from_secs(300);

#[tokio::test]
async fn invalidate_clears_cached_entry() {
    let store = MemoryStore::new();
    let calls = Arc::new(AtomicU32::new(0));

    let cached = Cached::builder(store.clone(), "user:1", TTL).wrap({
        let calls = Arc::clone(&calls);
        move |n: u32| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, std::io::Error>(n * 2)
            }
        }
    });

    assert_eq!(cached.call(6).await.unwrap(), 12);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    lockaside::invalidate(&store, "user:1").await.unwrap();
    assert_eq!(store.get("user:1").await.unwrap(), None);

    // The next call misses and recomputes.
    assert_eq!(cached.call(6).await.unwrap(), 12);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn invalidate_missing_key_completes_without_error() {
    let store = MemoryStore::new();
    assert!(lockaside::invalidate(&store, "never-cached").await.is_ok());
}

#[tokio::test]
async fn invalidate_forwards_store_error() {
    let store = MockStore::new();
    store.fail_when(|op| matches!(op, StoreOp::Delete(_)));

    let error = lockaside::invalidate(&store, "user:1").await.unwrap_err();
    assert!(matches!(error, Error::StoreDelete { key, .. } if key == "user:1"));
}

#[tokio::test]
async fn instance_invalidate_targets_its_own_key() {
    let store = MemoryStore::new();

    let cached = Cached::builder(store.clone(), "user:1", TTL)
        .wrap(|n: u32| async move { Ok::<_, std::io::Error>(n) });

    cached.call(1).await.unwrap();
    assert!(store.get("user:1").await.unwrap().is_some());

    cached.invalidate().await.unwrap();
    assert_eq!(store.get("user:1").await.unwrap(), None);
}

#[tokio::test]
async fn invalidate_never_touches_lock_state() {
    let store = MemoryStore::new();
    let backend = MockLockBackend::new();
    backend.hold("user:1.lock");

    let cached = Cached::builder(store.clone(), "user:1", TTL)
        .lock(LockClient::new(backend.clone(), Duration::from_millis(10)))
        .wrap(|n: u32| async move { Ok::<_, std::io::Error>(n) });

    store.set("user:1", "\"stale\"", TTL).await.unwrap();
    cached.invalidate().await.unwrap();

    // The out-of-band holder still owns the lock and no lock operation ran.
    assert!(backend.is_held("user:1.lock"));
    assert!(backend.operations().is_empty());
}
