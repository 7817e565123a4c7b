// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Basic cache-aside usage: the first call runs the computation and caches
//! the result; the second call is served straight from the store.

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use std::time::Duration;

use lockaside::{Cached, LockClient, MemoryLockBackend, MemoryStore};

#[tokio::main]
async fn main() -> Result<(), lockaside::Error> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let store = MemoryStore::new();
    let lock = LockClient::new(MemoryLockBackend::new(), Duration::from_millis(50));

    let fetches = Arc::new(AtomicU32::new(0));
    let profile = Cached::builder(store, "profile:42", Duration::from_secs(300))
        .lock(lock)
        .lock_ttl(Duration::from_secs(30))
        .wrap({
            let fetches = Arc::clone(&fetches);
            move |user_id: u64| {
                let fetches = Arc::clone(&fetches);
                async move {
                    fetches.fetch_add(1, Ordering::Relaxed);
                    // Stand-in for a slow upstream lookup.
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    Ok::<_, std::io::Error>(format!("profile of user {user_id}"))
                }
            }
        });

    let first = profile.call(42).await?;
    let second = profile.call(42).await?;

    println!("first:  {first}");
    println!("second: {second}");
    println!("upstream fetches: {}", fetches.load(Ordering::Relaxed));

    Ok(())
}
