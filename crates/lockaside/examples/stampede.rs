// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Recompute locking prevents multiple concurrent misses for the same key
//! from all computing at once. Without the lock every miss computes in
//! parallel; with it, computations for the key run strictly one at a time.

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use std::time::Duration;

use lockaside::{Cached, LockClient, MemoryLockBackend, MemoryStore};

/// Tracks how many computations run at once and the highest count observed.
#[derive(Debug, Default)]
struct InFlight {
    current: AtomicU32,
    max_seen: AtomicU32,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_seen.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

fn slow_computation(
    in_flight: Arc<InFlight>,
) -> impl Fn(u32) -> std::pin::Pin<Box<dyn Future<Output = Result<u32, std::io::Error>> + Send>> {
    move |n| {
        let in_flight = Arc::clone(&in_flight);
        Box::pin(async move {
            in_flight.enter();
            tokio::time::sleep(Duration::from_millis(50)).await;
            in_flight.exit();
            Ok(n * 2)
        })
    }
}

#[tokio::main]
async fn main() {
    let key = "contested:report";

    // Without a lock: every concurrent miss computes in parallel.
    let in_flight = Arc::new(InFlight::default());
    let cached = Arc::new(
        Cached::builder(MemoryStore::new(), key, Duration::from_secs(300)).wrap(slow_computation(Arc::clone(&in_flight))),
    );

    let mut handles = Vec::new();
    for _ in 0..10 {
        let cached = Arc::clone(&cached);
        handles.push(tokio::spawn(async move { cached.call(21).await }));
    }
    for handle in handles {
        let _ = handle.await.expect("task panicked");
    }
    println!("without lock: up to {} computations at once", in_flight.max_seen.load(Ordering::SeqCst));

    // With a lock: misses queue up and compute strictly one at a time.
    let in_flight = Arc::new(InFlight::default());
    let lock = LockClient::new(MemoryLockBackend::new(), Duration::from_millis(5));
    let cached = Arc::new(
        Cached::builder(MemoryStore::new(), key, Duration::from_secs(300))
            .lock(lock)
            .wrap(slow_computation(Arc::clone(&in_flight))),
    );

    let mut handles = Vec::new();
    for _ in 0..10 {
        let cached = Arc::clone(&cached);
        handles.push(tokio::spawn(async move { cached.call(21).await }));
    }
    for handle in handles {
        let _ = handle.await.expect("task panicked");
    }
    println!("with lock:    up to {} computation at once", in_flight.max_seen.load(Ordering::SeqCst));
}
