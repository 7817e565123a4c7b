// Copyright (c) Microsoft Corporation.

//! Benchmark suite measuring decorator overhead on the cache-hit path.

#![allow(missing_docs, reason = "benchmark internals need no docs")]

use std::{hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};
use lockaside::{Cached, MemoryStore, Store};
use tokio::runtime::Runtime;

fn create_runtime() -> Runtime {
    Runtime::new().unwrap()
}

fn bench_hit_path(c: &mut Criterion) {
    let rt = create_runtime();
    let mut group = c.benchmark_group("hit_path");

    group.bench_function("direct_store_get", |b| {
        let store = MemoryStore::new();
        rt.block_on(async {
            store.set("key", "\"value\"", Duration::from_secs(3600)).await.unwrap();
        });
        b.to_async(&rt).iter(|| async { black_box(store.get(black_box("key")).await.unwrap()) });
    });

    group.bench_function("decorated_hit", |b| {
        let store = MemoryStore::new();
        let cached = Cached::builder(store, "key", Duration::from_secs(3600))
            .wrap(|n: u64| async move { Ok::<_, std::io::Error>(n.to_string()) });
        rt.block_on(async {
            cached.call(1).await.unwrap();
        });
        b.to_async(&rt).iter(|| async { black_box(cached.call(black_box(1)).await.unwrap()) });
    });

    group.finish();
}

fn bench_miss_path(c: &mut Criterion) {
    let rt = create_runtime();
    let mut group = c.benchmark_group("miss_path");

    group.bench_function("compute_and_store", |b| {
        let store = MemoryStore::new();
        let cached = Cached::builder(store, "key", Duration::from_secs(3600))
            .wrap(|n: u64| async move { Ok::<_, std::io::Error>(n.to_string()) });
        b.to_async(&rt).iter(|| async {
            cached.invalidate().await.unwrap();
            black_box(cached.call(black_box(1)).await.unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_hit_path, bench_miss_path);
criterion_main!(benches);
