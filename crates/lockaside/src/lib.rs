// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Cache-aside decorator for async computations, with distributed recompute
//! locking.
//!
//! Given an async computation and a key-value [`Store`], this crate produces
//! a wrapped computation that transparently caches its result: a call first
//! consults the store, and only on a miss runs the computation and writes the
//! result back with an expiry. When a distributed lock is configured,
//! concurrent callers across process instances are coordinated so at most one
//! recomputes a given entry at a time while the rest wait.
//!
//! Failed computations are never cached, and a value that was computed but
//! could not be written back is discarded rather than returned, so a present
//! cache entry is always a successfully stored prior result.
//!
//! # Examples
//!
//! ## Basic Decorator
//!
//! ```
//! use lockaside::{Cached, MemoryStore};
//! use std::time::Duration;
//! # futures::executor::block_on(async {
//!
//! let store = MemoryStore::new();
//! let fetch_plan = Cached::builder(store, "plan:enterprise", Duration::from_secs(300))
//!     .wrap(|account_id: u64| async move {
//!         // ... an expensive lookup ...
//!         Ok::<_, std::io::Error>(format!("plan for account {account_id}"))
//!     });
//!
//! // First call computes and caches; the second is served from the store.
//! let plan = fetch_plan.call(7).await?;
//! assert_eq!(plan, "plan for account 7");
//! let plan = fetch_plan.call(7).await?;
//! assert_eq!(plan, "plan for account 7");
//! # Ok::<(), lockaside::Error>(())
//! # });
//! ```
//!
//! ## Coordinated Recomputation
//!
//! ```
//! use lockaside::{Cached, LockClient, MemoryLockBackend, MemoryStore};
//! use std::time::Duration;
//! # futures::executor::block_on(async {
//!
//! let store = MemoryStore::new();
//! let lock = LockClient::new(MemoryLockBackend::new(), Duration::from_millis(50));
//!
//! let report = Cached::builder(store, "report:daily", Duration::from_secs(600))
//!     .lock(lock)
//!     .lock_ttl(Duration::from_secs(30))
//!     .wrap(|day: String| async move { Ok::<_, std::io::Error>(format!("report for {day}")) });
//!
//! let value = report.call("2024-03-01".to_string()).await?;
//! assert_eq!(value, "report for 2024-03-01");
//! # Ok::<(), lockaside::Error>(())
//! # });
//! ```

pub mod builder;
mod cached;
mod codec;
mod error;

#[doc(inline)]
pub use builder::{CachedBuilder, DEFAULT_LOCK_TTL};
#[doc(inline)]
pub use cached::{Cached, LOCK_SUFFIX, invalidate};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use herdlock::{DistributedLock, Lease, LockBackend, LockClient, LockGuard, NoLock};
#[doc(inline)]
pub use lockaside_store::Store;

#[cfg(feature = "memory")]
#[doc(inline)]
pub use lockaside_memory::{MemoryLockBackend, MemoryStore};

#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use herdlock::testing::{LockOp, MockLockBackend};
#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use lockaside_store::testing::{MockStore, StoreOp};
