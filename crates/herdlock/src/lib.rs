// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Polling distributed lock primitive with bounded hold lifetimes.
//!
//! This crate provides mutual exclusion whose state lives in a shared backend
//! visible across independent process instances, typically a key-value store
//! with a claim-if-absent-and-expire operation. When several processes contend
//! for the same lock name, one claims it and the rest poll until the holder
//! releases or the holder's lifetime elapses.
//!
//! # When to Use
//!
//! Use a distributed lock when independent processes must coordinate work that
//! a single in-process mutex cannot see:
//!
//! - **Cache recomputation**: let one process refresh an expired entry while
//!   its peers wait for the fresh value
//! - **Cron-style jobs**: ensure a scheduled task runs on one replica only
//! - **Migration steps**: serialize one-off work across a fleet
//!
//! # Example
//!
//! ```no_run
//! use herdlock::{DistributedLock, Lease, LockBackend, LockClient};
//! use std::time::Duration;
//!
//! # async fn example(backend: impl LockBackend + 'static) -> Result<(), herdlock::Error> {
//! // The poll interval is fixed when the client is constructed.
//! let client = LockClient::new(backend, Duration::from_millis(50));
//!
//! // Blocks (polling) until the lock is ours; the claim expires after 30s
//! // even if we never release it.
//! let guard = client.acquire("reports.lock", Duration::from_secs(30)).await?;
//!
//! // ... do the exclusive work ...
//!
//! guard.release().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Guarantees and Limits
//!
//! Exclusion is only as strong as the backend's atomicity: every contender
//! must use the same lock name against the same backend. There is no fairness
//! between waiters and no bounded wait; a waiter polls on its fixed interval
//! until the lock frees. Releases are fenced by a per-claim token generated at
//! acquisition, so a holder whose claim already expired cannot free a
//! successor's lock.

mod backend;
mod client;
mod error;
mod guard;
mod lock;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use backend::LockBackend;
#[doc(inline)]
pub use client::LockClient;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use guard::LockGuard;
#[doc(inline)]
pub use lock::{DistributedLock, Lease, NoLock};
