// Copyright (c) Microsoft Corporation.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory store and lock backends backed by moka and a claim table.
//!
//! This crate provides [`MemoryStore`], a moka-backed key-value store that
//! honors each entry's own expiry, and [`MemoryLockBackend`], a lock table
//! with claim-if-absent-or-expired semantics. Together they let the
//! cache-aside decorator run entirely in process, which is the natural setup
//! for tests, examples, and single-node deployments.
//!
//! # Quick Start
//!
//! ```
//! use lockaside_memory::MemoryStore;
//! use lockaside_store::Store;
//! use std::time::Duration;
//!
//! # futures::executor::block_on(async {
//! let store = MemoryStore::new();
//!
//! store.set("key", "value", Duration::from_secs(300)).await.unwrap();
//! let value = store.get("key").await.unwrap();
//! assert_eq!(value.as_deref(), Some("value"));
//! # });
//! ```
//!
//! # Features
//!
//! - **Per-entry expiry**: every `set` carries its own TTL, enforced exactly
//! - **Capacity limits**: optional maximum entry count with `TinyLFU` eviction
//! - **Token-fenced locks**: a stale holder cannot free a successor's claim
//! - **Zero external types**: the builder API avoids exposing moka directly

pub mod builder;
pub mod lock;
pub mod store;

#[doc(inline)]
pub use builder::MemoryStoreBuilder;
#[doc(inline)]
pub use lock::MemoryLockBackend;
#[doc(inline)]
pub use store::MemoryStore;
