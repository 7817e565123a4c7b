// Copyright (c) Microsoft Corporation.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Core key-value store abstraction for cache-aside backends.
//!
//! This crate defines the [`Store`] trait that every cache backend must satisfy,
//! along with [`Error`] for fallible operations. Values are opaque strings: the
//! store never interprets them, and serialization to and from the wire form is
//! the caller's concern.
//!
//! # Overview
//!
//! The store abstraction separates storage plumbing from caching behavior.
//! Implement [`Store`] for your backend (Redis, memcached, an in-process map),
//! then use `lockaside` to layer the cache-aside protocol on top.
//!
//! # Implementing a Store
//!
//! ```
//! use lockaside_store::{Error, Store};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//! use std::time::Duration;
//!
//! struct SimpleStore(RwLock<HashMap<String, String>>);
//!
//! impl Store for SimpleStore {
//!     async fn get(&self, key: &str) -> Result<Option<String>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn set(&self, key: &str, value: &str, _expire_in: Duration) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.to_owned(), value.to_owned());
//!         Ok(())
//!     }
//!
//!     async fn delete(&self, key: &str) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//! }
//! ```

mod error;
mod store;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use store::Store;
