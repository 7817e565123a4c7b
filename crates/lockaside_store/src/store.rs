// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for key-value store backends.
//!
//! [`Store`] defines the interface the cache-aside decorator issues its
//! operations against. Implement it for your backend, then let `lockaside`
//! layer lookup, recompute coordination, and expiry-bearing writes on top.

use std::time::Duration;

use crate::Error;

/// Trait for key-value store implementations.
///
/// Values are opaque strings; the store never inspects them. Every operation
/// is asynchronous and fallible. The decorator serializes results to their
/// wire form before `set` and deserializes after `get`.
///
/// Expiry on `set` follows the "expire in seconds" convention of remote
/// key-value stores: backends with coarser clocks may round the duration up
/// to whole seconds, while in-process backends can honor it exactly.
pub trait Store: Send + Sync {
    /// Reads the value stored under `key`, returning `None` when the key is
    /// absent or its entry has expired.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, Error>> + Send;

    /// Writes `value` under `key`, expiring the entry after `expire_in`.
    ///
    /// An existing entry is overwritten and its expiry restarted.
    fn set(&self, key: &str, value: &str, expire_in: Duration) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes the entry stored under `key`, if any.
    ///
    /// Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), Error>> + Send;
}
