// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for decorated calls.

use std::time::Duration;

use herdlock::Error as LockError;
use lockaside_store::Error as StoreError;

/// An error from a decorated call or an invalidation.
///
/// Every failure is delivered through the returned `Result`; the decorator
/// never panics and never swallows an error, with one deliberate exception:
/// a failed lock *release* is suppressed (and logged) so it cannot mask the
/// call's primary outcome.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The cache lookup failed. No lock was taken and the wrapped
    /// computation was not invoked.
    #[error("cache lookup failed for key `{key}`")]
    StoreRead {
        /// The cache key that was being read.
        key: String,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// The computation succeeded but its result could not be written back.
    /// The computed value is discarded; nothing was cached.
    #[error("cache write failed for key `{key}`")]
    StoreWrite {
        /// The cache key that was being written.
        key: String,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// Deleting a cache entry failed.
    #[error("cache invalidation failed for key `{key}`")]
    StoreDelete {
        /// The cache key that was being deleted.
        key: String,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },

    /// The wrapped computation itself failed. Nothing was cached and any
    /// held lock was released first.
    #[error("wrapped computation failed")]
    Computation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A computed value could not be serialized to its wire form. Nothing
    /// was written.
    #[error("could not encode value for key `{key}`")]
    Encode {
        /// The cache key the value was computed for.
        key: String,
        /// The serialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// A stored entry could not be deserialized. A present entry should
    /// always be a successfully encoded prior result, so this points at a
    /// corrupted entry or a type mismatch between writers and readers.
    #[error("could not decode cached value for key `{key}`")]
    Decode {
        /// The cache key whose entry was unreadable.
        key: String,
        /// The deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// The lock backend failed while acquiring the recompute lock.
    #[error("recompute lock `{name}` failed")]
    Lock {
        /// The lock name that was being acquired.
        name: String,
        /// The underlying backend failure.
        #[source]
        source: LockError,
    },

    /// The configured acquisition timeout elapsed before the recompute lock
    /// could be claimed. The lock holder is unaffected.
    #[error("timed out after {waited:?} waiting for recompute lock `{name}`")]
    LockTimeout {
        /// The lock name that was being acquired.
        name: String,
        /// How long the caller waited before giving up.
        waited: Duration,
    },
}

impl Error {
    pub(crate) fn computation<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Computation(Box::new(source))
    }

    /// Returns the wrapped computation's own error as `E`, when this error
    /// is a computation failure of that type.
    ///
    /// # Examples
    ///
    /// ```
    /// use lockaside::Error;
    ///
    /// fn classify(error: &Error) -> &'static str {
    ///     match error.computation_error::<std::io::Error>() {
    ///         Some(_) => "the computation's own I/O failure",
    ///         None => "a caching failure",
    ///     }
    /// }
    /// ```
    #[must_use]
    pub fn computation_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Computation(source) => source.downcast_ref(),
            _ => None,
        }
    }
}

/// A specialized [`Result`] type for decorated calls.
pub type Result<T> = std::result::Result<T, Error>;
