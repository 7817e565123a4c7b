// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for lock operations.

/// An error from a lock backend operation.
///
/// This is an opaque error type that can wrap any underlying error from a
/// backend implementation. Use [`std::error::Error::source()`] to access the
/// underlying cause if needed.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Creates a new error from a plain message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new error wrapping an underlying cause.
    pub fn from_source(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        let source = source.into();
        Self {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// A specialized [`Result`] type for lock operations.
pub type Result<T> = std::result::Result<T, Error>;
