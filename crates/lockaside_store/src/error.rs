// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for store operations.

/// An error from a store operation.
///
/// This is an opaque error type that can wrap any underlying error from a
/// store implementation. Use [`std::error::Error::source()`] to access the
/// underlying cause if needed.
///
/// # Example
///
/// ```
/// use lockaside_store::Error;
///
/// let error = Error::from_message("connection refused");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Creates a new error from a plain message.
    ///
    /// # Examples
    ///
    /// ```
    /// use lockaside_store::Error;
    ///
    /// let error = Error::from_message("operation failed");
    /// ```
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new error wrapping an underlying cause.
    ///
    /// The cause's `Display` output becomes this error's message and the
    /// cause itself is preserved as [`std::error::Error::source()`].
    pub fn from_source(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        let source = source.into();
        Self {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// A specialized [`Result`] type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_message() {
        let error = Error::from_message("display test");
        let display_str = format!("{error}");
        assert!(
            display_str.contains("display test"),
            "display output should contain the message, got: {display_str}"
        );
    }

    #[test]
    fn error_from_source_preserves_cause() {
        let cause = std::io::Error::other("broken pipe");
        let error = Error::from_source(cause);
        assert!(format!("{error}").contains("broken pipe"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn error_from_message_has_no_source() {
        let error = Error::from_message("standalone");
        assert!(std::error::Error::source(&error).is_none());
    }

    #[test]
    fn result_type_alias_propagates_errors() {
        fn returns_err() -> Result<i32> {
            Err(Error::from_message("expected failure"))
        }

        let err = returns_err().expect_err("should return an error");
        assert!(format!("{err}").contains("expected failure"));
    }
}
