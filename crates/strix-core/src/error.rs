//! Error types for control plane operations.
//!
//! This module provides [`StrixError`], a single error type covering all
//! failure modes of the snapshot cache and its reconciliation engine, plus
//! [`ErrorReason`], a closed kind enum used by callers that dispatch on the
//! class of failure without matching on error payloads.

use std::error::Error as StdError;
use std::fmt;

/// Comprehensive error type for control plane operations.
///
/// This error type is designed to:
/// - Cover all failure modes without using panics
/// - Carry enough context to locate the offending entry in the original
///   definition list without re-parsing source
/// - Support error chaining via `source` fields
///
/// # Example
///
/// ```rust
/// use strix_core::StrixError;
///
/// fn check_name(name: &str) -> Result<(), StrixError> {
///     if name.is_empty() {
///         return Err(StrixError::Validation {
///             path: "resources[0].value".to_string(),
///             value: name.to_string(),
///             message: "resource name cannot be empty".to_string(),
///         });
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StrixError {
    /// Malformed or unreferenceable resource content.
    #[error("invalid resource at {path}: {message}")]
    Validation {
        /// Field path locating the offending entry, e.g. `resources[2].value`.
        path: String,
        /// The offending raw value.
        value: String,
        /// Reason why the value was rejected.
        message: String,
    },

    /// A referenced object does not exist.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What kind of object was looked up ("secret", "snapshot", ...).
        kind: &'static str,
        /// The name that failed to resolve.
        name: String,
    },

    /// Endpoint discovery failed.
    #[error("endpoint discovery failed for cluster '{cluster_name}': {message}")]
    Discovery {
        /// Cluster whose endpoints were being discovered.
        cluster_name: String,
        /// Error message from the discovery backend.
        message: String,
    },

    /// Cache write rejected by the underlying transport.
    #[error("cache write rejected: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
        /// Optional underlying error.
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Operation aborted by cancellation or deadline.
    #[error("operation cancelled: {operation}")]
    Cancelled {
        /// Description of the operation that was cancelled.
        operation: String,
    },

    /// Resource encoding failed.
    #[error("encoding error for {type_url}: {message}")]
    Encode {
        /// The type URL being encoded.
        type_url: String,
        /// Error message.
        message: String,
    },

    /// Resource decoding failed.
    #[error("decoding error for {type_url}: {message}")]
    Decode {
        /// The type URL being decoded.
        type_url: String,
        /// Error message.
        message: String,
    },

    /// Internal dispatch defect. Degrades to a descriptive error rather
    /// than an abort.
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl StrixError {
    /// Create a validation error.
    pub fn validation(
        path: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            path: path.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Create a discovery error.
    pub fn discovery(cluster_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Discovery {
            cluster_name: cluster_name.into(),
            message: message.into(),
        }
    }

    /// Create a storage error from any error type.
    pub fn storage<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The closed failure kind for this error.
    pub fn reason(&self) -> ErrorReason {
        match self {
            Self::Validation { .. } | Self::Encode { .. } | Self::Decode { .. } => {
                ErrorReason::Validation
            }
            Self::NotFound { .. } => ErrorReason::NotFound,
            Self::Discovery { .. } => ErrorReason::Discovery,
            Self::Storage { .. } => ErrorReason::Storage,
            Self::Cancelled { .. } => ErrorReason::Cancelled,
            Self::Internal { .. } => ErrorReason::Unknown,
        }
    }

    /// Whether this error is a not-found error.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether this error was caused by cancellation.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Closed set of failure kinds, with an explicit fallback for errors that
/// did not originate in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    /// Malformed or unreferenceable resource content.
    Validation,
    /// Missing secret or missing node in the cache.
    NotFound,
    /// Endpoint resolution failed.
    Discovery,
    /// Cache write rejected by the transport.
    Storage,
    /// Deadline exceeded or cancelled during an external call.
    Cancelled,
    /// Any error not classified above.
    Unknown,
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validation => "Validation",
            Self::NotFound => "NotFound",
            Self::Discovery => "Discovery",
            Self::Storage => "Storage",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Classify an arbitrary error, falling back to [`ErrorReason::Unknown`]
/// for error types foreign to this crate.
pub fn reason_for_error(err: &(dyn StdError + 'static)) -> ErrorReason {
    match err.downcast_ref::<StrixError>() {
        Some(e) => e.reason(),
        None => ErrorReason::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_context() {
        let err = StrixError::validation("resources[3].value", "{bad json", "unexpected token");
        let msg = err.to_string();
        assert!(msg.contains("resources[3].value"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn reason_mapping() {
        assert_eq!(
            StrixError::not_found("secret", "tls-server").reason(),
            ErrorReason::NotFound
        );
        assert_eq!(
            StrixError::discovery("foo", "backend unavailable").reason(),
            ErrorReason::Discovery
        );
        assert_eq!(
            StrixError::Cancelled {
                operation: "secret lookup".to_string()
            }
            .reason(),
            ErrorReason::Cancelled
        );
        assert_eq!(
            StrixError::internal("no handler registered").reason(),
            ErrorReason::Unknown
        );
    }

    #[test]
    fn decode_errors_are_validation_failures() {
        let err = StrixError::Decode {
            type_url: "type.googleapis.com/envoy.config.cluster.v3.Cluster".to_string(),
            message: "missing field `name`".to_string(),
        };
        assert_eq!(err.reason(), ErrorReason::Validation);
    }

    #[test]
    fn reason_for_foreign_error_is_unknown() {
        let io_err = std::io::Error::other("boom");
        assert_eq!(reason_for_error(&io_err), ErrorReason::Unknown);

        let strix_err = StrixError::not_found("snapshot", "node-1");
        assert_eq!(reason_for_error(&strix_err), ErrorReason::NotFound);
    }
}
