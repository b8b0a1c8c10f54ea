//! Error types for the Detux client.
//!
//! Every fallible library operation returns [`DetuxError`]. Variants carry the
//! operation, path, hash or endpoint involved so a failure can be diagnosed
//! from the message alone.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the Detux API or storing reports.
#[derive(Debug, Error)]
pub enum DetuxError {
    /// A caller-supplied parameter has the wrong shape or range.
    #[error("invalid argument for {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// Path is missing, not a regular file, or empty.
    #[error("invalid file for {operation} {}: {reason}", path.display())]
    InvalidFile {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },

    /// Value is not a 64 character hex SHA256 digest.
    #[error("invalid hash for {operation}: '{value}' is not a valid SHA256 hash")]
    InvalidHash {
        operation: &'static str,
        value: String,
    },

    /// The endpoint could not be reached (DNS, timeout, refused connection).
    #[error("failed to reach {endpoint}: {detail}")]
    Transport { endpoint: String, detail: String },

    /// The endpoint answered HTTP 200 but reported an operation failure.
    #[error("{operation} failed: {message}")]
    RemoteFailure {
        operation: &'static str,
        message: String,
    },

    /// The endpoint answered with a non-200 HTTP status.
    #[error("{endpoint} returned HTTP status {status}")]
    RemoteProtocol { endpoint: String, status: u16 },

    /// The endpoint answered HTTP 200 with a body that is not valid JSON.
    #[error("malformed response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: String, detail: String },

    /// Writing a report to disk or object storage failed.
    #[error("failed to store report to {target}: {detail}")]
    Storage { target: String, detail: String },

    /// Reading a local file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A batch worker panicked or the worker pool could not be started.
    #[error("batch worker failure: {0}")]
    Worker(String),
}

impl DetuxError {
    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        DetuxError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Operation name used by validation errors raised outside a client call.
    pub const VALIDATE: &'static str = "validate";

    /// Attribute a validation error to `operation`; other errors pass through.
    pub fn in_operation(self, operation: &'static str) -> Self {
        match self {
            DetuxError::InvalidArgument { reason, .. } => DetuxError::InvalidArgument { operation, reason },
            DetuxError::InvalidFile { path, reason, .. } => DetuxError::InvalidFile { operation, path, reason },
            DetuxError::InvalidHash { value, .. } => DetuxError::InvalidHash { operation, value },
            other => other,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DetuxError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn storage(target: impl Into<String>, detail: impl ToString) -> Self {
        DetuxError::Storage {
            target: target.into(),
            detail: detail.to_string(),
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, DetuxError>;
