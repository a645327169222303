//! Error handling for the whiteboard editor
//!
//! The editing engine itself is total: unknown ids and degenerate geometry are
//! handled without failing. The only fallible layer is diagram persistence,
//! whose failures are described by [`StoreError`].
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Persistence error type
///
/// Represents failures of a diagram store (loading, saving, listing and
/// deleting diagrams).
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// No diagram exists with the requested identifier
    #[error("Diagram not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// Reading or writing the backing storage failed
    #[error("Storage I/O error: {reason}")]
    Io {
        /// The reason for the I/O failure.
        reason: String,
    },

    /// A stored diagram could not be encoded or decoded
    #[error("Serialization error: {reason}")]
    Serialization {
        /// The reason the conversion failed.
        reason: String,
    },

    /// A stored diagram was written by an incompatible format version
    #[error("Unsupported diagram format version {version} (expected {expected})")]
    UnsupportedVersion {
        /// The version found in storage.
        version: u32,
        /// The version this build understands.
        expected: u32,
    },

    /// Generic storage error
    #[error("Storage error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Main error type for the whiteboard editor
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Persistence error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error reports a missing diagram
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(StoreError::NotFound { .. }))
    }

    /// Check if this is a persistence error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
