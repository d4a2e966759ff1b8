//! Error types for floppa.
//!
//! This module provides a unified error type with explicit variants for
//! transport failures, remote API errors, empty or malformed results, and
//! input validation.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for floppa operations.
///
/// Every failure in the foreground image path maps to exactly one variant,
/// so callers can match on the cause without parsing messages.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The record store answered with a non-2xx status.
    #[error("remote API error: {0}")]
    RemoteApi(#[from] RemoteApiError),

    /// The query matched no records.
    #[error("no records found in collection '{collection}'")]
    NotFound { collection: String },

    /// The selected record cannot be served.
    #[error("record '{id}' is invalid: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Input validation errors (collection name, external id, URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Local filesystem errors.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns true if this error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns the HTTP status of a remote API error, if any.
    pub fn remote_status(&self) -> Option<u16> {
        match self {
            Error::RemoteApi(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-2xx response from the record store.
#[derive(Debug)]
pub struct RemoteApiError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body, possibly empty.
    pub body: String,
}

impl RemoteApiError {
    /// Create a new remote API error.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl fmt::Display for RemoteApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteApiError {}

/// A malformed response body.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    pub message: String,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid record-store URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// Invalid collection name.
    #[error("invalid collection name '{value}': {reason}")]
    CollectionName { value: String, reason: String },

    /// Invalid external correlation id.
    #[error("invalid external id '{value}': {reason}")]
    ExternalId { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
