//! # Framework Errors
//!
//! This module defines the common error types used throughout the ledger framework.
//! Storage backends report [`StorageError`]; the actor and client layers report
//! [`FrameworkError`], which wraps storage failures and the record's own error type.

/// Errors raised by a [`StorageBackend`](crate::storage::StorageBackend).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Errors that can occur within the ledger framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Malformed record at {key}: {reason}")]
    Malformed { key: String, reason: String },
    #[error("Write conflict on {key} after {attempts} attempts")]
    WriteConflict { key: String, attempts: u32 },
    #[error("Encoding failed: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
