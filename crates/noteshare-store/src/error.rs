//! Error types for the storage layer.

use std::time::Duration;

use noteshare_core::{Email, NoteId, Operation};
use thiserror::Error;

/// Result type alias for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for access-controlled operations.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors raised by a [`DocumentStore`](crate::DocumentStore) implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A store call did not complete in time.
    #[error("store operation {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// The backend returned data it should never hold.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors returned by [`AccessControlledNoteStore`](crate::AccessControlledNoteStore).
#[derive(Debug, Error)]
pub enum AccessError {
    /// A required identity or field is missing or empty.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No note has the given identifier.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// The requester lacks the permission the operation needs.
    #[error("{requester} is not allowed to {operation} note {note_id}")]
    Unauthorized {
        operation: Operation,
        note_id: NoteId,
        requester: Email,
    },

    /// The document store failed.
    #[error(transparent)]
    StoreFailure(#[from] StoreError),
}

impl AccessError {
    /// Whether the underlying store timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::StoreFailure(StoreError::Timeout { .. }))
    }
}
