use thiserror::Error;

/// Errors returned by the persistence slot.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The SQLite key-value table could not be read or written.
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Errors returned by note store operations.
///
/// Unknown ids are not errors: operations on a missing note are no-ops.
#[derive(Debug, Error)]
pub enum NoteError {
    /// The draft's title was empty or whitespace-only.
    #[error("Note title cannot be empty")]
    EmptyTitle,

    /// The collection could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The encoded collection could not be written to the slot.
    #[error("Failed to persist notes: {0}")]
    Persistence(#[from] SlotError),
}

impl NoteError {
    /// Returns true for errors caused by user input rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(self, NoteError::EmptyTitle)
    }
}
