//! Error types for the tracker core.
//!
//! - [`EntryError`]: why a submitted reading was not stored
//! - [`TimestampError`]: why date/time text is not a canonical timestamp
//! - [`StorageError`]: the SQLite layer could not complete a read or write

use std::path::PathBuf;

use thiserror::Error;

/// Failure while turning raw form text into a stored reading.
#[derive(Debug, Error)]
pub enum EntryError {
    /// Date or time text does not match `MM-DD-YYYY` / `HH:MM`.
    #[error("invalid date/time '{input}': {source}")]
    Format {
        input: String,
        #[source]
        source: TimestampError,
    },

    /// Level text is not a finite floating-point number.
    #[error("invalid level '{input}'")]
    Numeric { input: String },

    /// The reading was valid but could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("date must look like MM-DD-YYYY")]
    DateShape,
    #[error("time must look like HH:MM (24-hour)")]
    TimeShape,
    #[error("no such calendar date or time of day")]
    OutOfRange,
}

/// Database errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database file could not be opened.
    #[error("failed to open database {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed.
    #[error("{operation} failed: {source}")]
    Query {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A stored key is not a canonical timestamp.
    #[error("stored timestamp '{key}' is not in MM-DD-YYYY HH:MM form")]
    Corrupt { key: String },
}

impl StorageError {
    pub(crate) fn query(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| StorageError::Query { operation, source }
    }
}
