//! Error types for the note store and history log.

use std::path::PathBuf;

/// Errors raised by the line store, note repository and history log.
///
/// All variants are recoverable: the shell reports the message and keeps
/// reading commands.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("Storage failure at {}: {source}", path.display())]
    Io {
        /// File the operation was working on.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A note position outside `1..=count` was requested.
    #[error("Note number {position} not found ({count} notes stored)")]
    IndexOutOfRange {
        /// Position supplied by the caller.
        position: usize,
        /// Number of notes at the time of the call.
        count: usize,
    },

    /// Note text was empty after trimming whitespace and quotes.
    #[error("No text provided")]
    EmptyNoteText,

    /// A bulk delete was requested with an empty keyword.
    #[error("Keyword must not be empty")]
    EmptyKeyword,

    /// Note text contained a line break.
    #[error("Note text must fit on a single line")]
    MultilineText,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
