//! Errors raised by list operations.
//!
//! None of these are fatal: the input layer turns them into a status message
//! or a bell and carries on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    /// A search found no qualifying record.
    #[error("pattern not found")]
    NotFound,
    /// An index referenced a position outside the list.
    #[error("index {index} out of range for list of {len}")]
    OutOfRange { index: usize, len: usize },
    /// The list mirrors a remote catalog and cannot be edited.
    #[error("list is read-only")]
    ReadOnly,
    /// A regular expression failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}
