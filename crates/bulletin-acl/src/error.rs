//! Error types for bulletin-acl

use bulletin_core::ObjectIdentity;
use thiserror::Error;

/// Result type alias for bulletin-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bulletin-acl
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from bulletin-core
    #[error("Core error: {0}")]
    Core(#[from] bulletin_core::Error),

    /// Error from the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No access-control list exists for the identity
    #[error("No ACL for {identity}")]
    NotFound {
        /// Identity that was looked up.
        identity: ObjectIdentity,
    },

    /// ACE insertion index past the end of the entry sequence
    #[error("ACE index {index} out of bounds (len {len})")]
    AceIndexOutOfBounds {
        /// Requested insertion index.
        index: usize,
        /// Current entry count.
        len: usize,
    },

    /// A persisted row could not be mapped back to a model value
    #[error("Corrupt ACL row: {0}")]
    CorruptRow(String),
}
