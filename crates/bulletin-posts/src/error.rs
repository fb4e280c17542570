//! Error types for bulletin-posts

use thiserror::Error;

/// Result type alias for bulletin-posts operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bulletin-posts
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from bulletin-core
    #[error("Core error: {0}")]
    Core(#[from] bulletin_core::Error),

    /// Error from the permission registry
    #[error("ACL error: {0}")]
    Acl(#[from] bulletin_acl::Error),

    /// Error from the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No post row with the given identifier
    #[error("No post with id {id}")]
    NotFound {
        /// Identifier that was looked up.
        id: i64,
    },
}
