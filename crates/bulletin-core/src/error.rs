//! Error types for bulletin-core

use thiserror::Error;

/// Result type alias for bulletin-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bulletin-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Error from the database driver
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
