//! Connection pool construction.
//!
//! Stores do not open their own connections; the host builds one pool and
//! hands it to each component. The pool is safe for concurrent use by
//! independent calls.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Build a connection pool from configuration.
///
/// File-backed databases are created on first use.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    log::debug!(
        "Connecting to {} (max_connections: {})",
        config.url,
        config.max_connections
    );
    let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

// ============================================================================
// Tests
// ============================================================================
