//! TOML-backed configuration.
//!
//! Every field has a default, so an empty document (or no file at all) yields
//! a working in-memory configuration:
//!
//! ```toml
//! [database]
//! url = "sqlite:bulletin.db"
//! max_connections = 5
//!
//! [acl]
//! admin_principal = "john"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default admin principal granted ADMINISTRATION on every new post.
pub const DEFAULT_ADMIN_PRINCIPAL: &str = "john";

/// Top-level configuration for the Bulletin components.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletinConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Access-control settings.
    pub acl: AclConfig,
}

impl BulletinConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Database connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL understood by the SQLite driver.
    pub url: String,
    /// Maximum pool size.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
        }
    }
}

/// Access-control settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Principal granted ADMINISTRATION on every successfully added post.
    pub admin_principal: String,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            admin_principal: DEFAULT_ADMIN_PRINCIPAL.to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BulletinConfig::default();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.acl.admin_principal, "john");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = BulletinConfig::from_toml_str("").unwrap();
        assert_eq!(config, BulletinConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = BulletinConfig::from_toml_str(
            r#"
            [acl]
            admin_principal = "alice"
            "#,
        )
        .unwrap();
        assert_eq!(config.acl.admin_principal, "alice");
        assert_eq!(config.database, DatabaseConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = BulletinConfig::from_toml_str(
            r#"
            [database]
            url = "sqlite:bulletin.db"
            max_connections = 12

            [acl]
            admin_principal = "ops"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.url, "sqlite:bulletin.db");
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.acl.admin_principal, "ops");
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        let result = BulletinConfig::from_toml_str("[database]\nmax_connections = \"many\"");
        assert!(result.is_err());
    }
}
