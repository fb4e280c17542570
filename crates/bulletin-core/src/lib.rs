//! # bulletin-core
//!
//! Shared types, configuration, and errors for the Bulletin components.
//!
//! This crate has no internal Bulletin dependencies (dependency level 0):
//!
//! - [`error`]: Error types and Result alias
//! - [`identity`]: Object identities and security identities (Sids)
//! - [`config`]: TOML-backed configuration
//! - [`db`]: Connection pool construction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod db;
pub mod error;
pub mod identity;

// Re-export key types at crate root for convenience
pub use config::{AclConfig, BulletinConfig, DatabaseConfig};
pub use error::{Error, Result};
pub use identity::{ObjectIdentity, Sid};
