//! # bulletin-acl
//!
//! Access control implementation for Bulletin.
//!
//! This crate implements the per-object permission registry:
//! - Permission masks (read, write, create, delete, administration)
//! - Access-control entries and lists keyed by object identity
//! - The [`AclService`] boundary (read / create / update / ensure-and-grant)
//! - A SQLite-backed store and an in-memory store for testing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod memory;
pub mod model;
pub mod permission;
pub mod store;

pub use error::{Error, Result};
pub use memory::MemoryAclStore;
pub use model::{AccessControlEntry, AccessControlList};
pub use permission::Permission;
pub use store::{AclService, SqliteAclStore};
