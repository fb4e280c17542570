//! # bulletin-posts
//!
//! Public post storage for Bulletin.
//!
//! [`PublicPostStore`] runs one parameterized SQL statement per operation
//! against the `public_post` table and, on successful insert, grants
//! administrative permission on the new post to a configured principal via
//! the [`bulletin_acl::AclService`] boundary.
//!
//! Two API surfaces:
//! - the typed `try_*` methods return [`Result`] with the real cause;
//! - the flattened methods (`get_single`, `get_all`, `add`, `edit`,
//!   `delete`) log the cause and collapse every failure to an absent or
//!   `false` value.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use model::{Post, PostDraft, PostKind};
pub use store::PublicPostStore;
