//! Bulletin — umbrella crate.
//!
//! Re-exports the Bulletin components for convenience:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bulletin::acl::SqliteAclStore;
//! use bulletin::core::{BulletinConfig, db};
//! use bulletin::posts::PublicPostStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BulletinConfig::default();
//! let pool = db::connect(&config.database).await?;
//! PublicPostStore::migrate(&pool).await?;
//! SqliteAclStore::migrate(&pool).await?;
//!
//! let acl = Arc::new(SqliteAclStore::new(pool.clone()));
//! let posts = PublicPostStore::from_config(pool, acl, &config.acl);
//! # Ok(())
//! # }
//! ```

pub use bulletin_acl as acl;
pub use bulletin_core as core;
pub use bulletin_posts as posts;
