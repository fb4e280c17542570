//! The `public_post` store.
//!
//! Every operation issues a single parameterized statement. The typed
//! `try_*` methods surface the failure cause; the flattened methods keep
//! the legacy contract where a caller only ever sees success or failure
//! and the cause goes to the log sink.

use std::sync::Arc;

use bulletin_acl::{AclService, Permission};
use bulletin_core::{AclConfig, ObjectIdentity, Sid};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::error::{Error, Result};
use crate::model::{Post, PostDraft, PostKind};

/// Store for public posts.
///
/// Cheap to clone; the pool and the ACL service are shared handles.
#[derive(Clone)]
pub struct PublicPostStore {
    pool: SqlitePool,
    acl: Arc<dyn AclService>,
    admin: Sid,
}

impl PublicPostStore {
    /// Create a store granting new-post administration to `admin`.
    pub fn new(pool: SqlitePool, acl: Arc<dyn AclService>, admin: Sid) -> Self {
        Self { pool, acl, admin }
    }

    /// Create a store with the admin principal taken from configuration.
    pub fn from_config(pool: SqlitePool, acl: Arc<dyn AclService>, config: &AclConfig) -> Self {
        Self::new(pool, acl, Sid::principal(&config.admin_principal))
    }

    /// Create the `public_post` table if it does not exist.
    pub async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS public_post (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                date    DATE NOT NULL,
                message TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    /// The Sid granted ADMINISTRATION on every successful add.
    pub fn admin(&self) -> &Sid {
        &self.admin
    }

    fn map_row(row: &SqliteRow) -> Result<Post> {
        Ok(Post {
            id: row.try_get("id")?,
            kind: PostKind::Public,
            date: row.try_get("date")?,
            message: row.try_get("message")?,
        })
    }

    // ------------------------------------------------------------------------
    // Typed API
    // ------------------------------------------------------------------------

    /// Fetch one post by identifier.
    pub async fn try_get_single(&self, id: i64) -> Result<Post> {
        log::debug!("Retrieving single public post {id}");
        let row = sqlx::query("SELECT id, date, message FROM public_post WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Self::map_row(&row),
            None => Err(Error::NotFound { id }),
        }
    }

    /// Fetch every post, in whatever order the store returns rows.
    pub async fn try_get_all(&self) -> Result<Vec<Post>> {
        log::debug!("Retrieving all public posts");
        let rows = sqlx::query("SELECT id, date, message FROM public_post")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::map_row).collect()
    }

    /// Insert a post and grant ADMINISTRATION on it to the admin principal.
    ///
    /// Returns the stored post with its assigned identifier. A grant
    /// failure fails the whole call; the inserted row is not rolled back
    /// here beyond whatever the environment's transaction wrapping does.
    pub async fn try_add(&self, draft: &PostDraft) -> Result<Post> {
        log::debug!("Adding new post");
        let result = sqlx::query("INSERT INTO public_post (date, message) VALUES (?1, ?2)")
            .bind(draft.date)
            .bind(&draft.message)
            .execute(&self.pool)
            .await?;
        let id = result.last_insert_rowid();

        self.acl
            .ensure_and_grant(
                &ObjectIdentity::post(id),
                &self.admin,
                Permission::ADMINISTRATION,
            )
            .await?;

        Ok(Post {
            id,
            kind: PostKind::Public,
            date: draft.date,
            message: draft.message.clone(),
        })
    }

    /// Update date and message of the row matching `post.id`.
    ///
    /// Permissions are not touched. Targeting a missing identifier is
    /// [`Error::NotFound`].
    pub async fn try_edit(&self, post: &Post) -> Result<()> {
        log::debug!("Updating post {}", post.id);
        let result =
            sqlx::query("UPDATE public_post SET date = ?1, message = ?2 WHERE id = ?3")
                .bind(post.date)
                .bind(&post.message)
                .bind(post.id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound { id: post.id });
        }
        Ok(())
    }

    /// Remove the row matching `id`.
    ///
    /// Any ACL for the post is left behind; this store never deletes lists.
    pub async fn try_delete(&self, id: i64) -> Result<()> {
        log::debug!("Deleting post {id}");
        let result = sqlx::query("DELETE FROM public_post WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound { id });
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Flattened facade
    // ------------------------------------------------------------------------

    /// Fetch one post; absent on any failure, including "no such row".
    pub async fn get_single(&self, id: i64) -> Option<Post> {
        match self.try_get_single(id).await {
            Ok(post) => Some(post),
            Err(e) => {
                log::error!("Retrieving post {id} failed: {e}");
                None
            }
        }
    }

    /// Fetch every post; empty on any failure.
    pub async fn get_all(&self) -> Vec<Post> {
        match self.try_get_all().await {
            Ok(posts) => posts,
            Err(e) => {
                log::error!("Retrieving posts failed: {e}");
                Vec::new()
            }
        }
    }

    /// Insert a post; `false` on any failure (insert or grant).
    pub async fn add(&self, draft: &PostDraft) -> bool {
        match self.try_add(draft).await {
            Ok(_) => true,
            Err(e) => {
                log::error!("Adding post failed: {e}");
                false
            }
        }
    }

    /// Update a post; `false` on any failure.
    pub async fn edit(&self, post: &Post) -> bool {
        match self.try_edit(post).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Updating post {} failed: {e}", post.id);
                false
            }
        }
    }

    /// Delete a post; `false` on any failure.
    pub async fn delete(&self, id: i64) -> bool {
        match self.try_delete(id).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Deleting post {id} failed: {e}");
                false
            }
        }
    }
}

impl std::fmt::Debug for PublicPostStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicPostStore")
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use bulletin_acl::MemoryAclStore;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn store() -> (PublicPostStore, Arc<MemoryAclStore>) {
        // A single connection keeps every query on the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        PublicPostStore::migrate(&pool).await.unwrap();
        let acl = Arc::new(MemoryAclStore::new());
        let store = PublicPostStore::new(pool, acl.clone(), Sid::principal("john"));
        (store, acl)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_add_then_get_single() {
        let (store, _) = store().await;
        let draft = PostDraft::new(date(2024, 1, 1), "hello");

        let added = store.try_add(&draft).await.unwrap();
        let read = store.try_get_single(added.id).await.unwrap();
        assert_eq!(read, added);
        assert_eq!(read.kind, PostKind::Public);
        assert_eq!(read.date, draft.date);
        assert_eq!(read.message, "hello");
    }

    #[tokio::test]
    async fn test_add_grants_administration_to_admin() {
        let (store, acl) = store().await;
        let added = store
            .try_add(&PostDraft::new(date(2024, 1, 1), "hello"))
            .await
            .unwrap();

        let list = acl
            .read_by_identity(&ObjectIdentity::post(added.id))
            .await
            .unwrap();
        assert_eq!(list.owner(), Some(&Sid::principal("john")));
        assert!(list.is_granted(&Sid::principal("john"), Permission::ADMINISTRATION));
    }

    #[tokio::test]
    async fn test_get_all_contains_every_added_post() {
        let (store, _) = store().await;
        let mut ids = Vec::new();
        for i in 0..4 {
            let added = store
                .try_add(&PostDraft::new(date(2024, 1, 1 + i), format!("post {i}")))
                .await
                .unwrap();
            ids.push(added.id);
        }

        let all = store.try_get_all().await.unwrap();
        assert_eq!(all.len(), 4);
        for id in ids {
            assert!(all.iter().any(|p| p.id == id));
        }
    }

    #[tokio::test]
    async fn test_edit_changes_only_the_target_row() {
        let (store, _) = store().await;
        let keep = store
            .try_add(&PostDraft::new(date(2024, 1, 1), "keep"))
            .await
            .unwrap();
        let mut change = store
            .try_add(&PostDraft::new(date(2024, 1, 2), "change"))
            .await
            .unwrap();

        change.date = date(2024, 2, 1);
        change.message = "changed".to_string();
        store.try_edit(&change).await.unwrap();

        assert_eq!(store.try_get_single(change.id).await.unwrap(), change);
        assert_eq!(store.try_get_single(keep.id).await.unwrap(), keep);
    }

    #[tokio::test]
    async fn test_edit_missing_is_not_found() {
        let (store, _) = store().await;
        let ghost = Post {
            id: 404,
            kind: PostKind::Public,
            date: date(2024, 1, 1),
            message: "ghost".to_string(),
        };
        assert!(matches!(
            store.try_edit(&ghost).await.unwrap_err(),
            Error::NotFound { id: 404 }
        ));
        assert!(!store.edit(&ghost).await);
    }

    #[tokio::test]
    async fn test_delete_then_get_single_is_absent() {
        let (store, _) = store().await;
        let added = store
            .try_add(&PostDraft::new(date(2024, 1, 1), "bye"))
            .await
            .unwrap();

        store.try_delete(added.id).await.unwrap();
        assert!(matches!(
            store.try_get_single(added.id).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        assert!(store.get_single(added.id).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_leaves_the_acl_behind() {
        let (store, acl) = store().await;
        let added = store
            .try_add(&PostDraft::new(date(2024, 1, 1), "orphan"))
            .await
            .unwrap();
        store.try_delete(added.id).await.unwrap();

        // Grants happen only on add, so the list survives its post.
        let list = acl
            .read_by_identity(&ObjectIdentity::post(added.id))
            .await
            .unwrap();
        assert_eq!(list.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (store, _) = store().await;
        assert!(matches!(
            store.try_delete(404).await.unwrap_err(),
            Error::NotFound { id: 404 }
        ));
        assert!(!store.delete(404).await);
    }

    #[tokio::test]
    async fn test_facade_flattens_failures() {
        let (store, _) = store().await;
        store.pool.close().await;

        assert!(store.get_single(1).await.is_none());
        assert!(store.get_all().await.is_empty());
        assert!(!store.add(&PostDraft::new(date(2024, 1, 1), "x")).await);
        assert!(!store.delete(1).await);
    }

    #[tokio::test]
    async fn test_from_config_uses_configured_principal() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let config = AclConfig {
            admin_principal: "alice".to_string(),
        };
        let store =
            PublicPostStore::from_config(pool, Arc::new(MemoryAclStore::new()), &config);
        assert_eq!(store.admin(), &Sid::principal("alice"));
    }
}
