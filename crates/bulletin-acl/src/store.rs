//! The permission registry boundary and its SQLite-backed store.
//!
//! [`AclService`] is the three-operation contract callers depend on
//! (read / create / update) plus [`AclService::ensure_and_grant`], the
//! upsert that post storage invokes after a successful insert. The provided
//! `ensure_and_grant` composes the three operations; [`SqliteAclStore`]
//! overrides it so the read-or-create race is settled inside one
//! transaction.
//!
//! # Schema
//!
//! ```sql
//! acl_object_identity (id, object_type, object_id, owner_kind, owner_sid)
//! acl_entry (id, acl_id, ace_order, sid_kind, sid, mask, granting)
//! ```
//!
//! Entries are read back ordered by `ace_order`; `update` rewrites the
//! entry rows of a list wholesale, preserving sequence order.

use async_trait::async_trait;
use bulletin_core::{ObjectIdentity, Sid};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::error::{Error, Result};
use crate::model::{AccessControlEntry, AccessControlList};
use crate::permission::Permission;

// ============================================================================
// AclService
// ============================================================================

/// Mutable access-control list service.
#[async_trait]
pub trait AclService: Send + Sync {
    /// Fetch the list for an identity, or [`Error::NotFound`].
    async fn read_by_identity(&self, identity: &ObjectIdentity) -> Result<AccessControlList>;

    /// Create an empty, ownerless list for an identity.
    async fn create(&self, identity: &ObjectIdentity) -> Result<AccessControlList>;

    /// Persist a list's owner and full entry sequence.
    async fn update(&self, acl: &AccessControlList) -> Result<()>;

    /// Read-or-create the list for `identity`, append a granting entry for
    /// `(sid, permission)`, make `sid` the owner, and persist.
    ///
    /// The default implementation composes the three primitive operations
    /// and is not atomic; stores may override it.
    async fn ensure_and_grant(
        &self,
        identity: &ObjectIdentity,
        sid: &Sid,
        permission: Permission,
    ) -> Result<AccessControlList> {
        let mut acl = match self.read_by_identity(identity).await {
            Ok(acl) => acl,
            Err(Error::NotFound { .. }) => self.create(identity).await?,
            Err(e) => return Err(e),
        };

        acl.insert_ace(acl.entries().len(), permission, sid.clone(), true)?;
        acl.set_owner(sid.clone());
        self.update(&acl).await?;

        log::debug!("Granted {permission} to {sid} on {identity}");
        Ok(acl)
    }
}

// ============================================================================
// SqliteAclStore
// ============================================================================

/// SQLite-backed [`AclService`].
#[derive(Clone, Debug)]
pub struct SqliteAclStore {
    pool: SqlitePool,
}

impl SqliteAclStore {
    /// Create a store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the ACL tables if they do not exist.
    pub async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS acl_object_identity (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                object_type TEXT    NOT NULL,
                object_id   INTEGER NOT NULL,
                owner_kind  TEXT,
                owner_sid   TEXT,
                UNIQUE (object_type, object_id)
            )",
        )
        .execute(pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS acl_entry (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                acl_id    INTEGER NOT NULL
                          REFERENCES acl_object_identity (id) ON DELETE CASCADE,
                ace_order INTEGER NOT NULL,
                sid_kind  TEXT    NOT NULL,
                sid       TEXT    NOT NULL,
                mask      INTEGER NOT NULL,
                granting  INTEGER NOT NULL
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Row id of the identity row, or [`Error::NotFound`].
    async fn acl_row_id<'e, E>(executor: E, identity: &ObjectIdentity) -> Result<i64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query(
            "SELECT id FROM acl_object_identity WHERE object_type = ?1 AND object_id = ?2",
        )
        .bind(&identity.domain_type)
        .bind(identity.id)
        .fetch_optional(executor)
        .await?;
        match row {
            Some(row) => Ok(row.try_get("id")?),
            None => Err(Error::NotFound {
                identity: identity.clone(),
            }),
        }
    }

    fn map_entry(row: &SqliteRow) -> Result<AccessControlEntry> {
        let kind: String = row.try_get("sid_kind")?;
        let name: String = row.try_get("sid")?;
        let sid = Sid::from_kind(&kind, &name)
            .ok_or_else(|| Error::CorruptRow(format!("unknown sid kind {kind:?}")))?;
        let mask: i64 = row.try_get("mask")?;
        Ok(AccessControlEntry {
            permission: Permission::from_mask(mask as u32),
            sid,
            granting: row.try_get("granting")?,
        })
    }

    fn map_owner(row: &SqliteRow) -> Result<Option<Sid>> {
        let kind: Option<String> = row.try_get("owner_kind")?;
        let name: Option<String> = row.try_get("owner_sid")?;
        match (kind, name) {
            (Some(kind), Some(name)) => Sid::from_kind(&kind, &name)
                .ok_or_else(|| Error::CorruptRow(format!("unknown owner kind {kind:?}")))
                .map(Some),
            (None, None) => Ok(None),
            _ => Err(Error::CorruptRow("owner kind/name half-set".to_string())),
        }
    }
}

#[async_trait]
impl AclService for SqliteAclStore {
    async fn read_by_identity(&self, identity: &ObjectIdentity) -> Result<AccessControlList> {
        let row = sqlx::query(
            "SELECT id, owner_kind, owner_sid
             FROM acl_object_identity
             WHERE object_type = ?1 AND object_id = ?2",
        )
        .bind(&identity.domain_type)
        .bind(identity.id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Err(Error::NotFound {
                identity: identity.clone(),
            });
        };

        let acl_id: i64 = row.try_get("id")?;
        let owner = Self::map_owner(&row)?;

        let entry_rows = sqlx::query(
            "SELECT sid_kind, sid, mask, granting
             FROM acl_entry
             WHERE acl_id = ?1
             ORDER BY ace_order",
        )
        .bind(acl_id)
        .fetch_all(&self.pool)
        .await?;
        let entries = entry_rows
            .iter()
            .map(Self::map_entry)
            .collect::<Result<Vec<_>>>()?;

        Ok(AccessControlList::from_parts(
            identity.clone(),
            owner,
            entries,
        ))
    }

    async fn create(&self, identity: &ObjectIdentity) -> Result<AccessControlList> {
        sqlx::query("INSERT INTO acl_object_identity (object_type, object_id) VALUES (?1, ?2)")
            .bind(&identity.domain_type)
            .bind(identity.id)
            .execute(&self.pool)
            .await?;
        log::debug!("Created ACL for {identity}");
        Ok(AccessControlList::new(identity.clone()))
    }

    async fn update(&self, acl: &AccessControlList) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let acl_id = Self::acl_row_id(&mut *tx, acl.identity()).await?;

        let (owner_kind, owner_sid) = match acl.owner() {
            Some(sid) => (Some(sid.kind()), Some(sid.name())),
            None => (None, None),
        };
        sqlx::query("UPDATE acl_object_identity SET owner_kind = ?1, owner_sid = ?2 WHERE id = ?3")
            .bind(owner_kind)
            .bind(owner_sid)
            .bind(acl_id)
            .execute(&mut *tx)
            .await?;

        // Rewrite the entry sequence wholesale; ace_order is the vec index.
        sqlx::query("DELETE FROM acl_entry WHERE acl_id = ?1")
            .bind(acl_id)
            .execute(&mut *tx)
            .await?;
        for (order, ace) in acl.entries().iter().enumerate() {
            sqlx::query(
                "INSERT INTO acl_entry (acl_id, ace_order, sid_kind, sid, mask, granting)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(acl_id)
            .bind(order as i64)
            .bind(ace.sid.kind())
            .bind(ace.sid.name())
            .bind(ace.permission.mask() as i64)
            .bind(ace.granting)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Transactional upsert: the read-or-create and the append happen under
    /// one transaction, so concurrent grants for the same identity cannot
    /// lose entries.
    async fn ensure_and_grant(
        &self,
        identity: &ObjectIdentity,
        sid: &Sid,
        permission: Permission,
    ) -> Result<AccessControlList> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT OR IGNORE INTO acl_object_identity (object_type, object_id) VALUES (?1, ?2)",
        )
        .bind(&identity.domain_type)
        .bind(identity.id)
        .execute(&mut *tx)
        .await?;
        let acl_id = Self::acl_row_id(&mut *tx, identity).await?;

        sqlx::query(
            "INSERT INTO acl_entry (acl_id, ace_order, sid_kind, sid, mask, granting)
             SELECT ?1, COALESCE(MAX(ace_order) + 1, 0), ?2, ?3, ?4, 1
             FROM acl_entry WHERE acl_id = ?1",
        )
        .bind(acl_id)
        .bind(sid.kind())
        .bind(sid.name())
        .bind(permission.mask() as i64)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE acl_object_identity SET owner_kind = ?1, owner_sid = ?2 WHERE id = ?3")
            .bind(sid.kind())
            .bind(sid.name())
            .bind(acl_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        log::debug!("Granted {permission} to {sid} on {identity}");

        self.read_by_identity(identity).await
    }
}

// ============================================================================
// Tests
// ============================================================================
