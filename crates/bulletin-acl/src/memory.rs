//! In-memory [`AclService`] for tests and hosts without ACL persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bulletin_core::ObjectIdentity;

use crate::error::{Error, Result};
use crate::model::AccessControlList;
use crate::store::AclService;

/// Map-backed ACL store. Uses the trait's default `ensure_and_grant`.
#[derive(Debug, Default)]
pub struct MemoryAclStore {
    lists: Mutex<HashMap<ObjectIdentity, AccessControlList>>,
}

impl MemoryAclStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists held.
    pub fn len(&self) -> usize {
        self.lists.lock().expect("acl map poisoned").len()
    }

    /// Whether the store holds no lists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AclService for MemoryAclStore {
    async fn read_by_identity(&self, identity: &ObjectIdentity) -> Result<AccessControlList> {
        self.lists
            .lock()
            .expect("acl map poisoned")
            .get(identity)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                identity: identity.clone(),
            })
    }

    async fn create(&self, identity: &ObjectIdentity) -> Result<AccessControlList> {
        let acl = AccessControlList::new(identity.clone());
        self.lists
            .lock()
            .expect("acl map poisoned")
            .insert(identity.clone(), acl.clone());
        Ok(acl)
    }

    async fn update(&self, acl: &AccessControlList) -> Result<()> {
        let mut lists = self.lists.lock().expect("acl map poisoned");
        if !lists.contains_key(acl.identity()) {
            return Err(Error::NotFound {
                identity: acl.identity().clone(),
            });
        }
        lists.insert(acl.identity().clone(), acl.clone());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use bulletin_core::Sid;

    use super::*;
    use crate::permission::Permission;

    #[tokio::test]
    async fn test_default_ensure_and_grant_path() {
        let store = MemoryAclStore::new();
        let oid = ObjectIdentity::post(1);
        let john = Sid::principal("john");

        assert!(store.is_empty());
        let acl = store
            .ensure_and_grant(&oid, &john, Permission::ADMINISTRATION)
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(acl.owner(), Some(&john));
        assert_eq!(acl.entries().len(), 1);

        // Second grant appends to the existing list instead of recreating it.
        let acl = store
            .ensure_and_grant(&oid, &john, Permission::READ)
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(acl.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = MemoryAclStore::new();
        let acl = AccessControlList::new(ObjectIdentity::post(9));
        assert!(matches!(
            store.update(&acl).await.unwrap_err(),
            Error::NotFound { .. }
        ));
    }
}
