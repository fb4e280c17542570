//! Access-control entries and lists.
//!
//! An [`AccessControlList`] is keyed by an [`ObjectIdentity`] and carries an
//! owner plus an ordered sequence of [`AccessControlEntry`] values. Entries
//! keep insertion order and are never deduplicated: granting the same
//! permission twice appends two entries.

use bulletin_core::{ObjectIdentity, Sid};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::permission::Permission;

// ============================================================================
// AccessControlEntry
// ============================================================================

/// A single grant (or deny) of a permission to a Sid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlEntry {
    /// Permission mask this entry covers.
    pub permission: Permission,
    /// Who the entry applies to.
    pub sid: Sid,
    /// `true` grants the permission, `false` denies it.
    pub granting: bool,
}

// ============================================================================
// AccessControlList
// ============================================================================

/// Ordered access-control entries plus an owner, keyed by object identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlList {
    identity: ObjectIdentity,
    owner: Option<Sid>,
    entries: Vec<AccessControlEntry>,
}

impl AccessControlList {
    /// Create an empty list (no owner, no entries) for the given identity.
    pub fn new(identity: ObjectIdentity) -> Self {
        Self {
            identity,
            owner: None,
            entries: Vec::new(),
        }
    }

    /// Reconstruct a list from persisted parts. Entry order is preserved.
    pub fn from_parts(
        identity: ObjectIdentity,
        owner: Option<Sid>,
        entries: Vec<AccessControlEntry>,
    ) -> Self {
        Self {
            identity,
            owner,
            entries,
        }
    }

    /// The identity this list is keyed by.
    pub fn identity(&self) -> &ObjectIdentity {
        &self.identity
    }

    /// The owning Sid, if one has been assigned.
    pub fn owner(&self) -> Option<&Sid> {
        self.owner.as_ref()
    }

    /// The ordered entry sequence.
    pub fn entries(&self) -> &[AccessControlEntry] {
        &self.entries
    }

    /// Insert an entry at `index`, shifting later entries back.
    ///
    /// `index` may be at most the current entry count (appending).
    pub fn insert_ace(
        &mut self,
        index: usize,
        permission: Permission,
        sid: Sid,
        granting: bool,
    ) -> Result<()> {
        if index > self.entries.len() {
            return Err(Error::AceIndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        self.entries.insert(
            index,
            AccessControlEntry {
                permission,
                sid,
                granting,
            },
        );
        Ok(())
    }

    /// Assign the list's owner.
    pub fn set_owner(&mut self, owner: Sid) {
        self.owner = Some(owner);
    }

    /// Whether any granting entry for `sid` covers `permission`.
    pub fn is_granted(&self, sid: &Sid, permission: Permission) -> bool {
        self.entries
            .iter()
            .any(|ace| ace.granting && &ace.sid == sid && ace.permission.contains(permission))
    }
}

// ============================================================================
// Tests
// ============================================================================
