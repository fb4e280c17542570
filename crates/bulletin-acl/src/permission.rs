//! Permission masks.
//!
//! A [`Permission`] is a bit mask over the five base permissions. Masks
//! combine with [`Permission::union`] and are persisted as plain integers.
//!
//! # Example
//!
//! ```rust
//! use bulletin_acl::Permission;
//!
//! let rw = Permission::READ.union(Permission::WRITE);
//! assert!(rw.contains(Permission::READ));
//! assert!(!rw.contains(Permission::ADMINISTRATION));
//! assert_eq!(Permission::from_mask(rw.mask()), rw);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A permission bit mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission {
    mask: u32,
}

impl Permission {
    /// Read access.
    pub const READ: Permission = Permission { mask: 1 << 0 };
    /// Write access.
    pub const WRITE: Permission = Permission { mask: 1 << 1 };
    /// Permission to create child objects.
    pub const CREATE: Permission = Permission { mask: 1 << 2 };
    /// Permission to delete the object.
    pub const DELETE: Permission = Permission { mask: 1 << 3 };
    /// Full administrative control, including permission management.
    pub const ADMINISTRATION: Permission = Permission { mask: 1 << 4 };

    /// The raw bit mask.
    pub fn mask(self) -> u32 {
        self.mask
    }

    /// Reconstruct a permission from a raw mask.
    pub fn from_mask(mask: u32) -> Self {
        Self { mask }
    }

    /// Combine two permissions into one mask.
    pub fn union(self, other: Permission) -> Self {
        Self {
            mask: self.mask | other.mask,
        }
    }

    /// Whether every bit of `other` is present in this mask.
    pub fn contains(self, other: Permission) -> bool {
        self.mask & other.mask == other.mask
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::READ => write!(f, "READ"),
            Self::WRITE => write!(f, "WRITE"),
            Self::CREATE => write!(f, "CREATE"),
            Self::DELETE => write!(f, "DELETE"),
            Self::ADMINISTRATION => write!(f, "ADMINISTRATION"),
            Self { mask } => write!(f, "MASK({mask:#x})"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
