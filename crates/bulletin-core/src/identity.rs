//! Object identities and security identities.
//!
//! An [`ObjectIdentity`] names a domain object for access control: a
//! (domain type, id) pair. A [`Sid`] names who is being granted access:
//! either an individual principal or a role-style authority.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain type used for post object identities.
pub const POST_TYPE: &str = "post";

// ============================================================================
// ObjectIdentity
// ============================================================================

/// Identity of a domain object, the key an access-control list hangs off.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentity {
    /// Domain type discriminator (e.g. `"post"`).
    pub domain_type: String,
    /// Storage-assigned identifier within the domain type.
    pub id: i64,
}

impl ObjectIdentity {
    /// Create an identity for an arbitrary domain type.
    pub fn new(domain_type: impl Into<String>, id: i64) -> Self {
        Self {
            domain_type: domain_type.into(),
            id,
        }
    }

    /// Create an identity for a post.
    pub fn post(id: i64) -> Self {
        Self::new(POST_TYPE, id)
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.domain_type, self.id)
    }
}

// ============================================================================
// Sid
// ============================================================================

/// A security identity: who a permission is granted to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Sid {
    /// An individual, named user.
    Principal(String),
    /// A role or authority group (e.g. `ROLE_ADMIN`).
    Authority(String),
}

impl Sid {
    /// Create a principal Sid.
    pub fn principal(name: impl Into<String>) -> Self {
        Self::Principal(name.into())
    }

    /// Create an authority Sid.
    pub fn authority(name: impl Into<String>) -> Self {
        Self::Authority(name.into())
    }

    /// The principal or authority name.
    pub fn name(&self) -> &str {
        match self {
            Self::Principal(name) | Self::Authority(name) => name,
        }
    }

    /// Stable kind tag used by persistence layers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Principal(_) => "principal",
            Self::Authority(_) => "authority",
        }
    }

    /// Reconstruct a Sid from its persisted (kind, name) pair.
    ///
    /// Returns `None` for an unrecognized kind tag.
    pub fn from_kind(kind: &str, name: &str) -> Option<Self> {
        match kind {
            "principal" => Some(Self::principal(name)),
            "authority" => Some(Self::authority(name)),
            _ => None,
        }
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Principal(name) => write!(f, "principal[{name}]"),
            Self::Authority(name) => write!(f, "authority[{name}]"),
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
    fn test_object_identity_post() {
        let oid = ObjectIdentity::post(42);
        assert_eq!(oid.domain_type, POST_TYPE);
        assert_eq!(oid.id, 42);
        assert_eq!(oid.to_string(), "post:42");
    }

    #[test]
    fn test_object_identity_equality() {
        assert_eq!(ObjectIdentity::post(1), ObjectIdentity::new("post", 1));
        assert_ne!(ObjectIdentity::post(1), ObjectIdentity::post(2));
        assert_ne!(ObjectIdentity::post(1), ObjectIdentity::new("comment", 1));
    }

    #[test]
    fn test_sid_accessors() {
        let john = Sid::principal("john");
        assert_eq!(john.name(), "john");
        assert_eq!(john.kind(), "principal");
        assert_eq!(john.to_string(), "principal[john]");

        let admins = Sid::authority("ROLE_ADMIN");
        assert_eq!(admins.name(), "ROLE_ADMIN");
        assert_eq!(admins.kind(), "authority");
        assert_eq!(admins.to_string(), "authority[ROLE_ADMIN]");
    }

    #[test]
    fn test_sid_from_kind_roundtrip() {
        for sid in [Sid::principal("john"), Sid::authority("ROLE_USER")] {
            assert_eq!(Sid::from_kind(sid.kind(), sid.name()), Some(sid.clone()));
        }
        assert_eq!(Sid::from_kind("robot", "r2d2"), None);
    }
}
