//! Post records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Visibility category of a post.
///
/// This store only manages public posts; the discriminator exists because
/// the bulletin domain has sibling categories with their own stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PostKind {
    /// Visible to everyone.
    #[default]
    Public,
}

/// A dated text record, as stored.
///
/// The identifier is storage-assigned; mutate rows only through
/// [`PublicPostStore`](crate::store::PublicPostStore) edit/delete calls.
/// Last write wins, there is no concurrent-modification detection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Visibility category.
    pub kind: PostKind,
    /// Posting date.
    pub date: NaiveDate,
    /// Message body.
    pub message: String,
}

/// Caller input for inserting a post; the store assigns the identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    /// Posting date.
    pub date: NaiveDate,
    /// Message body.
    pub message: String,
}

impl PostDraft {
    /// Create a draft.
    pub fn new(date: NaiveDate, message: impl Into<String>) -> Self {
        Self {
            date,
            message: message.into(),
        }
    }
}

impl Post {
    /// The draft that would reproduce this post's content.
    pub fn draft(&self) -> PostDraft {
        PostDraft::new(self.date, self.message.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
