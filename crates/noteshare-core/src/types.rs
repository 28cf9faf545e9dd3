//! Core data types for noteshare.
//!
//! A [`Note`] is the only entity. Stores receive a [`NewNote`] on insert and
//! assign the identifier themselves; later writes are expressed as
//! [`NoteChanges`] (field replacement) or a [`SetField`] addition.
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Email;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a note.
///
/// Wraps a UUID v4, assigned by the document store when the note is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Store-assigned identifier, immutable.
    pub id: NoteId,
    /// Free-form content.
    pub text: String,
    /// Creator identity, never changed after creation.
    pub owner_email: Email,
    /// Identities the owner has shared the note with. Never contains the owner.
    pub shared_with: BTreeSet<Email>,
    /// Creation time, immutable.
    pub created_at: DateTime<Utc>,
}

/// A note that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub text: String,
    pub owner_email: Email,
    pub shared_with: BTreeSet<Email>,
    pub created_at: DateTime<Utc>,
}

impl NewNote {
    /// Build a new note stamped with the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision stores
    /// persist, so the returned note matches what is read back later.
    ///
    /// Duplicate share entries collapse and the owner is dropped from the
    /// share set.
    pub fn new(
        owner_email: Email,
        text: impl Into<String>,
        shared_with: impl IntoIterator<Item = Email>,
    ) -> Self {
        let shared_with = shared_with
            .into_iter()
            .filter(|email| *email != owner_email)
            .collect();
        Self {
            text: text.into(),
            owner_email,
            shared_with,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    /// Attach the identifier assigned by a store.
    #[must_use]
    pub fn with_id(self, id: NoteId) -> Note {
        Note {
            id,
            text: self.text,
            owner_email: self.owner_email,
            shared_with: self.shared_with,
            created_at: self.created_at,
        }
    }
}

// ============================================================================
// Store Operations
// ============================================================================

/// Field replacements applied by `update_fields`.
///
/// Only mutable fields appear here; `id`, `owner_email` and `created_at`
/// cannot be changed through a store update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub text: Option<String>,
}

impl NoteChanges {
    /// Replace the note text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Whether no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }

    /// Apply the changes to an in-memory note.
    pub fn apply(&self, note: &mut Note) {
        if let Some(text) = &self.text {
            note.text.clone_from(text);
        }
    }
}

/// Set-valued fields that accept `add_to_set_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetField {
    SharedWith,
}

impl SetField {
    /// Adds `value` to the field on `note`. Returns true if the set grew.
    pub fn add(self, note: &mut Note, value: Email) -> bool {
        match self {
            Self::SharedWith => {
                if value == note.owner_email {
                    return false;
                }
                note.shared_with.insert(value)
            }
        }
    }
}

/// Predicate passed to `find_matching`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFilter {
    /// Notes owned by or shared with the identity.
    AccessibleTo(Email),
}

impl NoteFilter {
    /// Evaluate the filter against a note.
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Self::AccessibleTo(email) => note.can_access(email),
        }
    }
}
