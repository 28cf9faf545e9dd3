//! Sharing predicates.
//!
//! Two rules decide every permission check:
//!
//! - `can_access(note, email)`: the email is the owner or is in `shared_with`.
//!   Gates listing, editing and (by default) deleting.
//! - `is_owner(note, email)`: the email is the owner. Gates sharing.
//!
//! [`AccessPolicy`] maps each [`Operation`] onto one of those rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::identity::Email;
use crate::types::Note;

/// Relationship between a requester and a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Owner,
    Shared,
    None,
}

impl Note {
    /// Classify `email` against this note.
    #[must_use]
    pub fn access_for(&self, email: &Email) -> Access {
        if self.owner_email == *email {
            Access::Owner
        } else if self.shared_with.contains(email) {
            Access::Shared
        } else {
            Access::None
        }
    }

    /// Owner or shared.
    #[must_use]
    pub fn can_access(&self, email: &Email) -> bool {
        self.access_for(email) != Access::None
    }

    #[must_use]
    pub fn is_owner(&self, email: &Email) -> bool {
        self.owner_email == *email
    }
}

/// Operations that are checked against an existing note.
///
/// Listing filters by [`Note::can_access`] directly and creation has no note
/// to check, so neither appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Edit,
    Delete,
    Share,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Share => "share",
        };
        f.write_str(name)
    }
}

/// Who may delete a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Owner or any shared address.
    #[default]
    OwnerOrShared,
    /// Owner only, matching the share rule.
    OwnerOnly,
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "owner-or-shared" | "shared" => Ok(Self::OwnerOrShared),
            "owner-only" | "owner" => Ok(Self::OwnerOnly),
            other => Err(format!(
                "expected \"owner-or-shared\" or \"owner-only\", got \"{other}\""
            )),
        }
    }
}

/// Maps operations to the access they require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    pub delete: DeletePolicy,
}

impl AccessPolicy {
    /// Whether a requester with `access` may perform `operation`.
    #[must_use]
    pub fn permits(&self, operation: Operation, access: Access) -> bool {
        match operation {
            Operation::Edit => access != Access::None,
            Operation::Share => access == Access::Owner,
            Operation::Delete => match self.delete {
                DeletePolicy::OwnerOrShared => access != Access::None,
                DeletePolicy::OwnerOnly => access == Access::Owner,
            },
        }
    }
}
