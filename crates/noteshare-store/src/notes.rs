//! The access-controlled note store.
//!
//! Every operation validates its identity arguments, then (for mutations)
//! takes the per-note lock, loads the note, checks the requester against the
//! [`AccessPolicy`], and issues a single write. Errors surface in that order:
//! `InvalidRequest`, `NotFound`, `Unauthorized`. Store calls are bounded by a
//! timeout and their failures pass through as `StoreFailure`.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use noteshare_core::{
    AccessPolicy, Email, NewNote, Note, NoteChanges, NoteFilter, NoteId, Operation, SetField,
};

use crate::backend::DocumentStore;
use crate::error::{AccessError, AccessResult, StoreError, StoreResult};
use crate::locks::NoteLocks;

/// Default bound on a single document store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct AccessControlledNoteStore {
    backend: Arc<dyn DocumentStore>,
    locks: NoteLocks,
    policy: AccessPolicy,
    timeout: Duration,
}

impl AccessControlledNoteStore {
    /// Wrap a document store with the default policy and timeout.
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self {
            backend,
            locks: NoteLocks::new(),
            policy: AccessPolicy::default(),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    /// Get a reference to the underlying document store.
    pub fn backend(&self) -> &Arc<dyn DocumentStore> {
        &self.backend
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// All notes the requester owns or has been shared on.
    pub async fn list_notes_for(&self, requester_email: &str) -> AccessResult<Vec<Note>> {
        let requester = require_email(requester_email, "requester email")?;

        let notes = self
            .bounded(
                "find_matching",
                self.backend
                    .find_matching(&NoteFilter::AccessibleTo(requester.clone())),
            )
            .await?;

        tracing::debug!(requester = %requester, count = notes.len(), "Listed notes");
        Ok(notes)
    }

    /// Create a note owned by `owner_email`.
    ///
    /// Duplicates in `initial_shared_with` collapse and the owner is dropped
    /// from it. An empty entry is rejected.
    pub async fn create_note(
        &self,
        owner_email: &str,
        text: impl Into<String>,
        initial_shared_with: &[String],
    ) -> AccessResult<Note> {
        let owner = require_email(owner_email, "owner email")?;
        let shared_with = initial_shared_with
            .iter()
            .map(|raw| require_email(raw, "shared-with entry"))
            .collect::<AccessResult<Vec<_>>>()?;

        let new_note = NewNote::new(owner, text, shared_with);
        let id = self
            .bounded("insert", self.backend.insert(new_note.clone()))
            .await?;
        let note = new_note.with_id(id);

        tracing::info!(
            note_id = %note.id,
            owner = %note.owner_email,
            shared_count = note.shared_with.len(),
            "Note created"
        );
        Ok(note)
    }

    /// Replace the text of a note. Owner or shared addresses only.
    pub async fn edit_note_text(
        &self,
        note_id: NoteId,
        requester_email: &str,
        new_text: impl Into<String>,
    ) -> AccessResult<()> {
        let requester = require_email(requester_email, "requester email")?;
        let changes = NoteChanges::text(new_text);

        let _guard = self.locks.lock(note_id).await;
        self.authorize(note_id, &requester, Operation::Edit).await?;

        let applied = self
            .bounded("update_fields", self.backend.update_fields(note_id, &changes))
            .await?;
        if !applied {
            return Err(AccessError::NotFound(note_id));
        }

        tracing::info!(note_id = %note_id, requester = %requester, "Note text updated");
        Ok(())
    }

    /// Permanently remove a note.
    pub async fn delete_note(&self, note_id: NoteId, requester_email: &str) -> AccessResult<()> {
        let requester = require_email(requester_email, "requester email")?;

        let _guard = self.locks.lock(note_id).await;
        self.authorize(note_id, &requester, Operation::Delete).await?;

        let deleted = self
            .bounded("delete", self.backend.delete(note_id))
            .await?;
        if !deleted {
            return Err(AccessError::NotFound(note_id));
        }

        tracing::info!(note_id = %note_id, requester = %requester, "Note deleted");
        Ok(())
    }

    /// Add `target_email` to the share set. Only the owner may share.
    ///
    /// Sharing an address that is already present, or the owner's own
    /// address, succeeds without changing the note.
    pub async fn share_note(
        &self,
        note_id: NoteId,
        owner_requester_email: &str,
        target_email: &str,
    ) -> AccessResult<()> {
        let requester = require_email(owner_requester_email, "requester email")?;
        let target = require_email(target_email, "email to share with")?;

        let _guard = self.locks.lock(note_id).await;
        let note = self.authorize(note_id, &requester, Operation::Share).await?;

        if note.is_owner(&target) || note.shared_with.contains(&target) {
            tracing::debug!(note_id = %note_id, target = %target, "Share is a no-op");
            return Ok(());
        }

        let applied = self
            .bounded(
                "add_to_set_field",
                self.backend
                    .add_to_set_field(note_id, SetField::SharedWith, &target),
            )
            .await?;
        if !applied {
            return Err(AccessError::NotFound(note_id));
        }

        tracing::info!(note_id = %note_id, target = %target, "Note shared");
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Load the note and check `requester` may perform `operation` on it.
    async fn authorize(
        &self,
        note_id: NoteId,
        requester: &Email,
        operation: Operation,
    ) -> AccessResult<Note> {
        let note = self
            .bounded("find_by_id", self.backend.find_by_id(note_id))
            .await?
            .ok_or(AccessError::NotFound(note_id))?;

        let access = note.access_for(requester);
        if !self.policy.permits(operation, access) {
            tracing::warn!(
                note_id = %note_id,
                requester = %requester,
                operation = %operation,
                "Permission denied"
            );
            return Err(AccessError::Unauthorized {
                operation,
                note_id,
                requester: requester.clone(),
            });
        }

        Ok(note)
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> AccessResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(AccessError::StoreFailure),
            Err(_) => Err(AccessError::StoreFailure(StoreError::Timeout {
                operation,
                after: self.timeout,
            })),
        }
    }
}

impl fmt::Debug for AccessControlledNoteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessControlledNoteStore")
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn require_email(raw: &str, field: &str) -> AccessResult<Email> {
    Email::parse(raw).map_err(|_| AccessError::InvalidRequest(format!("{field} is required")))
}
