//! The document store collaborator.
//!
//! [`AccessControlledNoteStore`](crate::AccessControlledNoteStore) never talks
//! to a database directly; it drives one of these. Implementations must make
//! each individual call atomic for the row it touches. Read-check-write
//! sequences across calls are serialized by the caller.

use async_trait::async_trait;
use noteshare_core::{Email, NewNote, Note, NoteChanges, NoteFilter, NoteId, SetField};

use crate::error::StoreResult;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a new note and return the identifier the store assigned.
    async fn insert(&self, note: NewNote) -> StoreResult<NoteId>;

    async fn find_by_id(&self, id: NoteId) -> StoreResult<Option<Note>>;

    /// All notes matching `filter`, in store order.
    async fn find_matching(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>>;

    /// Replace fields on a note. Returns false if the id is absent.
    async fn update_fields(&self, id: NoteId, changes: &NoteChanges) -> StoreResult<bool>;

    /// Add `value` to a set-valued field if not already present.
    ///
    /// Returns false only if the id is absent; an existing value still counts
    /// as applied.
    async fn add_to_set_field(
        &self,
        id: NoteId,
        field: SetField,
        value: &Email,
    ) -> StoreResult<bool>;

    /// Remove a note. Returns false if the id is absent.
    async fn delete(&self, id: NoteId) -> StoreResult<bool>;
}
