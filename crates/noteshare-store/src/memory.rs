//! In-memory document store.
//!
//! Used when no database is configured and by the test suites. Notes live in
//! a `HashMap` behind a tokio `RwLock`; each trait call takes the lock once,
//! so every call is atomic on its own.

use std::collections::HashMap;

use async_trait::async_trait;
use noteshare_core::{Email, NewNote, Note, NoteChanges, NoteFilter, NoteId, SetField};
use tokio::sync::RwLock;

use crate::backend::DocumentStore;
use crate::error::StoreResult;

#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: RwLock<HashMap<NoteId, Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, note: NewNote) -> StoreResult<NoteId> {
        let mut notes = self.notes.write().await;
        let mut id = NoteId::new();
        while notes.contains_key(&id) {
            id = NoteId::new();
        }
        notes.insert(id, note.with_id(id));
        Ok(id)
    }

    async fn find_by_id(&self, id: NoteId) -> StoreResult<Option<Note>> {
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn find_matching(&self, filter: &NoteFilter) -> StoreResult<Vec<Note>> {
        Ok(self
            .notes
            .read()
            .await
            .values()
            .filter(|note| filter.matches(note))
            .cloned()
            .collect())
    }

    async fn update_fields(&self, id: NoteId, changes: &NoteChanges) -> StoreResult<bool> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.get_mut(&id) else {
            return Ok(false);
        };
        changes.apply(note);
        Ok(true)
    }

    async fn add_to_set_field(
        &self,
        id: NoteId,
        field: SetField,
        value: &Email,
    ) -> StoreResult<bool> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.get_mut(&id) else {
            return Ok(false);
        };
        field.add(note, value.clone());
        Ok(true)
    }

    async fn delete(&self, id: NoteId) -> StoreResult<bool> {
        Ok(self.notes.write().await.remove(&id).is_some())
    }
}
