//! Per-note async locks.
//!
//! Edit, delete and share each read a note, check the requester, then write.
//! Holding a [`NoteGuard`] for the note id across those steps keeps a
//! concurrent writer on the same note from slipping in between. Different
//! notes never contend, and slots are dropped once nobody holds or waits on
//! them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use noteshare_core::NoteId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    // Holders plus waiters, including waiters whose future is still pending.
    users: usize,
}

#[derive(Debug, Default)]
pub struct NoteLocks {
    slots: Mutex<HashMap<NoteId, Slot>>,
}

impl NoteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    ///
    /// Cancelling the returned future releases the slot reservation.
    pub async fn lock(&self, id: NoteId) -> NoteGuard<'_> {
        let slot = SlotRef::reserve(self, id);
        let guard = Arc::clone(&slot.mutex).lock_owned().await;
        NoteGuard {
            _guard: guard,
            slot,
        }
    }

    /// Number of notes with a live slot.
    pub fn active(&self) -> usize {
        self.slots().len()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<NoteId, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A counted reservation on one slot, alive from the first poll of
/// [`NoteLocks::lock`] until the guard is dropped.
#[derive(Debug)]
struct SlotRef<'a> {
    locks: &'a NoteLocks,
    id: NoteId,
    mutex: Arc<AsyncMutex<()>>,
}

impl<'a> SlotRef<'a> {
    fn reserve(locks: &'a NoteLocks, id: NoteId) -> Self {
        let mut slots = locks.slots();
        let slot = slots.entry(id).or_default();
        slot.users += 1;
        Self {
            locks,
            id,
            mutex: Arc::clone(&slot.mutex),
        }
    }
}

impl Drop for SlotRef<'_> {
    fn drop(&mut self) {
        let mut slots = self.locks.slots();
        if let Some(slot) = slots.get_mut(&self.id) {
            slot.users -= 1;
            if slot.users == 0 {
                slots.remove(&self.id);
            }
        }
    }
}

/// Exclusive access to one note id. Released on drop.
#[derive(Debug)]
pub struct NoteGuard<'a> {
    // Declared first so the mutex is released before the reservation.
    _guard: OwnedMutexGuard<()>,
    slot: SlotRef<'a>,
}

impl NoteGuard<'_> {
    pub fn id(&self) -> NoteId {
        self.slot.id
    }
}
