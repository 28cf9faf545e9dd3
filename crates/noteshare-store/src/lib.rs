//! noteshare-store: Storage layer and access control for noteshare
//!
//! This crate provides:
//! - The [`DocumentStore`] collaborator contract
//! - An in-memory store ([`MemoryStore`]) and a PostgreSQL store ([`PgStore`])
//! - [`AccessControlledNoteStore`], which gates every operation behind the
//!   sharing predicates from `noteshare-core`
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use noteshare_store::{AccessControlledNoteStore, MemoryStore};
//!
//! let notes = AccessControlledNoteStore::new(Arc::new(MemoryStore::new()));
//! let note = notes.create_note("a@x", "hi", &[]).await?;
//! notes.share_note(note.id, "a@x", "b@x").await?;
//! notes.edit_note_text(note.id, "b@x", "hi2").await?;
//! ```

pub mod backend;
pub mod error;
pub mod locks;
pub mod memory;
pub mod notes;
pub mod postgres;
pub mod schema;

pub use backend::DocumentStore;
pub use error::{AccessError, AccessResult, StoreError, StoreResult};
pub use locks::{NoteGuard, NoteLocks};
pub use memory::MemoryStore;
pub use notes::{AccessControlledNoteStore, DEFAULT_STORE_TIMEOUT};
pub use postgres::{PgStore, StoreConfig};

// Re-export noteshare-core for downstream crates
pub use noteshare_core;
