//! noteshare-core: Core types for the noteshare backend
//!
//! This crate provides:
//! - Note identifiers and documents
//! - Requester identity (`Email`)
//! - Field changes and filters understood by document stores
//! - The sharing predicates that decide who may touch a note
//!
//! Nothing here performs I/O. Storage and the access-controlled store live in
//! `noteshare-store`.

pub mod access;
pub mod identity;
pub mod types;

pub use access::{Access, AccessPolicy, DeletePolicy, Operation};
pub use identity::{Email, EmailError};
pub use types::{NewNote, Note, NoteChanges, NoteFilter, NoteId, SetField};
