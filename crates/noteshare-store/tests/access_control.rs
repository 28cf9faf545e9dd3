//! Sharing rules exercised end to end over the in-memory store.

use std::sync::Arc;

use noteshare_core::{AccessPolicy, DeletePolicy, Email, NoteId, Operation};
use noteshare_store::{AccessControlledNoteStore, AccessError, DocumentStore, MemoryStore};

fn setup() -> (Arc<MemoryStore>, AccessControlledNoteStore) {
    let backend = Arc::new(MemoryStore::new());
    let notes = AccessControlledNoteStore::new(backend.clone());
    (backend, notes)
}

fn email(s: &str) -> Email {
    Email::parse(s).unwrap()
}

#[tokio::test]
async fn owner_share_edit_delete_scenario() {
    let (backend, notes) = setup();

    let note = notes.create_note("a@x", "hi", &[]).await.unwrap();
    assert_eq!(note.owner_email, email("a@x"));
    assert!(note.shared_with.is_empty());

    notes.share_note(note.id, "a@x", "b@x").await.unwrap();
    let stored = backend.find_by_id(note.id).await.unwrap().unwrap();
    assert_eq!(stored.shared_with.iter().collect::<Vec<_>>(), [&email("b@x")]);

    notes.edit_note_text(note.id, "b@x", "hi2").await.unwrap();
    let stored = backend.find_by_id(note.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "hi2");
    assert_eq!(stored.owner_email, email("a@x"));
    assert_eq!(stored.created_at, note.created_at);

    let err = notes.delete_note(note.id, "c@x").await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::Unauthorized {
            operation: Operation::Delete,
            ..
        }
    ));

    notes.delete_note(note.id, "b@x").await.unwrap();
    assert!(backend.find_by_id(note.id).await.unwrap().is_none());
}

#[tokio::test]
async fn created_note_is_listed_for_owner_only() {
    let (_backend, notes) = setup();
    let note = notes.create_note("a@x", "hi", &[]).await.unwrap();

    let owned = notes.list_notes_for("a@x").await.unwrap();
    assert!(owned.iter().any(|n| n.id == note.id));

    let unrelated = notes.list_notes_for("z@x").await.unwrap();
    assert!(unrelated.iter().all(|n| n.id != note.id));
}

#[tokio::test]
async fn shared_note_is_listed_for_target() {
    let (_backend, notes) = setup();
    let note = notes.create_note("a@x", "hi", &[]).await.unwrap();
    notes.share_note(note.id, "a@x", "b@x").await.unwrap();

    let listed = notes.list_notes_for("b@x").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, note.id);
}

#[tokio::test]
async fn list_requires_requester() {
    let (_backend, notes) = setup();
    assert!(matches!(
        notes.list_notes_for("").await,
        Err(AccessError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn initial_share_list_is_honoured() {
    let (_backend, notes) = setup();
    let note = notes
        .create_note(
            "a@x",
            "hi",
            &["b@x".to_string(), "b@x".to_string(), "a@x".to_string()],
        )
        .await
        .unwrap();

    assert_eq!(note.shared_with.len(), 1);
    assert!(note.shared_with.contains(&email("b@x")));
    notes.edit_note_text(note.id, "b@x", "edited").await.unwrap();
}

#[tokio::test]
async fn share_is_idempotent() {
    let (backend, notes) = setup();
    let note = notes.create_note("a@x", "hi", &[]).await.unwrap();

    notes.share_note(note.id, "a@x", "b@x").await.unwrap();
    let once = backend.find_by_id(note.id).await.unwrap().unwrap();

    notes.share_note(note.id, "a@x", "b@x").await.unwrap();
    let twice = backend.find_by_id(note.id).await.unwrap().unwrap();

    assert_eq!(once.shared_with, twice.shared_with);
}

#[tokio::test]
async fn sharing_with_owner_is_a_no_op() {
    let (backend, notes) = setup();
    let note = notes.create_note("a@x", "hi", &[]).await.unwrap();

    notes.share_note(note.id, "a@x", "a@x").await.unwrap();
    let stored = backend.find_by_id(note.id).await.unwrap().unwrap();
    assert!(stored.shared_with.is_empty());
}

#[tokio::test]
async fn share_by_shared_member_is_unauthorized() {
    let (_backend, notes) = setup();
    let note = notes
        .create_note("a@x", "hi", &["b@x".to_string()])
        .await
        .unwrap();

    let err = notes.share_note(note.id, "b@x", "c@x").await.unwrap_err();
    assert!(matches!(
        err,
        AccessError::Unauthorized {
            operation: Operation::Share,
            ..
        }
    ));
}

#[tokio::test]
async fn stranger_cannot_edit_or_delete_regardless_of_payload() {
    let (backend, notes) = setup();
    let note = notes.create_note("a@x", "hi", &[]).await.unwrap();

    for text in ["", "new text", "   "] {
        let err = notes.edit_note_text(note.id, "c@x", text).await.unwrap_err();
        assert!(matches!(err, AccessError::Unauthorized { .. }));
    }
    let err = notes.delete_note(note.id, "c@x").await.unwrap_err();
    assert!(matches!(err, AccessError::Unauthorized { .. }));

    let stored = backend.find_by_id(note.id).await.unwrap().unwrap();
    assert_eq!(stored.text, "hi");
}

#[tokio::test]
async fn unknown_note_is_not_found_for_every_operation() {
    let (_backend, notes) = setup();
    notes.create_note("a@x", "hi", &[]).await.unwrap();

    for _ in 0..5 {
        let id = NoteId::new();
        assert!(matches!(
            notes.edit_note_text(id, "a@x", "x").await,
            Err(AccessError::NotFound(missing)) if missing == id
        ));
        assert!(matches!(
            notes.delete_note(id, "c@x").await,
            Err(AccessError::NotFound(_))
        ));
        assert!(matches!(
            notes.share_note(id, "c@x", "d@x").await,
            Err(AccessError::NotFound(_))
        ));
    }
}

#[tokio::test]
async fn owner_only_delete_policy() {
    let backend = Arc::new(MemoryStore::new());
    let notes = AccessControlledNoteStore::new(backend.clone()).with_policy(AccessPolicy {
        delete: DeletePolicy::OwnerOnly,
    });
    let note = notes
        .create_note("a@x", "hi", &["b@x".to_string()])
        .await
        .unwrap();

    assert!(matches!(
        notes.delete_note(note.id, "b@x").await,
        Err(AccessError::Unauthorized { .. })
    ));
    notes.edit_note_text(note.id, "b@x", "still editable").await.unwrap();
    notes.delete_note(note.id, "a@x").await.unwrap();
    assert!(backend.is_empty().await);
}

#[tokio::test]
async fn concurrent_shares_keep_every_target() {
    let backend = Arc::new(MemoryStore::new());
    let notes = Arc::new(AccessControlledNoteStore::new(backend.clone()));
    let id = notes.create_note("a@x", "hi", &[]).await.unwrap().id;

    let mut handles = Vec::new();
    for i in 0..20 {
        let notes = Arc::clone(&notes);
        handles.push(tokio::spawn(async move {
            let target = format!("user{}@x", i % 10);
            notes.share_note(id, "a@x", &target).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = backend.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.shared_with.len(), 10);
}

#[tokio::test]
async fn concurrent_delete_and_edit_never_both_report_success_after_removal() {
    let backend = Arc::new(MemoryStore::new());
    let notes = Arc::new(AccessControlledNoteStore::new(backend.clone()));
    let id = notes
        .create_note("a@x", "hi", &["b@x".to_string()])
        .await
        .unwrap()
        .id;

    let deleter = {
        let notes = Arc::clone(&notes);
        tokio::spawn(async move { notes.delete_note(id, "a@x").await })
    };
    let editor = {
        let notes = Arc::clone(&notes);
        tokio::spawn(async move { notes.edit_note_text(id, "b@x", "hi2").await })
    };

    deleter.await.unwrap().unwrap();
    match editor.await.unwrap() {
        Ok(()) | Err(AccessError::NotFound(_)) => {}
        Err(other) => panic!("unexpected error: {other}"),
    }
    assert!(backend.find_by_id(id).await.unwrap().is_none());
}
