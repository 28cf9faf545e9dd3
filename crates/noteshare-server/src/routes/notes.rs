//! Note routes.
//!
//! This module implements the note HTTP endpoints:
//! - GET /api/notes?email= - List notes owned by or shared with the email
//! - POST /api/notes - Create a note
//! - PUT /api/notes/{id} - Replace a note's text
//! - DELETE /api/notes/{id} - Delete a note
//! - PUT /api/notes/{id}/share - Share a note with another email
//!
//! The requester identity travels in the query string (list) or the JSON
//! body (everything else). It is not verified.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use noteshare_core::Note;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery, NotePath};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/notes.
#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    /// Requester email.
    #[serde(default)]
    pub email: Option<String>,
}

/// The creating user, as sent by clients.
#[derive(Debug, Default, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub email: String,
}

/// Request body for POST /api/notes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    /// Note content; absent means empty.
    #[serde(default)]
    pub text: String,
    /// Owner identity.
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Emails to share with from the start.
    #[serde(default)]
    pub shared_with: Vec<String>,
}

/// Request body for PUT /api/notes/{id}.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditNoteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub requesting_user_email: String,
}

/// Request body for DELETE /api/notes/{id}.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteRequest {
    #[serde(default)]
    pub requesting_user_email: String,
}

/// Request body for PUT /api/notes/{id}/share.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareNoteRequest {
    #[serde(default)]
    pub email_to_share_with: String,
    #[serde(default)]
    pub requesting_user_email: String,
}

/// Response for edit, delete and share.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/notes - List notes visible to a requester.
///
/// # Response
///
/// - 200 OK: `[Note, ...]`
/// - 400 Bad Request: `email` missing or empty
async fn list_notes(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListNotesQuery>,
) -> ApiResult<Json<Vec<Note>>> {
    let email = query.email.unwrap_or_default();
    let notes = state.notes().list_notes_for(&email).await?;
    Ok(Json(notes))
}

/// POST /api/notes - Create a note.
///
/// # Request
///
/// Body: `{ "text": "...", "user": { "email": "a@x" }, "sharedWith": ["b@x"] }`
///
/// # Response
///
/// - 201 Created: the stored note
/// - 400 Bad Request: owner email missing
async fn create_note(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let owner = request.user.map(|user| user.email).unwrap_or_default();
    let note = state
        .notes()
        .create_note(&owner, request.text, &request.shared_with)
        .await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/notes/{id} - Replace a note's text.
///
/// # Response
///
/// - 200 OK: `{ "success": true, "message": "..." }`
/// - 400 Bad Request: `requestingUserEmail` missing
/// - 403 Forbidden: requester is neither owner nor shared
/// - 404 Not Found: no such note
async fn edit_note(
    State(state): State<AppState>,
    NotePath(note_id): NotePath,
    ApiJson(request): ApiJson<EditNoteRequest>,
) -> ApiResult<Json<ActionResponse>> {
    state
        .notes()
        .edit_note_text(note_id, &request.requesting_user_email, request.text)
        .await?;

    Ok(ActionResponse::ok("Note updated successfully"))
}

/// DELETE /api/notes/{id} - Delete a note.
///
/// # Response
///
/// - 200 OK: `{ "success": true, "message": "..." }`
/// - 400 Bad Request: `requestingUserEmail` missing
/// - 403 Forbidden: requester may not delete
/// - 404 Not Found: no such note
async fn delete_note(
    State(state): State<AppState>,
    NotePath(note_id): NotePath,
    ApiJson(request): ApiJson<DeleteNoteRequest>,
) -> ApiResult<Json<ActionResponse>> {
    state
        .notes()
        .delete_note(note_id, &request.requesting_user_email)
        .await?;

    Ok(ActionResponse::ok("Note deleted successfully"))
}

/// PUT /api/notes/{id}/share - Share a note. Owner only.
///
/// # Response
///
/// - 200 OK: `{ "success": true, "message": "Note shared with ..." }`
/// - 400 Bad Request: either email missing
/// - 403 Forbidden: requester is not the owner
/// - 404 Not Found: no such note
async fn share_note(
    State(state): State<AppState>,
    NotePath(note_id): NotePath,
    ApiJson(request): ApiJson<ShareNoteRequest>,
) -> ApiResult<Json<ActionResponse>> {
    state
        .notes()
        .share_note(
            note_id,
            &request.requesting_user_email,
            &request.email_to_share_with,
        )
        .await?;

    Ok(ActionResponse::ok(format!(
        "Note shared with {}",
        request.email_to_share_with.trim()
    )))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/{id}", put(edit_note).delete(delete_note))
        .route("/api/notes/{id}/share", put(share_note))
}
