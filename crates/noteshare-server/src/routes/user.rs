//! Placeholder user endpoint.
//!
//! Returns the configured development identity so a front end has an email
//! to send with its requests. It performs no authentication.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

/// GET /api/user - Current (placeholder) user.
async fn current_user(State(state): State<AppState>) -> Json<UserResponse> {
    let user = &state.config().dev_user;
    Json(UserResponse {
        email: user.email.clone(),
        name: user.name.clone(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/user", get(current_user))
}
