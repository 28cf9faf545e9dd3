//! SHARE command - Share a note with another user.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use super::{ActionResponse, Session, make_request, output};

/// Arguments for the share command.
#[derive(Args)]
pub struct ShareArgs {
    /// Note ID to share
    pub note_id: Uuid,

    /// Email of the user to share with
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShareNoteRequest<'a> {
    email_to_share_with: String,
    requesting_user_email: &'a str,
}

/// Execute the share command.
pub async fn execute(session: &Session, args: ShareArgs) -> Result<()> {
    let email = session.require_email()?;
    let url = session.url(&format!("/api/notes/{}/share", args.note_id));
    let request_body = ShareNoteRequest {
        email_to_share_with: args.email,
        requesting_user_email: email,
    };

    let response: ActionResponse =
        make_request(session.client.put(&url).json(&request_body)).await?;

    output(&response, session.human)
}
