//! EDIT command - Replace the text of a note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use uuid::Uuid;

use super::{ActionResponse, HumanReadable, Session, make_request, output};

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Note ID to edit
    pub note_id: Uuid,

    /// New note text
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditNoteRequest<'a> {
    text: String,
    requesting_user_email: &'a str,
}

impl HumanReadable for ActionResponse {
    fn print_human(&self) {
        if self.success {
            println!("{}", self.message.green().bold());
        } else {
            println!("{}", self.message.red().bold());
        }
    }
}

/// Execute the edit command.
pub async fn execute(session: &Session, args: EditArgs) -> Result<()> {
    let email = session.require_email()?;
    let url = session.url(&format!("/api/notes/{}", args.note_id));
    let request_body = EditNoteRequest {
        text: args.text,
        requesting_user_email: email,
    };

    let response: ActionResponse =
        make_request(session.client.put(&url).json(&request_body)).await?;

    output(&response, session.human)
}
