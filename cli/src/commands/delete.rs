//! DELETE command - Delete a note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use uuid::Uuid;

use super::{ActionResponse, Session, make_request, output};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID to delete
    pub note_id: Uuid,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteNoteRequest<'a> {
    requesting_user_email: &'a str,
}

/// Execute the delete command.
pub async fn execute(session: &Session, args: DeleteArgs) -> Result<()> {
    let email = session.require_email()?;

    // Confirmation prompt for interactive use
    if session.human && !args.yes {
        eprint!(
            "{} Are you sure you want to delete note {}? [y/N] ",
            "Warning:".yellow().bold(),
            args.note_id
        );

        use std::io::Write;
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let url = session.url(&format!("/api/notes/{}", args.note_id));
    let request_body = DeleteNoteRequest {
        requesting_user_email: email,
    };

    let response: ActionResponse =
        make_request(session.client.delete(&url).json(&request_body)).await?;

    output(&response, session.human)
}
