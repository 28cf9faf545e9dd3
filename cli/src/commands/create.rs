//! CREATE command - Create a new note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::list::NoteView;
use super::{HumanReadable, Session, format_timestamp, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note text
    pub text: String,

    /// Email to share the note with (repeatable)
    #[arg(long = "share", value_name = "EMAIL")]
    pub share: Vec<String>,
}

#[derive(Serialize)]
struct UserRef<'a> {
    email: &'a str,
}

/// Request body for creating a note.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateNoteRequest<'a> {
    text: String,
    user: UserRef<'a>,
    shared_with: Vec<String>,
}

impl HumanReadable for NoteView {
    fn print_human(&self) {
        println!("{}", "Note created successfully!".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Owner:".cyan(), self.owner_email);
        if !self.shared_with.is_empty() {
            println!("  {} {}", "Shared:".cyan(), self.shared_with.join(", "));
        }
        println!(
            "  {} {}",
            "Created:".cyan(),
            format_timestamp(&self.created_at)
        );
    }
}

/// Execute the create command.
pub async fn execute(session: &Session, args: CreateArgs) -> Result<()> {
    let email = session.require_email()?;
    let request_body = CreateNoteRequest {
        text: args.text,
        user: UserRef { email },
        shared_with: args.share,
    };

    let response: NoteView = make_request(
        session
            .client
            .post(session.url("/api/notes"))
            .json(&request_body),
    )
    .await?;

    output(&response, session.human)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_server_field_names() {
        let body = CreateNoteRequest {
            text: "hi".into(),
            user: UserRef { email: "a@x" },
            shared_with: vec!["b@x".into()],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "hi", "user": { "email": "a@x" }, "sharedWith": ["b@x"] })
        );
    }
}
