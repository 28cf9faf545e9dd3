//! LIST command - List notes the user owns or has been shared.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{HumanReadable, Session, format_timestamp, make_request, output, preview};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Show full note text instead of a one-line preview
    #[arg(long)]
    pub full: bool,
}

/// A note as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: Uuid,
    pub text: String,
    pub owner_email: String,
    #[serde(default)]
    pub shared_with: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Notes visible to one user, printed relative to that user.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct NoteListing {
    pub notes: Vec<NoteView>,
    #[serde(skip)]
    pub viewer: String,
    #[serde(skip)]
    pub full: bool,
}

impl HumanReadable for NoteListing {
    fn print_human(&self) {
        println!("{}", "Accessible Notes".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes accessible)".dimmed());
            return;
        }

        for note in &self.notes {
            let owner_indicator = if note.owner_email == self.viewer {
                "*".yellow()
            } else {
                " ".normal()
            };
            let text = if self.full {
                note.text.clone()
            } else {
                preview(&note.text, 60)
            };

            println!("  {} {}", owner_indicator, text.bold());
            println!("    {} {}", "ID:".cyan(), note.id);
            println!("    {} {}", "Owner:".cyan(), note.owner_email);
            if !note.shared_with.is_empty() {
                println!("    {} {}", "Shared:".cyan(), note.shared_with.join(", "));
            }
            println!(
                "    {} {}",
                "Created:".cyan(),
                format_timestamp(&note.created_at)
            );
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notes.len());
        println!();
        println!("  {}", "* = You are the owner".dimmed());
    }
}

/// Execute the list command.
pub async fn execute(session: &Session, args: ListArgs) -> Result<()> {
    let email = session.require_email()?;
    let request = session
        .client
        .get(session.url("/api/notes"))
        .query(&[("email", email)]);

    let notes: Vec<NoteView> = make_request(request).await?;
    let listing = NoteListing {
        notes,
        viewer: email.to_string(),
        full: args.full,
    };

    output(&listing, session.human)
}
