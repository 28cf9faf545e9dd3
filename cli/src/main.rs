//! Command-line client for the noteshare server.
//!
//! Commands:
//! - list: List notes you own or that were shared with you
//! - create: Create a new note
//! - edit: Replace a note's text
//! - delete: Delete a note
//! - share: Share a note with another user
//! - whoami: Show the server's placeholder user
//!
//! Configuration via environment:
//! - NOTESHARE_URL: Base URL of the server (default: http://localhost:3000)
//! - NOTESHARE_EMAIL: Email of the acting user

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    Session, create::CreateArgs, delete::DeleteArgs, edit::EditArgs, list::ListArgs,
    share::ShareArgs,
};

/// noteshare CLI
///
/// Manage shared notes from the command line. Prints JSON by default,
/// or formatted text with --human.
#[derive(Parser)]
#[command(name = "noteshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// noteshare server URL
    #[arg(
        long,
        env = "NOTESHARE_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    /// Email of the acting user
    #[arg(long, env = "NOTESHARE_EMAIL", global = true)]
    email: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List accessible notes
    List(ListArgs),

    /// Create a new note
    Create(CreateArgs),

    /// Replace the text of a note
    Edit(EditArgs),

    /// Delete a note
    Delete(DeleteArgs),

    /// Share a note with another user
    Share(ShareArgs),

    /// Show the server's placeholder user
    Whoami,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let session = Session::new(cli.url, cli.email, cli.human);

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&session, args).await,
        Commands::Create(args) => commands::create::execute(&session, args).await,
        Commands::Edit(args) => commands::edit::execute(&session, args).await,
        Commands::Delete(args) => commands::delete::execute(&session, args).await,
        Commands::Share(args) => commands::share::execute(&session, args).await,
        Commands::Whoami => commands::whoami::execute(&session).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
