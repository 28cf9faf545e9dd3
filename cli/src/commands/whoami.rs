//! WHOAMI command - Show the server's placeholder user.

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, Session, make_request, output};

#[derive(Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

impl HumanReadable for UserResponse {
    fn print_human(&self) {
        println!("  {} {}", "Name:".cyan(), self.name.bold());
        println!("  {} {}", "Email:".cyan(), self.email);
    }
}

/// Execute the whoami command.
pub async fn execute(session: &Session) -> Result<()> {
    let response: UserResponse =
        make_request(session.client.get(session.url("/api/user"))).await?;
    output(&response, session.human)
}
