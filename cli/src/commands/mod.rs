//! Shared plumbing for CLI commands: request execution, error decoding and
//! output formatting.

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod share;
pub mod whoami;

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Connection details shared by every command.
pub struct Session {
    pub client: reqwest::Client,
    pub base_url: String,
    pub email: Option<String>,
    pub human: bool,
}

impl Session {
    pub fn new(base_url: impl Into<String>, email: Option<String>, human: bool) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            email,
            human,
        }
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The acting user's email, as required by every note operation.
    pub fn require_email(&self) -> Result<&str> {
        match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => Ok(email),
            _ => bail!("an email is required: pass --email or set NOTESHARE_EMAIL"),
        }
    }
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Response body of edit, delete and share.
#[derive(Debug, Deserialize, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Send a request and decode the JSON response, turning server error bodies
/// into `anyhow` errors that carry the code and message.
pub async fn make_request<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| anyhow!("request failed: {}", e))?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(decode_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| anyhow!("invalid response from server: {}", e))
}

fn decode_error(status: reqwest::StatusCode, body: &str) -> anyhow::Error {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => anyhow!(
            "{} ({}): {}",
            envelope.error.code,
            status.as_u16(),
            envelope.error.message
        ),
        Err(_) if body.trim().is_empty() => anyhow!("server returned {}", status),
        Err(_) => anyhow!("server returned {}: {}", status, body.trim()),
    }
}

/// Types that know how to print themselves for a terminal.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print `value` as pretty JSON, or in human form when requested.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Trim `text` to at most `max` characters for one-line previews.
pub fn preview(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= max && first_line.len() == text.len() {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(max).collect();
    format!("{}...", cut)
}
