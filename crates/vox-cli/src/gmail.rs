//! Gmail REST API client
//!
//! Thin wrapper over `https://gmail.googleapis.com/gmail/v1/users/me` with a
//! bearer access token. Only the three operations the tools need: search,
//! fetch one message's plain-text body, and move a message to trash.

use base64::Engine as _;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use serde::Deserialize;
use thiserror::Error;

const GMAIL_BASE_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Errors from the Gmail backend
#[derive(Error, Debug)]
pub enum GmailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gmail API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

type Result<T> = std::result::Result<T, GmailError>;

/// Authenticated Gmail client
pub struct GmailClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl GmailClient {
    /// Create a client with an OAuth access token carrying a mail scope
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            base_url: GMAIL_BASE_URL.to_string(),
        }
    }

    /// Search the inbox and render results with the `ID:` marker the
    /// placeholder resolver keys on.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<String> {
        let url = format!("{}/messages", self.base_url);
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("q", query), ("maxResults", max_results.as_str())])
            .send()
            .await?;
        let listing: MessageList = check(response).await?.json().await?;

        if listing.messages.is_empty() {
            return Ok(format!("No emails found matching query: '{}'.", query));
        }

        let mut lines = Vec::new();
        for summary in &listing.messages {
            let message = self.get_metadata(&summary.id).await?;
            let sender = message.header("From").unwrap_or("Unknown Sender");
            let subject = message.header("Subject").unwrap_or("No Subject");
            lines.push(format!(
                "ID: {}, From: {}, Subject: {}",
                summary.id, sender, subject
            ));
        }

        Ok(format!("Found emails:\n{}", lines.join("\n")))
    }

    /// Fetch the plain-text body of one message
    pub async fn get_body(&self, message_id: &str) -> Result<String> {
        let url = format!("{}/messages/{}", self.base_url, message_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("format", "full")])
            .send()
            .await?;
        let message: GmailMessage = check(response).await?.json().await?;

        Ok(message
            .payload
            .as_ref()
            .map(extract_body)
            .unwrap_or_default())
    }

    /// Move a message to trash
    pub async fn trash(&self, message_id: &str) -> Result<()> {
        let url = format!("{}/messages/{}/trash", self.base_url, message_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn get_metadata(&self, message_id: &str) -> Result<GmailMessage> {
        let url = format!("{}/messages/{}", self.base_url, message_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("format", "metadata"),
                ("metadataHeaders", "From"),
                ("metadataHeaders", "Subject"),
            ])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Turn a non-success response into a `GmailError::Api`
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(GmailError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Recursively extract the text/plain body from a message payload,
/// collapsing all whitespace runs into single spaces.
fn extract_body(payload: &MessagePart) -> String {
    let mut body = String::new();
    collect_plain_text(payload, &mut body);
    body.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_plain_text(part: &MessagePart, out: &mut String) {
    if !part.parts.is_empty() {
        for child in &part.parts {
            if child.mime_type.as_deref() == Some("text/plain") {
                if let Some(data) = child.body.as_ref().and_then(|b| b.data.as_deref()) {
                    out.push_str(&decode_body_data(data));
                }
            } else if !child.parts.is_empty() {
                collect_plain_text(child, out);
            }
        }
    } else if part.mime_type.as_deref() == Some("text/plain") {
        if let Some(data) = part.body.as_ref().and_then(|b| b.data.as_deref()) {
            out.push_str(&decode_body_data(data));
        }
    }
}

/// Gmail body data is base64url, sometimes unpadded.
fn decode_body_data(data: &str) -> String {
    let bytes = URL_SAFE
        .decode(data)
        .or_else(|_| URL_SAFE_NO_PAD.decode(data))
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct MessageList {
    #[serde(default)]
    messages: Vec<MessageSummary>,
}

#[derive(Debug, Deserialize)]
struct MessageSummary {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GmailMessage {
    payload: Option<MessagePart>,
}

impl GmailMessage {
    /// Case-insensitive header lookup
    fn header(&self, name: &str) -> Option<&str> {
        self.payload.as_ref().and_then(|p| {
            p.headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name))
                .map(|h| h.value.as_str())
        })
    }
}

#[derive(Debug, Deserialize)]
struct MessagePart {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    #[serde(default)]
    headers: Vec<Header>,
    body: Option<MessageBody>,
    #[serde(default)]
    parts: Vec<MessagePart>,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    data: Option<String>,
}
