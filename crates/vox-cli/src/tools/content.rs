//! Email body extraction tool

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use vox_agent::{LanguageModel, Tool, ToolResult};

use crate::gmail::GmailClient;

/// Tool for fetching the plain-text body of one email
pub struct GetEmailContentTool {
    gmail: Arc<GmailClient>,
}

impl GetEmailContentTool {
    pub fn new(gmail: Arc<GmailClient>) -> Self {
        Self { gmail }
    }
}

#[async_trait]
impl Tool for GetEmailContentTool {
    fn name(&self) -> &str {
        "get_email_content"
    }

    fn description(&self) -> &str {
        "Fetches the plain-text body of a specific email given its message ID."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "message_id": {
                    "type": "string",
                    "description": "The ID of the email to fetch"
                }
            },
            "required": ["message_id"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        _model: Option<&dyn LanguageModel>,
    ) -> ToolResult {
        let message_id = match arguments.get("message_id").and_then(|v| v.as_str()) {
            Some(id) => id,
            None => return ToolResult::error("Missing 'message_id' argument"),
        };

        match self.gmail.get_body(message_id).await {
            Ok(body) if body.is_empty() => {
                ToolResult::text("Could not extract readable content from the email.")
            }
            Ok(body) => ToolResult::text(body),
            Err(e) => ToolResult::error(format!("Error executing tool: {}", e)),
        }
    }
}
