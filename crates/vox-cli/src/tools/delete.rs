//! Email deletion tool

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use vox_agent::{LanguageModel, Tool, ToolResult};

use crate::gmail::GmailClient;

/// Tool that moves an email to trash. Trashed mail is purged after 30 days.
pub struct DeleteEmailTool {
    gmail: Arc<GmailClient>,
}

impl DeleteEmailTool {
    pub fn new(gmail: Arc<GmailClient>) -> Self {
        Self { gmail }
    }
}

#[async_trait]
impl Tool for DeleteEmailTool {
    fn name(&self) -> &str {
        "delete_email"
    }

    fn description(&self) -> &str {
        "Moves a specific email to the trash given its message ID."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "message_id": {
                    "type": "string",
                    "description": "The ID of the email to delete"
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

        match self.gmail.trash(message_id).await {
            Ok(()) => ToolResult::text(format!(
                "Email with ID {} has been moved to trash.",
                message_id
            )),
            Err(e) => ToolResult::error(format!(
                "Error: Could not delete email with ID {}. Reason: {}",
                message_id, e
            )),
        }
    }
}
