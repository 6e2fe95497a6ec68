//! Draft composition tool

use async_trait::async_trait;
use serde_json::json;
use vox_agent::{LanguageModel, Tool, ToolResult};

/// Tool that composes a draft email. It never sends anything.
pub struct DraftEmailTool;

impl DraftEmailTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DraftEmailTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for DraftEmailTool {
    fn name(&self) -> &str {
        "draft_email"
    }

    fn description(&self) -> &str {
        "Creates a draft email to a recipient with a subject and body. Does not send the email."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "recipient": {
                    "type": "string",
                    "description": "The recipient's email address"
                },
                "subject": {
                    "type": "string",
                    "description": "The subject line"
                },
                "body": {
                    "type": "string",
                    "description": "The body text of the draft"
                }
            },
            "required": ["recipient", "subject", "body"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        _model: Option<&dyn LanguageModel>,
    ) -> ToolResult {
        let recipient = arguments
            .get("recipient")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let subject = arguments
            .get("subject")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let body = arguments
            .get("body")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        if recipient.is_empty() || !recipient.contains('@') {
            return ToolResult::error("Error: A valid recipient email address is required.");
        }

        ToolResult::text(format!(
            "Draft created for {} with subject '{}'. The body is: {}",
            recipient, subject, body
        ))
    }
}
