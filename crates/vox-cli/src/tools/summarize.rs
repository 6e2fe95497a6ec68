//! Content summarization tool

use async_trait::async_trait;
use serde_json::json;
use vox_agent::{LanguageModel, Tool, ToolResult};

use crate::utils::truncate_chars;

/// Cap on how much text is sent to the model for summarization
const MAX_SUMMARY_INPUT_CHARS: usize = 4000;

/// Tool that asks the model for a concise summary of a piece of text
pub struct SummarizeContentTool;

impl SummarizeContentTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummarizeContentTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SummarizeContentTool {
    fn name(&self) -> &str {
        "summarize_content"
    }

    fn description(&self) -> &str {
        "Produces a concise summary of a piece of email text."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to summarize"
                }
            },
            "required": ["text"]
        })
    }

    fn requires_model(&self) -> bool {
        true
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        model: Option<&dyn LanguageModel>,
    ) -> ToolResult {
        let text = match arguments.get("text").and_then(|v| v.as_str()) {
            Some(t) => t,
            None => return ToolResult::error("Missing 'text' argument"),
        };

        let Some(model) = model else {
            return ToolResult::error("Error executing tool: no model handle available");
        };

        if text.trim().is_empty() {
            return ToolResult::text("Could not extract readable content from the email.");
        }

        let prompt = format!(
            "Please provide a concise summary of the following email content:\n\n\"{}\"",
            truncate_chars(text, MAX_SUMMARY_INPUT_CHARS)
        );

        match model.complete(&prompt).await {
            Ok(summary) => ToolResult::text(format!("Summary:\n{}", summary.trim())),
            Err(e) => ToolResult::error(format!("Error executing tool: {}", e)),
        }
    }
}
