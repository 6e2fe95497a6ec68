//! Inbox search tool

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use vox_agent::{LanguageModel, Tool, ToolResult};

use crate::gmail::GmailClient;

/// Default number of results when the planner omits `max_results`
const DEFAULT_MAX_RESULTS: u32 = 5;

/// Tool for searching the inbox with a Gmail query string
pub struct SearchEmailsTool {
    gmail: Arc<GmailClient>,
}

impl SearchEmailsTool {
    pub fn new(gmail: Arc<GmailClient>) -> Self {
        Self { gmail }
    }
}

#[async_trait]
impl Tool for SearchEmailsTool {
    fn name(&self) -> &str {
        "search_emails"
    }

    fn description(&self) -> &str {
        "Searches the inbox with a Gmail query string. Returns matching emails as lines of 'ID: ..., From: ..., Subject: ...'."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "A Gmail search query, e.g. 'from:alice@example.com is:unread'"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of emails to return (default: 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
        _model: Option<&dyn LanguageModel>,
    ) -> ToolResult {
        let query = match arguments.get("query").and_then(|v| v.as_str()) {
            Some(q) => q,
            None => return ToolResult::error("Missing 'query' argument"),
        };

        match self.gmail.search(query, max_results_arg(&arguments)).await {
            Ok(output) => ToolResult::text(output),
            Err(e) => ToolResult::error(format!("Error executing tool: {}", e)),
        }
    }
}

/// Planner-supplied result cap; out-of-range values fall back to the default.
fn max_results_arg(arguments: &serde_json::Value) -> u32 {
    arguments
        .get("max_results")
        .and_then(|v| v.as_u64())
        .map(|v| u32::try_from(v).unwrap_or(DEFAULT_MAX_RESULTS))
        .unwrap_or(DEFAULT_MAX_RESULTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_results_defaults_when_missing() {
        assert_eq!(max_results_arg(&json!({"query": "is:unread"})), 5);
    }

    #[test]
    fn test_max_results_passes_small_values() {
        assert_eq!(max_results_arg(&json!({"max_results": 1})), 1);
    }

    #[test]
    fn test_max_results_out_of_range_falls_back_to_default() {
        assert_eq!(max_results_arg(&json!({"max_results": 5_000_000_000u64})), 5);
    }
}
