//! Planning prompt construction

use crate::registry::ToolRegistry;
use crate::resolver::{CONTENT_SENTINEL, ID_SENTINEL};

/// Response used when the planner's output cannot be parsed into a plan
pub const CLARIFICATION_MESSAGE: &str =
    "I had trouble creating a plan for that request. Could you rephrase it?";

/// Build the planning prompt for a corrected user request.
///
/// The rules are enforced by instruction, not mechanically: the sentinels
/// must be quoted exactly for the resolver to find them later.
pub fn planning_prompt(registry: &ToolRegistry, request: &str) -> String {
    format!(
        r#"You are an expert planner for an email assistant. Your job is to create a step-by-step plan to accomplish the user's goal.
You have the following tools available:
{catalogue}

**CRITICAL RULES:**
1.  **ID Placeholder:** When a tool needs a `message_id` from a previous `search_emails` step, you MUST use the exact placeholder string: `"{id_sentinel}"`.
2.  **Content Placeholder:** When a tool needs to use text extracted by `get_email_content`, you MUST use the exact placeholder string: `"{content_sentinel}"`.
3.  **Document Logic:** If the user asks a question about the contents of an email or an attached document, the plan MUST be:
    a. `search_emails` to find the email ID.
    b. `get_email_content` using the ID.
    c. (Optional) `summarize_content` using the extracted text.
4.  **Latest Email Logic:** If the user asks for the "last" or "latest" email, you MUST set `max_results` to 1 in your `search_emails` call.

Each step is an object with "tool_name" and "tool_kwargs" fields.

User's Request: "{request}"

Return ONLY the JSON list of tool calls.
"#,
        catalogue = registry.catalogue(),
        id_sentinel = ID_SENTINEL,
        content_sentinel = CONTENT_SENTINEL,
        request = request,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LanguageModel;
    use crate::tool::{Tool, ToolResult};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct SearchTool;

    #[async_trait]
    impl Tool for SearchTool {
        fn name(&self) -> &str {
            "search_emails"
        }
        fn description(&self) -> &str {
            "Searches the inbox with a Gmail query string."
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }
        async fn execute(
            &self,
            _arguments: serde_json::Value,
            _model: Option<&dyn LanguageModel>,
        ) -> ToolResult {
            ToolResult::text("ok")
        }
    }

    #[test]
    fn test_prompt_contains_catalogue_and_sentinels() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(SearchTool));

        let prompt = planning_prompt(&registry, "find my last email");
        assert!(prompt.contains("- search_emails: Searches the inbox with a Gmail query string."));
        assert!(prompt.contains(ID_SENTINEL));
        assert!(prompt.contains(CONTENT_SENTINEL));
        assert!(prompt.contains("find my last email"));
        assert!(prompt.contains("max_results"));
    }
}
