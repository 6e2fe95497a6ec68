//! Plan steps and structured-output parsing

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

use crate::registry::ToolRegistry;

/// One planned tool invocation: a tool name plus keyword arguments.
///
/// Immutable once created; consumed when popped from the front of the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    pub tool_name: String,
    pub tool_kwargs: serde_json::Map<String, serde_json::Value>,
}

/// Why the planner's output could not be turned into a plan
#[derive(Error, Debug)]
pub enum PlanError {
    /// Output was not a JSON array of `{tool_name, tool_kwargs}` objects
    #[error("Malformed plan output: {0}")]
    Parse(#[from] serde_json::Error),

    /// A step referenced a tool that is not registered
    #[error("Unknown tool in plan: '{0}'")]
    UnknownTool(String),

    /// A step's arguments failed the tool's parameter schema
    #[error("Invalid arguments for tool '{tool}': {message}")]
    InvalidArguments { tool: String, message: String },
}

/// Strip markdown code fences the model may wrap its JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim().replace("```json", "").replace("```", "")
}

/// Parse and validate the planner's structured output.
///
/// Validation is strict: every step must name a registered tool, and its
/// kwargs must satisfy that tool's parameter schema. Sentinel placeholder
/// strings pass validation since they occupy string-typed arguments.
pub fn parse_plan(raw: &str, registry: &ToolRegistry) -> Result<VecDeque<PlanStep>, PlanError> {
    let cleaned = strip_code_fences(raw);
    let steps: Vec<PlanStep> = serde_json::from_str(&cleaned)?;

    for step in &steps {
        if !registry.contains(&step.tool_name) {
            return Err(PlanError::UnknownTool(step.tool_name.clone()));
        }

        if let Some(validator) = registry.validator(&step.tool_name) {
            let args = serde_json::Value::Object(step.tool_kwargs.clone());
            let errors: Vec<String> = validator.iter_errors(&args).map(|e| e.to_string()).collect();
            if !errors.is_empty() {
                return Err(PlanError::InvalidArguments {
                    tool: step.tool_name.clone(),
                    message: errors.join("; "),
                });
            }
        }
    }

    Ok(steps.into())
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
            "Searches the inbox."
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" },
                    "max_results": { "type": "integer" }
                },
                "required": ["query"]
            })
        }
        async fn execute(
            &self,
            _arguments: serde_json::Value,
            _model: Option<&dyn LanguageModel>,
        ) -> ToolResult {
            ToolResult::text("ok")
        }
    }

    fn registry() -> ToolRegistry {
        let mut r = ToolRegistry::new();
        r.register(Arc::new(SearchTool));
        r
    }

    #[test]
    fn test_strip_code_fences() {
        let raw = "```json\n[{\"tool_name\": \"x\", \"tool_kwargs\": {}}]\n```";
        let cleaned = strip_code_fences(raw);
        assert!(!cleaned.contains("```"));
        assert!(cleaned.contains("tool_name"));
    }

    #[test]
    fn test_strip_code_fences_unfenced_passthrough() {
        assert_eq!(strip_code_fences("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn test_parse_valid_plan() {
        let raw = r#"[{"tool_name": "search_emails", "tool_kwargs": {"query": "from:Alice", "max_results": 1}}]"#;
        let plan = parse_plan(raw, &registry()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].tool_name, "search_emails");
        assert_eq!(plan[0].tool_kwargs["max_results"], 1);
    }

    #[test]
    fn test_parse_fenced_plan() {
        let raw = "```json\n[{\"tool_name\": \"search_emails\", \"tool_kwargs\": {\"query\": \"is:unread\"}}]\n```";
        let plan = parse_plan(raw, &registry()).unwrap();
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_plan("not json at all", &registry()).unwrap_err();
        assert!(matches!(err, PlanError::Parse(_)));
    }

    #[test]
    fn test_parse_unknown_tool_rejected() {
        let raw = r#"[{"tool_name": "format_disk", "tool_kwargs": {}}]"#;
        let err = parse_plan(raw, &registry()).unwrap_err();
        assert!(matches!(err, PlanError::UnknownTool(name) if name == "format_disk"));
    }

    #[test]
    fn test_parse_invalid_arguments_rejected() {
        // query must be a string
        let raw = r#"[{"tool_name": "search_emails", "tool_kwargs": {"query": 5}}]"#;
        let err = parse_plan(raw, &registry()).unwrap_err();
        assert!(matches!(err, PlanError::InvalidArguments { .. }));
    }

    #[test]
    fn test_parse_empty_plan() {
        let plan = parse_plan("[]", &registry()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_sentinel_strings_pass_validation() {
        let raw = r#"[{"tool_name": "search_emails", "tool_kwargs": {"query": "<Content from previous step>"}}]"#;
        assert!(parse_plan(raw, &registry()).is_ok());
    }
}
