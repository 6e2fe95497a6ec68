//! Tool trait and execution results

use async_trait::async_trait;
use std::sync::Arc;

use crate::model::LanguageModel;

/// Result of a tool execution.
///
/// Tools never raise: any internal failure is converted into an error
/// result so execution can continue with the next step.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Text returned to the result history
    pub text: String,
    /// Whether the execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful text result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            is_error: true,
        }
    }
}

/// Trait for executable tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (used by the planner)
    fn name(&self) -> &str;

    /// Natural-language description, used verbatim in the planning prompt
    fn description(&self) -> &str;

    /// JSON Schema for keyword arguments
    fn parameters_schema(&self) -> serde_json::Value;

    /// Whether the executor must pass the language model handle to this tool.
    ///
    /// Declared explicitly per tool; the planner never supplies the handle.
    fn requires_model(&self) -> bool {
        false
    }

    /// Execute the tool with resolved keyword arguments.
    ///
    /// `model` is `Some` exactly when `requires_model()` returns true.
    async fn execute(
        &self,
        arguments: serde_json::Value,
        model: Option<&dyn LanguageModel>,
    ) -> ToolResult;
}

/// Type alias for a shared tool
pub type BoxedTool = Arc<dyn Tool>;
