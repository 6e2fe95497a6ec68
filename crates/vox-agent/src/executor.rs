//! Plan execution: one step at a time, front to back

use tokio::sync::broadcast;

use crate::cycle::{Cycle, StepRecord};
use crate::events::AgentEvent;
use crate::model::LanguageModel;
use crate::registry::ToolRegistry;
use crate::resolver::resolve_placeholders;

/// Execute the next plan step, if any.
///
/// Placeholder resolution failures are fatal: the remaining plan is cleared
/// and the error recorded on the cycle, with no result appended. Everything
/// else — unknown tool, tool-reported failure — becomes an error entry in
/// the result history and execution continues. Every executed step appends
/// exactly one record.
pub async fn execute_next(
    cycle: &mut Cycle,
    registry: &ToolRegistry,
    model: &dyn LanguageModel,
    events: &broadcast::Sender<AgentEvent>,
) {
    let Some(mut step) = cycle.plan.pop_front() else {
        return;
    };

    if let Err(e) = resolve_placeholders(&mut step.tool_kwargs, &cycle.results) {
        tracing::warn!("Placeholder resolution failed for '{}': {}", step.tool_name, e);
        cycle.plan.clear();
        cycle.set_error(e.to_string());
        let _ = events.send(AgentEvent::Error {
            message: e.to_string(),
        });
        return;
    }

    let arguments = serde_json::Value::Object(step.tool_kwargs);

    let _ = events.send(AgentEvent::StepStart {
        tool_name: step.tool_name.clone(),
        arguments: arguments.clone(),
    });

    let result = match registry.get(&step.tool_name) {
        Some(tool) => {
            let handle = if tool.requires_model() {
                Some(model)
            } else {
                None
            };
            tool.execute(arguments, handle).await
        }
        None => crate::tool::ToolResult::error(format!(
            "Error: Tool '{}' not found.",
            step.tool_name
        )),
    };

    let _ = events.send(AgentEvent::StepEnd {
        tool_name: step.tool_name.clone(),
        result: result.text.clone(),
        is_error: result.is_error,
    });

    cycle.push_result(StepRecord::new(step.tool_name, result.text, result.is_error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanStep;
    use crate::resolver::{CONTENT_SENTINEL, ID_SENTINEL};
    use crate::tool::{Tool, ToolResult};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Replies with a canned result and counts calls.
    struct CannedTool {
        tool_name: String,
        reply: ToolResult,
        calls: Arc<AtomicU32>,
    }

    impl CannedTool {
        fn new(name: &str, reply: ToolResult) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (
                Self {
                    tool_name: name.to_string(),
                    reply,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl Tool for CannedTool {
        fn name(&self) -> &str {
            &self.tool_name
        }
        fn description(&self) -> &str {
            "Canned test tool."
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }
        async fn execute(
            &self,
            _arguments: serde_json::Value,
            _model: Option<&dyn LanguageModel>,
        ) -> ToolResult {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.reply.clone()
        }
    }

    /// Echoes the resolved arguments back as its result.
    struct EchoArgsTool;

    #[async_trait]
    impl Tool for EchoArgsTool {
        fn name(&self) -> &str {
            "echo_args"
        }
        fn description(&self) -> &str {
            "Echoes arguments."
        }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }
        async fn execute(
            &self,
            arguments: serde_json::Value,
            _model: Option<&dyn LanguageModel>,
        ) -> ToolResult {
            ToolResult::text(arguments.to_string())
        }
    }

    struct NoModel;

    #[async_trait]
    impl LanguageModel for NoModel {
        async fn complete(&self, _prompt: &str) -> vox_ai::Result<String> {
            panic!("executor tests must not call the model");
        }
    }

    fn step(name: &str, kwargs: serde_json::Value) -> PlanStep {
        PlanStep {
            tool_name: name.to_string(),
            tool_kwargs: kwargs.as_object().cloned().unwrap_or_default(),
        }
    }

    fn events() -> broadcast::Sender<AgentEvent> {
        broadcast::channel(64).0
    }

    #[tokio::test]
    async fn test_plain_plan_appends_records_in_order() {
        let mut registry = ToolRegistry::new();
        let (a, _) = CannedTool::new("tool_a", ToolResult::text("ra"));
        let (b, _) = CannedTool::new("tool_b", ToolResult::text("rb"));
        registry.register(Arc::new(a));
        registry.register(Arc::new(b));

        let mut cycle = Cycle::new("go");
        cycle.plan.push_back(step("tool_a", serde_json::json!({})));
        cycle.plan.push_back(step("tool_b", serde_json::json!({})));

        let tx = events();
        while !cycle.plan.is_empty() && cycle.error.is_none() {
            execute_next(&mut cycle, &registry, &NoModel, &tx).await;
        }

        assert_eq!(cycle.results.len(), 2);
        assert_eq!(cycle.results[0].tool, "tool_a");
        assert_eq!(cycle.results[0].result, "ra");
        assert_eq!(cycle.results[1].tool, "tool_b");
        assert_eq!(cycle.results[1].result, "rb");
        assert!(cycle.error.is_none());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_nonfatal() {
        let mut registry = ToolRegistry::new();
        let (a, calls) = CannedTool::new("tool_a", ToolResult::text("ra"));
        registry.register(Arc::new(a));

        let mut cycle = Cycle::new("go");
        cycle.plan.push_back(step("missing", serde_json::json!({})));
        cycle.plan.push_back(step("tool_a", serde_json::json!({})));

        let tx = events();
        while !cycle.plan.is_empty() && cycle.error.is_none() {
            execute_next(&mut cycle, &registry, &NoModel, &tx).await;
        }

        assert_eq!(cycle.results.len(), 2);
        assert!(cycle.results[0].is_error);
        assert_eq!(cycle.results[0].result, "Error: Tool 'missing' not found.");
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert!(cycle.error.is_none());
    }

    #[tokio::test]
    async fn test_tool_error_continues_execution() {
        let mut registry = ToolRegistry::new();
        let (bad, _) = CannedTool::new("bad", ToolResult::error("Error executing tool: boom"));
        let (good, good_calls) = CannedTool::new("good", ToolResult::text("fine"));
        registry.register(Arc::new(bad));
        registry.register(Arc::new(good));

        let mut cycle = Cycle::new("go");
        cycle.plan.push_back(step("bad", serde_json::json!({})));
        cycle.plan.push_back(step("good", serde_json::json!({})));

        let tx = events();
        while !cycle.plan.is_empty() && cycle.error.is_none() {
            execute_next(&mut cycle, &registry, &NoModel, &tx).await;
        }

        assert_eq!(cycle.results.len(), 2);
        assert!(cycle.results[0].is_error);
        assert!(!cycle.results[1].is_error);
        assert_eq!(good_calls.load(Ordering::Relaxed), 1);
        assert!(cycle.error.is_none());
    }

    #[tokio::test]
    async fn test_missing_id_placeholder_aborts_plan() {
        let mut registry = ToolRegistry::new();
        let (a, calls) = CannedTool::new("tool_a", ToolResult::text("ra"));
        registry.register(Arc::new(a));

        let mut cycle = Cycle::new("go");
        cycle.plan.push_back(step(
            "tool_a",
            serde_json::json!({"message_id": ID_SENTINEL}),
        ));
        cycle.plan.push_back(step("tool_a", serde_json::json!({})));

        let tx = events();
        while !cycle.plan.is_empty() && cycle.error.is_none() {
            execute_next(&mut cycle, &registry, &NoModel, &tx).await;
        }

        // The whole remaining plan is cleared, nothing executed, no record.
        assert!(cycle.plan.is_empty());
        assert!(cycle.results.is_empty());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(
            cycle.error.as_deref(),
            Some("Could not find a message ID from a previous step.")
        );
    }

    #[tokio::test]
    async fn test_id_resolved_from_prior_results() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoArgsTool));

        let mut cycle = Cycle::new("go");
        cycle.push_result(StepRecord::new(
            "search_emails",
            "Found emails:\nID: abc123, From: Alice, Subject: Hi",
            false,
        ));
        cycle.plan.push_back(step(
            "echo_args",
            serde_json::json!({"message_id": ID_SENTINEL}),
        ));

        let tx = events();
        execute_next(&mut cycle, &registry, &NoModel, &tx).await;

        assert_eq!(cycle.results.len(), 2);
        assert!(cycle.results[1].result.contains("abc123"));
    }

    #[tokio::test]
    async fn test_content_resolved_from_last_result_only() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoArgsTool));

        let mut cycle = Cycle::new("go");
        cycle.push_result(StepRecord::new("get_email_content", "first body", false));
        cycle.push_result(StepRecord::new("get_email_content", "second body", false));
        cycle.plan.push_back(step(
            "echo_args",
            serde_json::json!({"text": CONTENT_SENTINEL}),
        ));

        let tx = events();
        execute_next(&mut cycle, &registry, &NoModel, &tx).await;

        let last = cycle.results.last().unwrap();
        assert!(last.result.contains("second body"));
        assert!(!last.result.contains("first body"));
    }
}
