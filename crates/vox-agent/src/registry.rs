//! Static tool registry, fixed after startup

use std::collections::HashMap;
use std::sync::Arc;

use crate::tool::BoxedTool;

/// Fixed mapping from tool name to tool, plus compiled argument validators.
///
/// Built once in `main` and passed into the agent; never mutated afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<BoxedTool>,
    validators: HashMap<String, Arc<jsonschema::Validator>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, compiling its parameter schema validator.
    pub fn register(&mut self, tool: BoxedTool) {
        let schema = tool.parameters_schema();
        match jsonschema::validator_for(&schema) {
            Ok(validator) => {
                self.validators
                    .insert(tool.name().to_string(), Arc::new(validator));
            }
            Err(e) => {
                tracing::warn!(
                    "Invalid parameter schema for tool '{}', skipping validation: {}",
                    tool.name(),
                    e
                );
            }
        }
        self.tools.push(tool);
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&BoxedTool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Whether a tool with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The compiled argument validator for a tool, if its schema compiled
    pub fn validator(&self, name: &str) -> Option<&Arc<jsonschema::Validator>> {
        self.validators.get(name)
    }

    /// Registered tool names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Render the tool catalogue for the planning prompt: one
    /// `- name: description` line per tool.
    pub fn catalogue(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("- {}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
