//! Agent event types

use serde::{Deserialize, Serialize};

use crate::plan::PlanStep;

/// Events emitted while a conversation cycle runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// A cycle started with raw input
    CycleStart { raw_input: String },

    /// Transcript correction finished
    InputCorrected { text: String },

    /// The planner produced a plan
    PlanCreated { steps: Vec<PlanStep> },

    /// A plan step started executing
    StepStart {
        tool_name: String,
        arguments: serde_json::Value,
    },

    /// A plan step finished
    StepEnd {
        tool_name: String,
        result: String,
        is_error: bool,
    },

    /// Response synthesis started
    Synthesizing,

    /// The final response is ready
    Response { text: String },

    /// An error was recorded on the cycle
    Error { message: String },

    /// The cycle reached its terminal state
    CycleEnd,
}

impl AgentEvent {
    /// Check if this is a terminal event
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentEvent::CycleEnd)
    }
}
