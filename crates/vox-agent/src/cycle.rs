//! Conversation cycle state: input, plan, result history, final response.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

use crate::plan::PlanStep;

/// Where a cycle currently is in the
/// `collecting_input → correcting → planning → executing → synthesizing →
/// responding → terminal` machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CollectingInput,
    Correcting,
    Planning,
    Executing,
    Synthesizing,
    Responding,
    Done,
}

/// One executed step's record. Append-only once pushed.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// Tool that produced this result
    pub tool: String,
    /// String form of the result (error text for failed steps)
    pub result: String,
    /// Whether the step failed
    #[serde(skip)]
    pub is_error: bool,
    /// When the step finished
    #[serde(skip)]
    pub at: DateTime<Utc>,
}

impl StepRecord {
    pub fn new(tool: impl Into<String>, result: impl Into<String>, is_error: bool) -> Self {
        Self {
            tool: tool.into(),
            result: result.into(),
            is_error,
            at: Utc::now(),
        }
    }
}

/// Mutable state for one conversation cycle.
///
/// Owned exclusively by the agent loop; one cycle runs start-to-finish
/// before the next begins, and the result history resets with each cycle.
#[derive(Debug, Default)]
pub struct Cycle {
    /// Raw input text (typed or transcribed), pre-correction
    pub raw_input: String,
    /// Model-corrected command text
    pub corrected_input: String,
    /// Remaining plan, consumed strictly front-to-back
    pub plan: VecDeque<PlanStep>,
    /// Results of executed steps, in execution order
    pub results: Vec<StepRecord>,
    /// Final natural-language response
    pub final_response: String,
    /// Error that short-circuits the cycle to synthesis
    pub error: Option<String>,
    /// Current phase
    pub phase: Phase,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::CollectingInput
    }
}

impl Cycle {
    /// Start a fresh cycle from raw input text
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            ..Self::default()
        }
    }

    /// Record a fatal cycle error; the stored text becomes the response.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Whether the user should be asked to rephrase
    pub fn needs_clarification(&self) -> bool {
        self.error.is_some()
    }

    /// Append one record to the result history
    pub fn push_result(&mut self, record: StepRecord) {
        self.results.push(record);
    }
}
