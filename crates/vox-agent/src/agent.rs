//! The conversation-cycle control loop

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::cycle::{Cycle, Phase};
use crate::error::Result;
use crate::events::AgentEvent;
use crate::executor;
use crate::model::LanguageModel;
use crate::plan::parse_plan;
use crate::planner::{CLARIFICATION_MESSAGE, planning_prompt};
use crate::registry::ToolRegistry;
use crate::synthesizer;

/// Runs conversation cycles against a fixed tool registry and model handle.
///
/// Both collaborators are constructed once at startup and read-only from
/// then on; all mutable state lives in the per-cycle [`Cycle`] record.
pub struct Agent {
    model: Arc<dyn LanguageModel>,
    registry: ToolRegistry,
    event_tx: broadcast::Sender<AgentEvent>,
}

impl Agent {
    /// Create a new agent
    pub fn new(model: Arc<dyn LanguageModel>, registry: ToolRegistry) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            model,
            registry,
            event_tx,
        }
    }

    /// Subscribe to agent events
    pub fn subscribe(&self) -> broadcast::Receiver<AgentEvent> {
        self.event_tx.subscribe()
    }

    /// The tool registry backing this agent
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one full conversation cycle over raw input text.
    ///
    /// Phases run strictly in order; planning failures and fatal execution
    /// errors route to synthesis, which turns the stored error into the
    /// response. A model failure during correction, planning, or synthesis
    /// terminates the cycle with `Err`.
    pub async fn run_cycle(&self, raw_input: &str) -> Result<Cycle> {
        let mut cycle = Cycle::new(raw_input);
        let _ = self.event_tx.send(AgentEvent::CycleStart {
            raw_input: cycle.raw_input.clone(),
        });

        cycle.phase = Phase::Correcting;
        cycle.corrected_input = self.correct(&cycle.raw_input).await?;
        let _ = self.event_tx.send(AgentEvent::InputCorrected {
            text: cycle.corrected_input.clone(),
        });

        cycle.phase = Phase::Planning;
        self.plan(&mut cycle).await?;

        cycle.phase = Phase::Executing;
        while !cycle.plan.is_empty() && cycle.error.is_none() {
            executor::execute_next(
                &mut cycle,
                &self.registry,
                self.model.as_ref(),
                &self.event_tx,
            )
            .await;
        }

        cycle.phase = Phase::Synthesizing;
        let _ = self.event_tx.send(AgentEvent::Synthesizing);
        cycle.final_response = synthesizer::synthesize(self.model.as_ref(), &cycle).await?;

        cycle.phase = Phase::Responding;
        let _ = self.event_tx.send(AgentEvent::Response {
            text: cycle.final_response.clone(),
        });

        cycle.phase = Phase::Done;
        let _ = self.event_tx.send(AgentEvent::CycleEnd);
        Ok(cycle)
    }

    /// Clean up transcribed text into a command. Empty input stays empty.
    async fn correct(&self, raw: &str) -> Result<String> {
        if raw.trim().is_empty() {
            return Ok(String::new());
        }
        let prompt = format!(
            "Correct the following transcribed text into a clean command. RAW: '{}' CORRECTED:",
            raw
        );
        let corrected = self.model.complete(&prompt).await?;
        Ok(corrected.trim().to_string())
    }

    /// Ask the model for a plan and validate it. Malformed output leaves the
    /// plan empty and sets the fixed clarification message.
    async fn plan(&self, cycle: &mut Cycle) -> Result<()> {
        if cycle.corrected_input.is_empty() {
            // No-op cycle: empty input means an empty plan downstream.
            return Ok(());
        }

        let prompt = planning_prompt(&self.registry, &cycle.corrected_input);
        let raw_plan = self.model.complete(&prompt).await?;

        match parse_plan(&raw_plan, &self.registry) {
            Ok(plan) => {
                tracing::debug!("Plan created with {} step(s)", plan.len());
                cycle.plan = plan;
                let _ = self.event_tx.send(AgentEvent::PlanCreated {
                    steps: cycle.plan.iter().cloned().collect(),
                });
            }
            Err(e) => {
                tracing::warn!("Error generating plan: {}", e);
                cycle.set_error(CLARIFICATION_MESSAGE);
                let _ = self.event_tx.send(AgentEvent::Error {
                    message: CLARIFICATION_MESSAGE.to_string(),
                });
            }
        }
        Ok(())
    }
}
