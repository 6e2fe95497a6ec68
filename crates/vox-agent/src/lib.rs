//! vox-agent: plan-and-execute conversation core
//!
//! This crate implements one conversation cycle of the assistant: correct
//! the raw input, ask the model for a step-by-step plan, execute the plan's
//! tool calls while resolving data handoffs between steps, and synthesize a
//! final natural-language response.

pub mod agent;
pub mod cycle;
pub mod error;
pub mod events;
pub mod executor;
pub mod model;
pub mod plan;
pub mod planner;
pub mod registry;
pub mod resolver;
pub mod synthesizer;
pub mod tool;

pub use agent::Agent;
pub use cycle::{Cycle, Phase, StepRecord};
pub use error::Error;
pub use events::AgentEvent;
pub use model::{LanguageModel, ProviderModel};
pub use plan::{PlanError, PlanStep};
pub use planner::CLARIFICATION_MESSAGE;
pub use registry::ToolRegistry;
pub use resolver::{CONTENT_SENTINEL, ID_SENTINEL};
pub use tool::{BoxedTool, Tool, ToolResult};
