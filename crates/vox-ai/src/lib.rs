//! vox-ai: LLM provider clients
//!
//! This crate provides plain-text completion clients for the providers vox
//! talks to. A single call takes a free-text prompt and returns the model's
//! free-text reply; the same boundary is used for transcript correction,
//! planning, and response synthesis.

pub mod error;
pub mod providers;
pub mod types;

pub use error::{Error, Result};
pub use types::{Api, Model};
