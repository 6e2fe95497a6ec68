//! Error types for vox-agent

use thiserror::Error;

/// Result type alias using vox-agent Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can escape a conversation cycle
#[derive(Error, Debug)]
pub enum Error {
    /// An error from the AI provider layer
    #[error(transparent)]
    Ai(#[from] vox_ai::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A generic agent error
    #[error("{0}")]
    Other(String),
}
