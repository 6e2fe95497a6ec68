//! Error types for vox-ai

use thiserror::Error;

/// Result type alias using vox-ai Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to an LLM provider
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error response
    #[error("API error: {message} (type: {error_type})")]
    Api { error_type: String, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Invalid API key
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// Unexpected response format
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// Create an API error from type and message
    pub fn api(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_constructor() {
        let e = Error::api("generate_content_error", "boom");
        match e {
            Error::Api {
                error_type,
                message,
            } => {
                assert_eq!(error_type, "generate_content_error");
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api, got {:?}", other),
        }
    }

    #[test]
    fn test_display_includes_message() {
        let e = Error::api("auth", "bad key");
        let s = e.to_string();
        assert!(s.contains("bad key"));
        assert!(s.contains("auth"));
    }
}
