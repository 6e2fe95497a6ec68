//! Model descriptors shared across providers

use serde::{Deserialize, Serialize};

/// Which wire API a model speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Api {
    /// Google Generative AI (`models/{id}:generateContent`)
    GoogleGenerativeAI,
    /// OpenAI-compatible chat completions
    OpenAICompletions,
}

/// A model descriptor: enough to route a completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    /// Provider-side model identifier
    pub id: String,
    /// Wire API for this model
    pub api: Api,
    /// API base URL
    pub base_url: String,
}

impl Model {
    /// A Gemini model served by Google Generative AI
    pub fn gemini(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            api: Api::GoogleGenerativeAI,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// A model served over OpenAI-compatible chat completions
    pub fn openai(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            api: Api::OpenAICompletions,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::gemini("gemini-1.5-flash")
    }
}
