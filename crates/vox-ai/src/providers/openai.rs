//! OpenAI-compatible chat completions provider

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::Model,
};

/// OpenAI-compatible chat completions client
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create from environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| Error::InvalidApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Run a single non-streaming completion: prompt in, text out.
    pub async fn complete(&self, model: &Model, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: model.id.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(0.0),
        };

        let url = format!("{}/chat/completions", model.base_url);

        tracing::debug!("Requesting completion from {}", model.id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(Error::Auth(text));
            }
            return Err(Error::api("chat_completions_error", text));
        }

        let body: ChatResponse = response.json().await?;
        extract_text(&body)
    }
}

fn extract_text(response: &ChatResponse) -> Result<String> {
    let choice = response
        .choices
        .first()
        .ok_or_else(|| Error::UnexpectedResponse("no choices in response".to_string()))?;

    match choice.message.content.as_deref() {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(Error::UnexpectedResponse(
            "choice contained no content".to_string(),
        )),
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
