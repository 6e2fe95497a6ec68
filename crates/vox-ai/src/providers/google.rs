//! Google Generative AI (Gemini) API provider

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::Model,
};

/// Google Generative AI client
pub struct GoogleProvider {
    client: reqwest::Client,
    api_key: String,
}

impl GoogleProvider {
    /// Create a new Google provider with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create from environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| Error::InvalidApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Run a single non-streaming completion: prompt in, text out.
    pub async fn complete(&self, model: &Model, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: Some(0.0),
            }),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            model.base_url, model.id, self.api_key
        );

        tracing::debug!("Requesting completion from {}", model.id);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(Error::Auth(text));
            }
            return Err(Error::api("generate_content_error", text));
        }

        let body: GeminiResponse = response.json().await?;
        extract_text(&body)
    }
}

/// Pull the concatenated text parts out of the first candidate.
fn extract_text(response: &GeminiResponse) -> Result<String> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| Error::UnexpectedResponse("no candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(Error::UnexpectedResponse(
            "candidate contained no text parts".to_string(),
        ));
    }

    Ok(text)
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}
