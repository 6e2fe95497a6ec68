//! Language model handle used by the cycle phases and model-backed tools

use async_trait::async_trait;
use vox_ai::{
    Api, Model,
    providers::{GoogleProvider, OpenAiProvider},
};

/// A single free-text completion boundary.
///
/// The same handle is used for transcript correction, planning, response
/// synthesis, and any tool that declares `requires_model`.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the model's text reply.
    async fn complete(&self, prompt: &str) -> vox_ai::Result<String>;
}

enum ProviderClient {
    Google(GoogleProvider),
    OpenAi(OpenAiProvider),
}

/// A `LanguageModel` backed by a vox-ai provider client.
pub struct ProviderModel {
    model: Model,
    client: ProviderClient,
}

impl ProviderModel {
    /// Create a handle for a model with an explicit API key
    pub fn new(model: Model, api_key: impl Into<String>) -> Self {
        let client = match model.api {
            Api::GoogleGenerativeAI => ProviderClient::Google(GoogleProvider::new(api_key)),
            Api::OpenAICompletions => ProviderClient::OpenAi(OpenAiProvider::new(api_key)),
        };
        Self { model, client }
    }

    /// Create a handle reading the API key from the environment
    pub fn from_env(model: Model) -> vox_ai::Result<Self> {
        let client = match model.api {
            Api::GoogleGenerativeAI => ProviderClient::Google(GoogleProvider::from_env()?),
            Api::OpenAICompletions => ProviderClient::OpenAi(OpenAiProvider::from_env()?),
        };
        Ok(Self { model, client })
    }

    /// The model this handle routes to
    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for ProviderModel {
    async fn complete(&self, prompt: &str) -> vox_ai::Result<String> {
        match &self.client {
            ProviderClient::Google(provider) => provider.complete(&self.model, prompt).await,
            ProviderClient::OpenAi(provider) => provider.complete(&self.model, prompt).await,
        }
    }
}
