//! OpenAI-compatible `chat/completions` providers (DeepSeek).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ChatPrompt, TextProvider, WireMessage, build_client, non_empty, post_json, wire_messages};
use crate::error::ProviderResult;

/// A provider speaking the OpenAI chat-completions protocol.
#[derive(Debug, Clone)]
pub struct ChatCompletionsProvider {
    name: String,
    client: reqwest::blocking::Client,
    api_key: String,
    api_base: String,
    model: String,
    timeout: Duration,
}

impl ChatCompletionsProvider {
    /// Create a provider for any compatible endpoint. `api_base` is the part
    /// before `/chat/completions`.
    pub fn new(
        name: impl Into<String>,
        api_key: impl Into<String>,
        api_base: &str,
        model: impl Into<String>,
    ) -> ProviderResult<Self> {
        Ok(Self {
            name: name.into(),
            client: build_client()?,
            api_key: api_key.into(),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: Duration::from_secs(15),
        })
    }

    /// DeepSeek at a given base. A base that already ends in
    /// `/chat/completions` is accepted as well.
    pub fn deepseek(api_key: impl Into<String>, api_base: &str) -> ProviderResult<Self> {
        let base = api_base
            .trim_end_matches('/')
            .trim_end_matches("/chat/completions");
        Self::new("deepseek", api_key, base, "deepseek-chat")
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The full request URL.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

impl TextProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete(&self, prompt: &ChatPrompt) -> ProviderResult<String> {
        let body = ApiRequest {
            model: &self.model,
            messages: wire_messages(prompt),
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        };
        let resp: ApiResponse = post_json(
            &self.client,
            &self.name,
            &self.endpoint(),
            &self.api_key,
            self.timeout,
            &body,
        )?;
        let text = resp.choices.into_iter().next().and_then(|c| c.message.content);
        non_empty(&self.name, text)
    }
}
