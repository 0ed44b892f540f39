//! Alibaba DashScope text generation (Qwen).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ChatPrompt, TextProvider, WireMessage, build_client, non_empty, post_json, wire_messages};
use crate::error::ProviderResult;

/// A provider for the DashScope `text-generation/generation` endpoint.
#[derive(Debug, Clone)]
pub struct DashScopeProvider {
    name: String,
    client: reqwest::blocking::Client,
    api_key: String,
    url: String,
    model: String,
    timeout: Duration,
}

impl DashScopeProvider {
    /// Qwen (`qwen-turbo`) at the given endpoint URL.
    pub fn qwen(api_key: impl Into<String>, url: &str) -> ProviderResult<Self> {
        Ok(Self {
            name: "qwen".to_string(),
            client: build_client()?,
            api_key: api_key.into(),
            url: url.to_string(),
            model: "qwen-turbo".to_string(),
            timeout: Duration::from_secs(15),
        })
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
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    input: ApiInput<'a>,
    parameters: ApiParameters,
}

#[derive(Serialize)]
struct ApiInput<'a> {
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct ApiParameters {
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ApiResponse {
    output: Option<ApiOutput>,
}

#[derive(Deserialize)]
struct ApiOutput {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    content: Option<String>,
}

impl ApiOutput {
    /// `choices[0].message.content`, else `text`.
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .or(self.text)
    }
}

impl TextProvider for DashScopeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete(&self, prompt: &ChatPrompt) -> ProviderResult<String> {
        let body = ApiRequest {
            model: &self.model,
            input: ApiInput {
                messages: wire_messages(prompt),
            },
            parameters: ApiParameters {
                temperature: prompt.temperature,
                max_tokens: prompt.max_tokens,
            },
        };
        let resp: ApiResponse = post_json(
            &self.client,
            &self.name,
            &self.url,
            &self.api_key,
            self.timeout,
            &body,
        )?;
        non_empty(&self.name, resp.output.and_then(ApiOutput::into_text))
    }
}
