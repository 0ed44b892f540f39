//! The text-provider boundary.
//!
//! A provider turns a [`ChatPrompt`] into reply text or fails. The built-in
//! providers speak HTTP through a blocking `reqwest` client; tests and
//! offline runs plug in their own implementations.

pub mod dashscope;
pub mod openai_compat;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, ProviderResult};

/// Longest error body kept in [`ProviderError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// A system + user prompt pair with sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    /// The system message.
    pub system: String,
    /// The user message.
    pub user: String,
    /// Token limit for the reply.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Something that can answer a chat prompt with text.
pub trait TextProvider: Send + Sync {
    /// Short name used in logs and section origins.
    fn name(&self) -> &str;

    /// Ask for a completion.
    fn complete(&self, prompt: &ChatPrompt) -> ProviderResult<String>;
}

/// A chat message in the wire format shared by both providers.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

pub(crate) fn wire_messages(prompt: &ChatPrompt) -> Vec<WireMessage<'_>> {
    vec![
        WireMessage {
            role: "system",
            content: &prompt.system,
        },
        WireMessage {
            role: "user",
            content: &prompt.user,
        },
    ]
}

/// The shared blocking client. Fails when the TLS backend cannot start.
pub(crate) fn build_client() -> ProviderResult<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder().build()?)
}

/// POST a JSON body with bearer auth and decode the JSON reply.
pub(crate) fn post_json<B, R>(
    client: &reqwest::blocking::Client,
    provider: &str,
    url: &str,
    api_key: &str,
    timeout: Duration,
    body: &B,
) -> ProviderResult<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let resp = client
        .post(url)
        .header("authorization", format!("Bearer {api_key}"))
        .header("content-type", "application/json")
        .timeout(timeout)
        .json(body)
        .send()
        .map_err(|e| classify(provider, timeout, e))?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().unwrap_or_default();
        return Err(ProviderError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    let text = resp.text().map_err(|e| classify(provider, timeout, e))?;
    serde_json::from_str(&text).map_err(|e| ProviderError::MalformedResponse {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}

fn classify(provider: &str, timeout: Duration, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            secs: timeout.as_secs(),
        }
    } else {
        ProviderError::Http(err)
    }
}

/// Reject replies with no visible text.
pub(crate) fn non_empty(provider: &str, text: Option<String>) -> ProviderResult<String> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ProviderError::EmptyResponse(provider.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds() {
        assert!(build_client().is_ok());
    }

    #[test]
    fn blank_reply_is_an_error() {
        assert_eq!(non_empty("qwen", Some("卦".into())).unwrap(), "卦");
        let err = non_empty("qwen", Some("  \n".into())).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(ref p) if p == "qwen"));
        assert!(non_empty("qwen", None).is_err());
    }
}
