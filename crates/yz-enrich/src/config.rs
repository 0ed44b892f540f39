//! Enrichment and provider configuration.

use std::time::Duration;

use crate::provider::TextProvider;
use crate::provider::dashscope::DashScopeProvider;
use crate::provider::openai_compat::ChatCompletionsProvider;

/// Default DeepSeek API base; `/chat/completions` is appended.
pub const DEFAULT_DEEPSEEK_URL: &str = "https://api.deepseek.com/v1";
/// Default DashScope text-generation endpoint.
pub const DEFAULT_QWEN_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/text-generation/generation";

/// Tuning for enrichment requests and the fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Token limit sent to providers.
    pub max_tokens: u32,
    /// Sampling temperature sent to providers.
    pub temperature: f32,
    /// Replies shorter than this (in characters) fall through to the next
    /// provider.
    pub min_reply_chars: usize,
    /// Sections shorter than this (in characters) are replaced by template
    /// text.
    pub min_section_chars: usize,
    /// Re-ask the last provider with a simplified prompt when every
    /// provider fell short.
    pub simplified_retry: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            max_tokens: 2000,
            temperature: 0.8,
            min_reply_chars: 200,
            min_section_chars: 200,
            simplified_retry: true,
        }
    }
}

impl EnrichmentConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature (clamped to 0.0-2.0).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Set the minimum reply length.
    pub fn with_min_reply_chars(mut self, chars: usize) -> Self {
        self.min_reply_chars = chars;
        self
    }

    /// Set the minimum section length.
    pub fn with_min_section_chars(mut self, chars: usize) -> Self {
        self.min_section_chars = chars;
        self
    }

    /// Enable or disable the simplified retry.
    pub fn with_simplified_retry(mut self, enabled: bool) -> Self {
        self.simplified_retry = enabled;
        self
    }
}

/// Credentials and endpoints for the built-in providers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    /// DeepSeek API key (`DEEPSEEK_API_KEY`).
    pub deepseek_api_key: Option<String>,
    /// DeepSeek API base (`DEEPSEEK_API_URL`).
    pub deepseek_api_url: String,
    /// DashScope API key (`QWEN_API_KEY`).
    pub qwen_api_key: Option<String>,
    /// DashScope endpoint (`QWEN_API_URL`).
    pub qwen_api_url: String,
    /// Timeout override in seconds (`YZ_TIMEOUT_SECS`).
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            deepseek_api_key: None,
            deepseek_api_url: DEFAULT_DEEPSEEK_URL.to_string(),
            qwen_api_key: None,
            qwen_api_url: DEFAULT_QWEN_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ProviderSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a lookup function. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            deepseek_api_key: get("DEEPSEEK_API_KEY"),
            deepseek_api_url: get("DEEPSEEK_API_URL").unwrap_or(defaults.deepseek_api_url),
            qwen_api_key: get("QWEN_API_KEY"),
            qwen_api_url: get("QWEN_API_URL").unwrap_or(defaults.qwen_api_url),
            timeout_secs: get("YZ_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Whether any provider has a key.
    pub fn has_credentials(&self) -> bool {
        self.deepseek_api_key.is_some() || self.qwen_api_key.is_some()
    }

    /// Apply the timeout override, if any, to a config.
    pub fn apply(&self, config: EnrichmentConfig) -> EnrichmentConfig {
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// Build the configured providers in fallback order: DeepSeek, then
    /// Qwen. Providers without a key are left out.
    pub fn build_providers(&self, config: &EnrichmentConfig) -> Vec<Box<dyn TextProvider>> {
        let mut providers: Vec<Box<dyn TextProvider>> = Vec::new();
        if let Some(key) = &self.deepseek_api_key {
            match ChatCompletionsProvider::deepseek(key.clone(), &self.deepseek_api_url) {
                Ok(p) => providers.push(Box::new(p.with_timeout(config.timeout))),
                Err(e) => tracing::warn!(provider = "deepseek", error = %e, "provider unavailable"),
            }
        }
        if let Some(key) = &self.qwen_api_key {
            match DashScopeProvider::qwen(key.clone(), &self.qwen_api_url) {
                Ok(p) => providers.push(Box::new(p.with_timeout(config.timeout))),
                Err(e) => tracing::warn!(provider = "qwen", error = %e, "provider unavailable"),
            }
        }
        tracing::debug!(count = providers.len(), "built text providers");
        providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let cfg = EnrichmentConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(15));
        assert_eq!(cfg.max_tokens, 2000);
        assert_eq!(cfg.min_reply_chars, 200);
        assert_eq!(cfg.min_section_chars, 200);
        assert!(cfg.simplified_retry);
    }

    #[test]
    fn builder_methods() {
        let cfg = EnrichmentConfig::default()
            .with_timeout(Duration::from_secs(2))
            .with_temperature(9.0)
            .with_min_section_chars(10)
            .with_simplified_retry(false);
        assert_eq!(cfg.timeout, Duration::from_secs(2));
        assert_eq!(cfg.temperature, 2.0);
        assert_eq!(cfg.min_section_chars, 10);
        assert!(!cfg.simplified_retry);
    }

    #[test]
    fn settings_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DEEPSEEK_API_KEY", "sk-deep"),
            ("QWEN_API_KEY", ""),
            ("QWEN_API_URL", "http://localhost:9/gen"),
            ("YZ_TIMEOUT_SECS", "3"),
        ]);
        let settings = ProviderSettings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.deepseek_api_key.as_deref(), Some("sk-deep"));
        assert_eq!(settings.deepseek_api_url, DEFAULT_DEEPSEEK_URL);
        assert_eq!(settings.qwen_api_key, None);
        assert_eq!(settings.qwen_api_url, "http://localhost:9/gen");
        assert_eq!(settings.timeout_secs, Some(3));
        assert!(settings.has_credentials());

        let cfg = settings.apply(EnrichmentConfig::default());
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn providers_need_keys() {
        let none = ProviderSettings::default();
        assert!(!none.has_credentials());
        assert!(none.build_providers(&EnrichmentConfig::default()).is_empty());

        let both = ProviderSettings {
            deepseek_api_key: Some("a".into()),
            qwen_api_key: Some("b".into()),
            ..ProviderSettings::default()
        };
        let providers = both.build_providers(&EnrichmentConfig::default());
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["deepseek", "qwen"]);
    }
}
