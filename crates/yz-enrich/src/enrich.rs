//! The enrichment chain.
//!
//! Providers are asked in order. The first reply of at least
//! `min_reply_chars` characters wins; otherwise the last provider is asked
//! again with a simplified prompt. The best reply (if any) is split into
//! sections, and every requested aspect whose section is missing or
//! shorter than `min_section_chars` gets its template text instead.
//! [`Enricher::enrich`] cannot fail.

use serde::{Deserialize, Serialize};
use yz_core::{HexagramDefinition, LifeAspect};

use crate::config::{EnrichmentConfig, ProviderSettings};
use crate::prompt::{enrichment_prompt, simplified_prompt};
use crate::provider::{ChatPrompt, TextProvider};
use crate::sections::parse_reply;
use crate::templates::{Conclusion, conclusion, default_section};

/// What to enrich: a hexagram, the question, and the aspects to cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentRequest {
    /// The resolved hexagram.
    pub hexagram: HexagramDefinition,
    /// The question asked; may be empty.
    pub question: String,
    /// Aspects to cover, in display order.
    pub aspects: Vec<LifeAspect>,
}

impl EnrichmentRequest {
    /// A request covering the aspects detected in the question.
    pub fn new(hexagram: &HexagramDefinition, question: &str) -> Self {
        Self {
            hexagram: hexagram.clone(),
            question: question.to_string(),
            aspects: LifeAspect::detect(question),
        }
    }

    /// Override the aspects to cover. An empty list falls back to general
    /// fortune.
    pub fn with_aspects(mut self, aspects: Vec<LifeAspect>) -> Self {
        self.aspects = if aspects.is_empty() {
            vec![LifeAspect::TimeFortune]
        } else {
            aspects
        };
        self
    }
}

/// Where a section's text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "provider", rename_all = "snake_case")]
pub enum SectionOrigin {
    /// Written by the named provider.
    Provider(String),
    /// Filled from the built-in template.
    Template,
}

impl std::fmt::Display for SectionOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(name) => write!(f, "{name}"),
            Self::Template => write!(f, "template"),
        }
    }
}

/// Interpretive text for one aspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The aspect covered.
    pub aspect: LifeAspect,
    /// The text.
    pub text: String,
    /// Where the text came from.
    pub origin: SectionOrigin,
}

/// The full enrichment of a reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    /// One section per requested aspect, in request order.
    pub sections: Vec<Section>,
    /// The closing summary.
    pub conclusion: Conclusion,
}

impl Enrichment {
    /// Text for an aspect, if it was requested.
    pub fn get(&self, aspect: LifeAspect) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.aspect == aspect)
            .map(|s| s.text.as_str())
    }

    /// Whether every section came from templates.
    pub fn is_template_only(&self) -> bool {
        self.sections.iter().all(|s| s.origin == SectionOrigin::Template)
    }

    /// Sections keyed by label, for snapshots.
    pub fn by_label(&self) -> Vec<(String, String)> {
        self.sections
            .iter()
            .map(|s| (s.aspect.label().to_string(), s.text.clone()))
            .collect()
    }

    /// Template-only enrichment for a request.
    pub fn from_templates(request: &EnrichmentRequest) -> Self {
        let sections = request
            .aspects
            .iter()
            .map(|aspect| Section {
                aspect: *aspect,
                text: default_section(&request.hexagram, *aspect, &request.question),
                origin: SectionOrigin::Template,
            })
            .collect();
        Self {
            sections,
            conclusion: conclusion(&request.hexagram, &request.question),
        }
    }
}

/// A reply and the provider that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply {
    /// Provider name.
    pub provider: String,
    /// Reply text.
    pub text: String,
}

/// Runs requests through the provider chain.
pub struct Enricher {
    providers: Vec<Box<dyn TextProvider>>,
    config: EnrichmentConfig,
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("providers", &self.provider_names())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::offline(EnrichmentConfig::default())
    }
}

impl Enricher {
    /// An enricher over the given providers, tried in order.
    pub fn new(providers: Vec<Box<dyn TextProvider>>, config: EnrichmentConfig) -> Self {
        Self { providers, config }
    }

    /// An enricher with no providers: templates only.
    pub fn offline(config: EnrichmentConfig) -> Self {
        Self::new(Vec::new(), config)
    }

    /// An enricher over the providers the settings have keys for.
    pub fn from_settings(settings: &ProviderSettings, config: EnrichmentConfig) -> Self {
        let config = settings.apply(config);
        let providers = settings.build_providers(&config);
        Self::new(providers, config)
    }

    /// The configuration.
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Names of the providers, in order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Whether any provider is configured.
    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    /// Ask providers in order until one replies with at least `min_chars`
    /// characters. Returns that reply, or else the longest non-empty reply
    /// seen, or `None` if every provider failed.
    pub fn ask(&self, prompt: &ChatPrompt, min_chars: usize) -> Option<ProviderReply> {
        let mut best: Option<ProviderReply> = None;
        for provider in &self.providers {
            match provider.complete(prompt) {
                Ok(text) => {
                    let len = text.chars().count();
                    if len >= min_chars {
                        tracing::info!(provider = provider.name(), len, "provider replied");
                        return Some(ProviderReply {
                            provider: provider.name().to_string(),
                            text,
                        });
                    }
                    tracing::warn!(provider = provider.name(), len, min_chars, "provider reply too short");
                    if best.as_ref().is_none_or(|b| b.text.chars().count() < len) {
                        best = Some(ProviderReply {
                            provider: provider.name().to_string(),
                            text,
                        });
                    }
                }
                Err(e) => tracing::warn!(provider = provider.name(), error = %e, "provider failed"),
            }
        }
        best
    }

    fn fetch_reply(&self, request: &EnrichmentRequest) -> Option<ProviderReply> {
        let min = self.config.min_reply_chars;
        let first = self.ask(&enrichment_prompt(request, &self.config), min);
        if first.as_ref().is_some_and(|r| r.text.chars().count() >= min) {
            return first;
        }
        if !self.config.simplified_retry {
            return first;
        }
        let Some(last) = self.providers.last() else {
            return first;
        };
        match last.complete(&simplified_prompt(request, &self.config)) {
            Ok(text) => {
                tracing::info!(provider = last.name(), len = text.chars().count(), "simplified retry replied");
                let longer = first
                    .as_ref()
                    .is_none_or(|f| f.text.chars().count() < text.chars().count());
                if longer {
                    Some(ProviderReply {
                        provider: last.name().to_string(),
                        text,
                    })
                } else {
                    first
                }
            }
            Err(e) => {
                tracing::warn!(provider = last.name(), error = %e, "simplified retry failed");
                first
            }
        }
    }

    /// Enrich a reading. Always returns one section per requested aspect.
    pub fn enrich(&self, request: &EnrichmentRequest) -> Enrichment {
        let mut enrichment = Enrichment::from_templates(request);
        let Some(reply) = self.fetch_reply(request) else {
            tracing::warn!(hexagram = %request.hexagram.name, "no provider reply, using templates");
            return enrichment;
        };
        let parsed = parse_reply(&reply.text, &request.aspects);
        tracing::debug!(format = ?parsed.format, found = parsed.sections.len(), "parsed provider reply");
        for section in &mut enrichment.sections {
            match parsed.sections.get(&section.aspect) {
                Some(text) if text.chars().count() >= self.config.min_section_chars => {
                    section.text = text.clone();
                    section.origin = SectionOrigin::Provider(reply.provider.clone());
                }
                _ => tracing::debug!(aspect = %section.aspect, "section missing or short, keeping template"),
            }
        }
        enrichment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, ProviderResult};
    use std::sync::Mutex;
    use yz_core::Catalog;

    /// Replies with a fixed script, recording every prompt it sees.
    struct Scripted {
        name: &'static str,
        replies: Mutex<Vec<ProviderResult<String>>>,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(name: &'static str, replies: Vec<ProviderResult<String>>) -> Self {
            Self {
                name,
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextProvider for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn complete(&self, prompt: &ChatPrompt) -> ProviderResult<String> {
            self.seen.lock().unwrap().push(prompt.user.clone());
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(ProviderError::EmptyResponse(self.name.to_string()))
            } else {
                replies.remove(0)
            }
        }
    }

    fn failing(name: &'static str) -> Box<dyn TextProvider> {
        Box::new(Scripted::new(
            name,
            vec![Err(ProviderError::MissingApiKey(name.to_string()))],
        ))
    }

    fn request() -> EnrichmentRequest {
        let catalog = Catalog::standard();
        EnrichmentRequest::new(catalog.by_id(63).unwrap(), "我今年的事业运势如何？")
    }

    fn long(text: &str) -> String {
        text.repeat(210)
    }

    #[test]
    fn all_providers_failing_uses_templates() {
        let enricher = Enricher::new(
            vec![failing("deepseek"), failing("qwen")],
            EnrichmentConfig::default(),
        );
        let e = enricher.enrich(&request());
        assert_eq!(e.sections.len(), 2);
        assert!(e.is_template_only());
        assert!(e.sections.iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn offline_is_template_only() {
        let e = Enricher::default().enrich(&request());
        assert!(e.is_template_only());
        assert!(e.get(LifeAspect::Career).is_some());
        assert!(e.get(LifeAspect::Wealth).is_none());
    }

    #[test]
    fn first_sufficient_reply_wins() {
        let reply = serde_json::json!({
            "事业（事业发展）": long("事"),
            "时运（运势分析）": long("运"),
        })
        .to_string();
        let enricher = Enricher::new(
            vec![
                Box::new(Scripted::new("deepseek", vec![Ok(reply)])),
                failing("qwen"),
            ],
            EnrichmentConfig::default(),
        );
        let e = enricher.enrich(&request());
        assert_eq!(e.get(LifeAspect::Career), Some(long("事").as_str()));
        assert!(e
            .sections
            .iter()
            .all(|s| s.origin == SectionOrigin::Provider("deepseek".to_string())));
    }

    #[test]
    fn short_reply_falls_through_to_next_provider() {
        let good = format!("## 事业（事业发展）\n{}\n## 时运（运势分析）\n{}", long("甲"), long("乙"));
        let enricher = Enricher::new(
            vec![
                Box::new(Scripted::new("deepseek", vec![Ok("太短".to_string())])),
                Box::new(Scripted::new("qwen", vec![Ok(good)])),
            ],
            EnrichmentConfig::default(),
        );
        let e = enricher.enrich(&request());
        assert_eq!(e.sections[0].origin, SectionOrigin::Provider("qwen".to_string()));
        assert_eq!(e.get(LifeAspect::TimeFortune), Some(long("乙").as_str()));
    }

    #[test]
    fn partial_coverage_is_filled_from_templates() {
        let reply = serde_json::json!({ "事业（事业发展）": long("事") }).to_string();
        let enricher = Enricher::new(
            vec![Box::new(Scripted::new("deepseek", vec![Ok(reply)]))],
            EnrichmentConfig::default().with_simplified_retry(false),
        );
        let e = enricher.enrich(&request());
        assert_eq!(e.sections[0].origin, SectionOrigin::Provider("deepseek".to_string()));
        assert_eq!(e.sections[1].origin, SectionOrigin::Template);
        assert!(e.sections[1].text.chars().count() >= 200);
    }

    #[test]
    fn short_sections_are_replaced() {
        let reply = format!(
            "{}\n## 事业（事业发展）\n一句话\n## 时运（运势分析）\n{}",
            long("前"),
            long("运")
        );
        let enricher = Enricher::new(
            vec![Box::new(Scripted::new("deepseek", vec![Ok(reply)]))],
            EnrichmentConfig::default(),
        );
        let e = enricher.enrich(&request());
        assert_eq!(e.sections[0].origin, SectionOrigin::Template);
        assert_eq!(e.sections[1].origin, SectionOrigin::Provider("deepseek".to_string()));
    }

    #[test]
    fn simplified_retry_asks_last_provider_again() {
        let qwen = std::sync::Arc::new(Scripted::new(
            "qwen",
            vec![
                Err(ProviderError::EmptyResponse("qwen".into())),
                Ok(format!("## 事业（事业发展）\n{}", long("简"))),
            ],
        ));

        struct Shared(std::sync::Arc<Scripted>);
        impl TextProvider for Shared {
            fn name(&self) -> &str {
                self.0.name()
            }
            fn complete(&self, prompt: &ChatPrompt) -> ProviderResult<String> {
                self.0.complete(prompt)
            }
        }

        let enricher = Enricher::new(
            vec![failing("deepseek"), Box::new(Shared(qwen.clone()))],
            EnrichmentConfig::default(),
        );
        let e = enricher.enrich(&request());
        let seen = qwen.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].starts_with("请详细解读"));
        assert_eq!(e.sections[0].origin, SectionOrigin::Provider("qwen".to_string()));
    }

    #[test]
    fn conclusion_is_always_present() {
        let e = Enricher::default().enrich(&request());
        assert!(e.conclusion.to_string().contains("【核心总结】"));
    }
}
