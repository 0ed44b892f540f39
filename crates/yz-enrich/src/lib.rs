//! Interpretive enrichment for Yingzai readings.
//!
//! Given a resolved hexagram and the question asked, produces one section of
//! interpretive text per requested life aspect. Text comes from external
//! chat providers tried in order; whatever they fail to cover is filled from
//! deterministic templates, so enrichment never fails. Also hosts the
//! follow-up question helpers and the knowledge-base Q&A responder.

pub mod config;
pub mod enrich;
pub mod error;
pub mod followup;
pub mod knowledge;
pub mod prompt;
pub mod provider;
pub mod qa;
pub mod sections;
pub mod templates;

pub use config::{EnrichmentConfig, ProviderSettings};
pub use enrich::{Enricher, Enrichment, EnrichmentRequest, Section, SectionOrigin};
pub use error::{KnowledgeError, KnowledgeResult, ProviderError, ProviderResult};
pub use followup::QuestionKind;
pub use knowledge::{KnowledgeBase, KnowledgeRecord, ScoredContext};
pub use provider::{ChatPrompt, TextProvider};
pub use qa::{AnswerOrigin, QaAnswer, QaResponder};
