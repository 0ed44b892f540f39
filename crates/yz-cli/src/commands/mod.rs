pub mod ask;
pub mod cast;
pub mod catalog;
pub mod number;
pub mod session;

use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;
use yz_core::{Catalog, TransformPolicy};
use yz_enrich::{Enricher, EnrichmentConfig, KnowledgeBase, ProviderSettings, QaResponder};
use yz_session::{DivinationSession, SessionConfig};

/// Flags shared by every subcommand.
pub struct Options {
    pub date: Option<NaiveDate>,
    pub offline: bool,
    pub catalog: Option<PathBuf>,
    pub knowledge: Option<PathBuf>,
    pub transform: String,
}

impl Options {
    fn load_catalog(&self) -> Result<Catalog, String> {
        let Some(path) = &self.catalog else {
            return Ok(Catalog::standard());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Catalog::from_json(&json).map_err(|e| format!("invalid catalog {}: {e}", path.display()))
    }

    fn load_knowledge(&self) -> Result<KnowledgeBase, String> {
        match &self.knowledge {
            Some(path) => KnowledgeBase::load_jsonl(path).map_err(|e| e.to_string()),
            None => Ok(KnowledgeBase::builtin()),
        }
    }

    fn enricher(&self) -> Enricher {
        let config = EnrichmentConfig::default();
        if self.offline {
            return Enricher::offline(config);
        }
        let settings = ProviderSettings::from_env();
        if !settings.has_credentials() {
            tracing::info!("no provider keys set, using templates only");
        }
        Enricher::from_settings(&settings, config)
    }

    fn session_config(&self) -> Result<SessionConfig, String> {
        let policy = TransformPolicy::parse(&self.transform).ok_or_else(|| {
            format!(
                "unknown transform '{}', use: changing, random",
                self.transform
            )
        })?;
        let mut config = SessionConfig::default().with_transform_policy(policy);
        if let Some(date) = self.date {
            config = config.with_date(date);
        }
        Ok(config)
    }

    fn responder(&self) -> Result<QaResponder, String> {
        Ok(QaResponder::new(self.load_knowledge()?))
    }

    /// Build a session from the flags.
    pub fn session(&self) -> Result<DivinationSession, String> {
        Ok(DivinationSession::new(
            self.load_catalog()?,
            self.enricher(),
            self.responder()?,
            self.session_config()?,
        ))
    }
}

/// Print the resolved hexagram and its enrichment.
fn print_reading(session: &DivinationSession) {
    let Some(reading) = session.reading() else {
        return;
    };
    let hexagram = reading.hexagram();

    println!();
    println!("  {} {hexagram}", "本卦".bold());
    if reading.primary.match_kind != yz_core::MatchKind::Exact {
        println!(
            "  {}",
            format!("（卦象 {} 不在卦表中，取默认卦）", reading.primary.symbol).yellow()
        );
    }
    println!("  卦辞：{}", hexagram.judgment_text);
    println!("  象曰：{}", hexagram.image_text);
    if let Some(t) = reading.transformed_hexagram() {
        println!("  {} {t}", "变卦".bold());
    }
    println!("  断法：{}", reading.guide);

    let Some(enrichment) = session.enrichment_content() else {
        return;
    };
    println!();
    for section in &enrichment.sections {
        println!("  {}", section.aspect.label().cyan().bold());
        println!("  {}", section.text);
        println!();
    }
    println!("{}", enrichment.conclusion);
}

/// Print the snapshot as JSON.
fn print_snapshot(session: &DivinationSession) -> Result<(), String> {
    let json = session.snapshot().to_json().map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
