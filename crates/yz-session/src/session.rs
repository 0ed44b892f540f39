//! Divination session management.
//!
//! `DivinationSession` owns the phase, drives it through [`step`], and adds
//! what the pure state machine leaves out: running enrichment (at most once
//! per question and hexagram), answering follow-up questions, and keeping a
//! journal.

use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::Utc;
use uuid::Uuid;
use yz_core::casting::{CoinToss, toss_coins};
use yz_core::{CastMethod, Catalog, HexagramDefinition, LineResult, MatchKind, Reading};
use yz_enrich::followup::recommended_questions;
use yz_enrich::{Enricher, Enrichment, EnrichmentRequest, QaAnswer, QaResponder};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::journal::{Journal, JournalEntry};
use crate::phase::{CastContext, Event, Phase, PhaseKind, step};
use crate::snapshot::SessionSnapshot;

/// Enrichment is generated at most once per key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EnrichmentKey {
    question: String,
    hexagram_id: u8,
}

impl EnrichmentKey {
    fn of(reading: &Reading) -> Self {
        Self {
            question: reading.question.clone(),
            hexagram_id: reading.hexagram().id,
        }
    }
}

/// One user's divination session.
#[derive(Debug)]
pub struct DivinationSession {
    id: Uuid,
    config: SessionConfig,
    catalog: Catalog,
    enricher: Enricher,
    responder: QaResponder,
    phase: Phase,
    is_generating: bool,
    enriched: Option<(EnrichmentKey, Enrichment)>,
    enrichment_runs: usize,
    answers: Vec<QaAnswer>,
    journal: Journal,
}

impl DivinationSession {
    /// Create a session.
    pub fn new(
        catalog: Catalog,
        enricher: Enricher,
        responder: QaResponder,
        config: SessionConfig,
    ) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(%id, entries = catalog.len(), "session created");
        Self {
            id,
            config,
            catalog,
            enricher,
            responder,
            phase: Phase::Idle,
            is_generating: false,
            enriched: None,
            enrichment_runs: 0,
            answers: Vec::new(),
            journal: Journal::new(),
        }
    }

    /// A session with the full catalog, no providers, and the built-in
    /// knowledge base.
    pub fn offline(config: SessionConfig) -> Self {
        Self::new(
            Catalog::standard(),
            Enricher::default(),
            QaResponder::builtin(),
            config,
        )
    }

    /// The session id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The current phase's name.
    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// The question; empty when none.
    pub fn question_text(&self) -> &str {
        self.phase.question()
    }

    /// The chosen casting method.
    pub fn cast_method(&self) -> Option<CastMethod> {
        self.phase.method()
    }

    /// Lines recorded so far.
    pub fn line_results(&self) -> &[LineResult] {
        self.phase.lines()
    }

    /// The reading, once resolved.
    pub fn reading(&self) -> Option<&Reading> {
        self.phase.reading()
    }

    /// The resolved hexagram.
    pub fn resolved_hexagram(&self) -> Option<&HexagramDefinition> {
        self.reading().map(Reading::hexagram)
    }

    /// The enrichment, once ready.
    pub fn enrichment_content(&self) -> Option<&Enrichment> {
        self.phase.enrichment()
    }

    /// Whether enrichment is running.
    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    /// How many times enrichment has actually been generated.
    pub fn enrichment_runs(&self) -> usize {
        self.enrichment_runs
    }

    /// Follow-up answers given since the last restart.
    pub fn answers(&self) -> &[QaAnswer] {
        &self.answers
    }

    /// The journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Add a note to the journal.
    pub fn note(&mut self, text: &str) {
        self.journal.append(JournalEntry::Note {
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }

    fn apply(&mut self, event: Event) -> SessionResult<()> {
        let ctx = CastContext {
            catalog: &self.catalog,
            date: self.config.cast_date(),
            policy: self.config.transform_policy,
        };
        let next = step(&self.phase, event, &ctx)?;
        if next.kind() != self.phase.kind() {
            tracing::debug!(from = %self.phase.kind(), to = %next.kind(), "phase change");
        }
        self.phase = next;
        Ok(())
    }

    /// Set or edit the question.
    pub fn enter_question(&mut self, question: &str) -> SessionResult<()> {
        let question = question.trim();
        self.apply(Event::EnterQuestion(question.to_string()))?;
        if !question.is_empty() {
            self.journal.append(JournalEntry::Question {
                text: question.to_string(),
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }

    /// Choose the casting method.
    pub fn select_method(&mut self, method: CastMethod) -> SessionResult<()> {
        self.apply(Event::SelectMethod(method))?;
        self.journal.append(JournalEntry::MethodSelected {
            method,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Toss three coins for the next line. The sixth toss resolves the
    /// reading and runs enrichment.
    pub fn toss(&mut self) -> SessionResult<CoinToss> {
        let index = self.line_results().len();
        let question = self.question_text().to_string();
        self.apply(Event::Toss)?;
        let toss = toss_coins(self.config.cast_date(), &question, index);
        self.journal.append(JournalEntry::Toss {
            index,
            coins: Some(toss.coins),
            line: toss.line(),
            seed: Some(toss.seed),
            timestamp: Utc::now(),
        });
        self.after_cast()?;
        Ok(toss)
    }

    /// Record a line tossed by hand.
    pub fn record_line(&mut self, line: LineResult) -> SessionResult<()> {
        let index = self.line_results().len();
        self.apply(Event::RecordLine(line))?;
        self.journal.append(JournalEntry::Toss {
            index,
            coins: None,
            line,
            seed: None,
            timestamp: Utc::now(),
        });
        self.after_cast()
    }

    /// Submit a number for a number cast. Resolves and runs enrichment.
    pub fn submit_number(&mut self, n: u64) -> SessionResult<()> {
        self.apply(Event::SubmitNumber(n))?;
        let seed = self.reading().and_then(|r| r.seed);
        self.journal.append(JournalEntry::NumberCast {
            number: n,
            seed,
            timestamp: Utc::now(),
        });
        self.after_cast()
    }

    /// Abandon a partial cast.
    pub fn reset_cast(&mut self) -> SessionResult<()> {
        let discarded = self.line_results().len();
        self.apply(Event::ResetCast)?;
        self.journal.append(JournalEntry::CastReset {
            discarded,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn after_cast(&mut self) -> SessionResult<()> {
        let Some(reading) = self.phase.reading() else {
            return Ok(());
        };
        self.journal.append(JournalEntry::Resolution {
            symbol: reading.primary.symbol.to_string(),
            hexagram: reading.hexagram().name.clone(),
            fallback: matches!(reading.primary.match_kind, MatchKind::Fallback(_)),
            transformed: reading.transformed_hexagram().map(|h| h.name.clone()),
            guide: reading.guide.to_string(),
            timestamp: Utc::now(),
        });
        self.ensure_enrichment()?;
        Ok(())
    }

    /// Run enrichment if the session is resolved and not yet enriched.
    /// Returns whether enrichment text was generated rather than reused.
    pub fn ensure_enrichment(&mut self) -> SessionResult<bool> {
        let Phase::Resolved { reading } = &self.phase else {
            return Ok(false);
        };
        let key = EnrichmentKey::of(reading);
        let request = EnrichmentRequest::new(reading.hexagram(), &reading.question);

        self.apply(Event::BeginEnrichment)?;
        self.is_generating = true;

        let (enrichment, generated) = match &self.enriched {
            Some((cached_key, cached)) if *cached_key == key => {
                tracing::debug!(hexagram = key.hexagram_id, "enrichment already present, skipping");
                (cached.clone(), false)
            }
            _ => (self.generate(&request), true),
        };
        if generated {
            self.enrichment_runs += 1;
        }

        self.is_generating = false;
        self.enriched = Some((key, enrichment.clone()));
        self.journal.append(JournalEntry::Enrichment {
            sections: enrichment
                .sections
                .iter()
                .map(|s| (s.aspect.label().to_string(), s.origin.to_string()))
                .collect(),
            timestamp: Utc::now(),
        });
        self.apply(Event::EnrichmentReady(enrichment))?;
        Ok(generated)
    }

    fn generate(&self, request: &EnrichmentRequest) -> Enrichment {
        let enricher = &self.enricher;
        match catch_unwind(AssertUnwindSafe(|| enricher.enrich(request))) {
            Ok(enrichment) => enrichment,
            Err(_) => {
                tracing::error!(hexagram = %request.hexagram.name, "enrichment panicked, using templates");
                Enrichment::from_templates(request)
            }
        }
    }

    /// Start follow-up questions.
    pub fn open_follow_up(&mut self) -> SessionResult<()> {
        self.apply(Event::OpenFollowUp)
    }

    /// Leave follow-up questions.
    pub fn back(&mut self) -> SessionResult<()> {
        self.apply(Event::Back)
    }

    /// Questions worth asking about the current reading.
    pub fn recommended_questions(&self) -> Vec<String> {
        self.reading()
            .map(|r| recommended_questions(r.hexagram(), &r.question))
            .unwrap_or_default()
    }

    /// Answer a follow-up question about the current reading. Opens
    /// follow-up questions if the reading is ready.
    pub fn ask(&mut self, question: &str) -> SessionResult<QaAnswer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }
        if self.phase_kind() == PhaseKind::Ready {
            self.open_follow_up()?;
        }
        let Phase::FollowUpQa { reading, .. } = &self.phase else {
            return Err(SessionError::InvalidTransition {
                phase: self.phase_kind(),
                event: "ask a follow-up question",
            });
        };
        let hexagram = reading.hexagram();
        let summary = format!(
            "{} {}，卦辞：{}（原问题：{}）",
            hexagram.name, hexagram.symbol, hexagram.judgment_text, reading.question
        );

        let enricher = &self.enricher;
        let responder = &self.responder;
        let answer = match catch_unwind(AssertUnwindSafe(|| {
            responder.answer(enricher, question, Some(&summary))
        })) {
            Ok(answer) => answer,
            Err(_) => {
                tracing::error!("follow-up answer panicked, answering offline");
                responder.answer(&Enricher::offline(enricher.config().clone()), question, None)
            }
        };

        self.journal.append(JournalEntry::FollowUp {
            question: question.to_string(),
            answer: answer.final_answer.clone(),
            origin: answer.origin.to_string(),
            confidence: answer.confidence_score,
            timestamp: Utc::now(),
        });
        self.answers.push(answer.clone());
        Ok(answer)
    }

    /// Clear everything and return to idle. Valid from any phase.
    pub fn restart(&mut self) {
        self.phase = Phase::Idle;
        self.is_generating = false;
        self.enriched = None;
        self.answers.clear();
        self.journal.append(JournalEntry::Restart {
            timestamp: Utc::now(),
        });
        tracing::debug!(id = %self.id, "session restarted");
    }

    /// A key/value picture of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let enrichment = self.enrichment_content();
        SessionSnapshot {
            session_id: self.id,
            phase: self.phase_kind(),
            question_text: self.question_text().to_string(),
            cast_method: self.cast_method(),
            line_results: self.line_results().to_vec(),
            resolved_hexagram: self.resolved_hexagram().cloned(),
            transformed_hexagram: self.reading().and_then(|r| r.transformed_hexagram()).cloned(),
            enrichment_content: enrichment
                .map(|e| e.by_label().into_iter().collect())
                .unwrap_or_default(),
            conclusion: enrichment.map(|e| e.conclusion.to_string()),
            is_generating: self.is_generating,
        }
    }
}
