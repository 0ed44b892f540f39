//! The session state machine.
//!
//! Each [`Phase`] carries exactly the data valid in it, and [`step`] is a
//! pure function from a phase and an [`Event`] to the next phase. Coin
//! tosses are drawn inside `step` from the deterministic engine, so the
//! same question on the same day always walks the same path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use yz_core::casting::toss_coins;
use yz_core::{CastMethod, Catalog, LineResult, Reading, TransformPolicy};
use yz_enrich::Enrichment;

use crate::error::{SessionError, SessionResult};

/// Number of lines in a cast.
pub const LINES_PER_CAST: usize = 6;

/// Everything `step` needs besides the phase itself.
#[derive(Debug, Clone, Copy)]
pub struct CastContext<'a> {
    /// The hexagram catalog.
    pub catalog: &'a Catalog,
    /// The casting date.
    pub date: NaiveDate,
    /// How the transformed hexagram is derived.
    pub policy: TransformPolicy,
}

/// The current phase and its data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing entered yet.
    #[default]
    Idle,
    /// A question is being written.
    CollectingInput {
        /// The question so far; may be empty.
        question: String,
    },
    /// A method is chosen and lines are being cast.
    Casting {
        /// The question.
        question: String,
        /// The chosen method.
        method: CastMethod,
        /// Lines recorded so far, bottom first.
        lines: Vec<LineResult>,
    },
    /// A hexagram is resolved; enrichment has not started.
    Resolved {
        /// The reading.
        reading: Reading,
    },
    /// Enrichment is running.
    GeneratingEnrichment {
        /// The reading being enriched.
        reading: Reading,
    },
    /// The full result is available.
    Ready {
        /// The reading.
        reading: Reading,
        /// Its enrichment.
        enrichment: Enrichment,
    },
    /// Follow-up questions about a ready reading.
    FollowUpQa {
        /// The reading.
        reading: Reading,
        /// Its enrichment.
        enrichment: Enrichment,
    },
}

/// The name of a phase, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    /// See [`Phase::Idle`].
    Idle,
    /// See [`Phase::CollectingInput`].
    CollectingInput,
    /// See [`Phase::Casting`].
    Casting,
    /// See [`Phase::Resolved`].
    Resolved,
    /// See [`Phase::GeneratingEnrichment`].
    GeneratingEnrichment,
    /// See [`Phase::Ready`].
    Ready,
    /// See [`Phase::FollowUpQa`].
    FollowUpQa,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "IDLE",
            Self::CollectingInput => "COLLECTING_INPUT",
            Self::Casting => "CASTING",
            Self::Resolved => "RESOLVED",
            Self::GeneratingEnrichment => "GENERATING_ENRICHMENT",
            Self::Ready => "READY",
            Self::FollowUpQa => "FOLLOW_UP_QA",
        };
        write!(f, "{s}")
    }
}

impl Phase {
    /// The phase's name.
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Idle => PhaseKind::Idle,
            Self::CollectingInput { .. } => PhaseKind::CollectingInput,
            Self::Casting { .. } => PhaseKind::Casting,
            Self::Resolved { .. } => PhaseKind::Resolved,
            Self::GeneratingEnrichment { .. } => PhaseKind::GeneratingEnrichment,
            Self::Ready { .. } => PhaseKind::Ready,
            Self::FollowUpQa { .. } => PhaseKind::FollowUpQa,
        }
    }

    /// The question, or `""` when idle.
    pub fn question(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::CollectingInput { question } | Self::Casting { question, .. } => question,
            Self::Resolved { reading }
            | Self::GeneratingEnrichment { reading }
            | Self::Ready { reading, .. }
            | Self::FollowUpQa { reading, .. } => &reading.question,
        }
    }

    /// The chosen casting method, once there is one.
    pub fn method(&self) -> Option<CastMethod> {
        match self {
            Self::Idle | Self::CollectingInput { .. } => None,
            Self::Casting { method, .. } => Some(*method),
            Self::Resolved { reading }
            | Self::GeneratingEnrichment { reading }
            | Self::Ready { reading, .. }
            | Self::FollowUpQa { reading, .. } => Some(reading.method),
        }
    }

    /// Lines recorded so far. Empty for number casts.
    pub fn lines(&self) -> &[LineResult] {
        match self {
            Self::Casting { lines, .. } => lines,
            _ => self
                .reading()
                .and_then(|r| r.lines.as_deref())
                .unwrap_or_default(),
        }
    }

    /// The reading, once resolved.
    pub fn reading(&self) -> Option<&Reading> {
        match self {
            Self::Resolved { reading }
            | Self::GeneratingEnrichment { reading }
            | Self::Ready { reading, .. }
            | Self::FollowUpQa { reading, .. } => Some(reading),
            _ => None,
        }
    }

    /// The enrichment, once ready.
    pub fn enrichment(&self) -> Option<&Enrichment> {
        match self {
            Self::Ready { enrichment, .. } | Self::FollowUpQa { enrichment, .. } => Some(enrichment),
            _ => None,
        }
    }
}

/// Something that moves the session along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Set or edit the question.
    EnterQuestion(String),
    /// Choose a casting method.
    SelectMethod(CastMethod),
    /// Toss three coins for the next line.
    Toss,
    /// Record a line tossed by hand.
    RecordLine(LineResult),
    /// Submit a number for a number cast.
    SubmitNumber(u64),
    /// Abandon a partial cast and start again at toss 0.
    ResetCast,
    /// Start enrichment of a resolved reading.
    BeginEnrichment,
    /// Enrichment finished.
    EnrichmentReady(Enrichment),
    /// Start asking follow-up questions.
    OpenFollowUp,
    /// Leave follow-up questions.
    Back,
    /// Clear everything.
    Restart,
}

impl Event {
    /// Short name used in errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EnterQuestion(_) => "enter a question",
            Self::SelectMethod(_) => "select a method",
            Self::Toss => "toss",
            Self::RecordLine(_) => "record a line",
            Self::SubmitNumber(_) => "submit a number",
            Self::ResetCast => "reset the cast",
            Self::BeginEnrichment => "begin enrichment",
            Self::EnrichmentReady(_) => "finish enrichment",
            Self::OpenFollowUp => "open follow-up questions",
            Self::Back => "go back",
            Self::Restart => "restart",
        }
    }
}

fn invalid(phase: &Phase, event: &Event) -> SessionError {
    SessionError::InvalidTransition {
        phase: phase.kind(),
        event: event.name(),
    }
}

/// Append a line; resolve when the sixth arrives.
fn push_line(
    question: &str,
    mut lines: Vec<LineResult>,
    line: LineResult,
    ctx: &CastContext<'_>,
) -> SessionResult<Phase> {
    lines.push(line);
    if lines.len() < LINES_PER_CAST {
        return Ok(Phase::Casting {
            question: question.to_string(),
            method: CastMethod::ManualCoins,
            lines,
        });
    }
    let reading = Reading::from_lines(ctx.catalog, ctx.date, question, lines, ctx.policy)?;
    tracing::debug!(hexagram = %reading.hexagram().name, "cast resolved");
    Ok(Phase::Resolved { reading })
}

/// Compute the phase after `event`. The input phase is left untouched, so
/// a rejected event leaves the session as it was.
pub fn step(phase: &Phase, event: Event, ctx: &CastContext<'_>) -> SessionResult<Phase> {
    match (phase, event) {
        (_, Event::Restart) => Ok(Phase::Idle),

        (Phase::Idle | Phase::CollectingInput { .. }, Event::EnterQuestion(question)) => {
            Ok(Phase::CollectingInput { question })
        }
        (
            Phase::Casting {
                question: old,
                method,
                lines,
            },
            Event::EnterQuestion(question),
        ) => {
            if question.trim().is_empty() {
                Ok(Phase::CollectingInput { question })
            } else if question == *old {
                Ok(phase.clone())
            } else {
                tracing::debug!(discarded = lines.len(), "question edited, cast restarts");
                Ok(Phase::Casting {
                    question,
                    method: *method,
                    lines: Vec::new(),
                })
            }
        }

        (Phase::CollectingInput { question }, Event::SelectMethod(method)) => {
            if question.trim().is_empty() {
                return Err(SessionError::EmptyQuestion);
            }
            Ok(Phase::Casting {
                question: question.clone(),
                method,
                lines: Vec::new(),
            })
        }
        (
            Phase::Casting {
                question,
                method: current,
                lines,
            },
            Event::SelectMethod(method),
        ) => Ok(Phase::Casting {
            question: question.clone(),
            method,
            lines: if method == *current {
                lines.clone()
            } else {
                Vec::new()
            },
        }),

        (
            Phase::Casting {
                question,
                method,
                lines,
            },
            event @ (Event::Toss | Event::RecordLine(_)),
        ) => {
            if *method != CastMethod::ManualCoins {
                return Err(SessionError::WrongMethod {
                    expected: CastMethod::ManualCoins,
                    actual: *method,
                });
            }
            let line = match event {
                Event::RecordLine(line) => line,
                _ => toss_coins(ctx.date, question, lines.len()).line(),
            };
            push_line(question, lines.clone(), line, ctx)
        }

        (Phase::Casting { question, method, .. }, Event::SubmitNumber(n)) => {
            if *method != CastMethod::NumberInput {
                return Err(SessionError::WrongMethod {
                    expected: CastMethod::NumberInput,
                    actual: *method,
                });
            }
            let reading = Reading::from_number(ctx.catalog, ctx.date, question, n, ctx.policy)?;
            tracing::debug!(n, hexagram = %reading.hexagram().name, "number cast resolved");
            Ok(Phase::Resolved { reading })
        }

        (Phase::Casting { question, method, .. }, Event::ResetCast) => Ok(Phase::Casting {
            question: question.clone(),
            method: *method,
            lines: Vec::new(),
        }),

        (Phase::Resolved { reading }, Event::BeginEnrichment) => Ok(Phase::GeneratingEnrichment {
            reading: reading.clone(),
        }),

        (Phase::GeneratingEnrichment { reading }, Event::EnrichmentReady(enrichment)) => {
            Ok(Phase::Ready {
                reading: reading.clone(),
                enrichment,
            })
        }

        (Phase::Ready { reading, enrichment }, Event::OpenFollowUp) => Ok(Phase::FollowUpQa {
            reading: reading.clone(),
            enrichment: enrichment.clone(),
        }),

        (Phase::FollowUpQa { reading, enrichment }, Event::Back) => Ok(Phase::Ready {
            reading: reading.clone(),
            enrichment: enrichment.clone(),
        }),

        (phase, event) => Err(invalid(phase, &event)),
    }
}
