//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yz_core::casting::Coin;
use yz_core::{CastMethod, LineResult};

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A question was entered.
    Question {
        /// The question text.
        text: String,
        /// When it was entered.
        timestamp: DateTime<Utc>,
    },
    /// A casting method was chosen.
    MethodSelected {
        /// The method.
        method: CastMethod,
        /// When it was chosen.
        timestamp: DateTime<Utc>,
    },
    /// One line was cast.
    Toss {
        /// Zero-based line position.
        index: usize,
        /// Coin faces, for engine tosses.
        coins: Option<[Coin; 3]>,
        /// The resulting line.
        line: LineResult,
        /// Seed the toss was drawn from, for engine tosses.
        seed: Option<u64>,
        /// When it was cast.
        timestamp: DateTime<Utc>,
    },
    /// A number was submitted.
    NumberCast {
        /// The number.
        number: u64,
        /// The recorded seed.
        seed: Option<u64>,
        /// When it was submitted.
        timestamp: DateTime<Utc>,
    },
    /// A partial cast was abandoned.
    CastReset {
        /// Lines discarded.
        discarded: usize,
        /// When it was reset.
        timestamp: DateTime<Utc>,
    },
    /// A hexagram was resolved.
    Resolution {
        /// The six-line symbol.
        symbol: String,
        /// The hexagram name.
        hexagram: String,
        /// Whether the catalog fallback was used.
        fallback: bool,
        /// The transformed hexagram name, if any.
        transformed: Option<String>,
        /// Which texts to consult.
        guide: String,
        /// When it was resolved.
        timestamp: DateTime<Utc>,
    },
    /// Enrichment finished.
    Enrichment {
        /// `(aspect label, origin)` per section.
        sections: Vec<(String, String)>,
        /// When it finished.
        timestamp: DateTime<Utc>,
    },
    /// A follow-up question was answered.
    FollowUp {
        /// The question.
        question: String,
        /// The final answer.
        answer: String,
        /// Where the answer came from.
        origin: String,
        /// Reported confidence.
        confidence: f64,
        /// When it was answered.
        timestamp: DateTime<Utc>,
    },
    /// A user note.
    Note {
        /// The note text.
        text: String,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// The session was restarted.
    Restart {
        /// When it restarted.
        timestamp: DateTime<Utc>,
    },
}
