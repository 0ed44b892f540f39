//! Key/value view of a session for frontends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use yz_core::{CastMethod, HexagramDefinition, LineResult};

use crate::error::SessionResult;
use crate::phase::PhaseKind;

/// A serializable picture of a session at one moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The session id.
    pub session_id: Uuid,
    /// The current phase.
    pub phase: PhaseKind,
    /// The question; empty when none.
    pub question_text: String,
    /// The chosen method, if any.
    pub cast_method: Option<CastMethod>,
    /// Lines recorded so far, bottom first.
    pub line_results: Vec<LineResult>,
    /// The resolved hexagram, once there is one.
    pub resolved_hexagram: Option<HexagramDefinition>,
    /// The transformed hexagram, if any line changed.
    pub transformed_hexagram: Option<HexagramDefinition>,
    /// Enrichment text keyed by aspect label.
    pub enrichment_content: BTreeMap<String, String>,
    /// The conclusion text, once enriched.
    pub conclusion: Option<String>,
    /// Whether enrichment is in progress.
    pub is_generating: bool,
}

impl SessionSnapshot {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
