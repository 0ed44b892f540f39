//! Error types for divination sessions.

use thiserror::Error;
use yz_core::{CastMethod, CoreError};

use crate::phase::PhaseKind;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Casting needs a question first.
    #[error("please enter a question before casting")]
    EmptyQuestion,

    /// The event is not valid in the current phase.
    #[error("cannot {event} while {phase}")]
    InvalidTransition {
        /// The phase the session was in.
        phase: PhaseKind,
        /// What was attempted.
        event: &'static str,
    },

    /// The action belongs to the other casting method.
    #[error("this action needs the {expected} method, but {actual} is selected")]
    WrongMethod {
        /// Method the action needs.
        expected: CastMethod,
        /// Method currently selected.
        actual: CastMethod,
    },

    /// Invalid choice or input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unknown console command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Casting or resolution failed.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Snapshot serialization failed.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
