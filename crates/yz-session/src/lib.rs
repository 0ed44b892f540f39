//! Divination session flow for Yingzai.
//!
//! A session moves through question entry, casting, resolution, enrichment,
//! and follow-up questions. The transitions themselves live in [`phase`] as
//! a pure function; [`DivinationSession`] runs enrichment and Q&A around
//! them and keeps a journal, and [`Console`] drives a session from text
//! commands.

pub mod config;
pub mod console;
pub mod error;
pub mod journal;
pub mod phase;
pub mod session;
pub mod snapshot;

pub use config::SessionConfig;
pub use console::Console;
pub use error::{SessionError, SessionResult};
pub use journal::{Journal, JournalEntry};
pub use phase::{Event, Phase, PhaseKind};
pub use session::DivinationSession;
pub use snapshot::SessionSnapshot;
