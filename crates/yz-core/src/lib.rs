//! Core types for Yingzai: the hexagram catalog, deterministic casting, and
//! hexagram resolution.
//!
//! Everything in this crate is pure computation. A cast is derived from a
//! calendar date, the question text, and a discriminator through an
//! explicitly seeded generator, so the same question asked on the same day
//! always yields the same reading.

/// Life-aspect categories detected from question text.
pub mod aspect;
/// Casting methods: three-coin tosses and number input.
pub mod casting;
/// The hexagram catalog and its built-in table.
pub mod catalog;
/// Deterministic seed derivation and seeded generators.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// Line classifications produced by a coin toss.
pub mod line;
/// A resolved reading: primary hexagram, transformed hexagram, reading guide.
pub mod reading;
/// Symbol lookup with deterministic fallback.
pub mod resolve;
/// Six-line symbols.
pub mod symbol;
/// Changing lines, transformed hexagrams, and the classical reading guide.
pub mod transform;
/// The eight trigrams.
pub mod trigram;

/// Re-export category types.
pub use aspect::LifeAspect;
/// Re-export casting types.
pub use casting::{CastMethod, CoinToss};
/// Re-export catalog types.
pub use catalog::{Catalog, HexagramDefinition};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export line types.
pub use line::LineResult;
/// Re-export reading types.
pub use reading::Reading;
/// Re-export resolution types.
pub use resolve::{MatchKind, Resolution};
/// Re-export symbol type.
pub use symbol::Symbol;
/// Re-export transform types.
pub use transform::{ReadingGuide, TransformPolicy, Transformed};
/// Re-export trigram type.
pub use trigram::Trigram;
