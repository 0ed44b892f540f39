//! The hexagram catalog.
//!
//! A [`Catalog`] is an ordered list of [`HexagramDefinition`]s with unique
//! symbols and ids. The standard catalog holds all sixty-four hexagrams in
//! King Wen order; partial catalogs (custom JSON or an excerpt of the
//! standard table) are allowed and rely on the resolver's fallback rules
//! for symbols they do not contain.

mod table;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::symbol::Symbol;
use crate::trigram::Trigram;

pub use table::{HEXAGRAMS, HexagramRow};

/// Number of entries in the excerpt used by the original web frontend.
pub const EXCERPT_SIZE: usize = 12;

/// A single hexagram with its classical texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexagramDefinition {
    /// Sequence number, unique within a catalog.
    pub id: u8,
    /// Six-line symbol, unique within a catalog.
    pub symbol: Symbol,
    /// Display name, e.g. "乾卦".
    pub name: String,
    /// The judgment (卦辞).
    pub judgment_text: String,
    /// The image commentary (大象).
    pub image_text: String,
    /// A plain reading of the hexagram.
    pub interpretation: String,
}

impl HexagramDefinition {
    /// The lower trigram.
    pub fn lower(&self) -> Trigram {
        self.symbol.lower()
    }

    /// The upper trigram.
    pub fn upper(&self) -> Trigram {
        self.symbol.upper()
    }

    /// The name without the trailing "卦", e.g. "既济".
    pub fn short_name(&self) -> &str {
        self.name.strip_suffix('卦').unwrap_or(&self.name)
    }
}

impl From<&HexagramRow> for HexagramDefinition {
    fn from(row: &HexagramRow) -> Self {
        Self {
            id: row.id,
            symbol: Symbol::from_trigrams(row.lower, row.upper),
            name: row.name.to_string(),
            judgment_text: row.judgment.to_string(),
            image_text: row.image.to_string(),
            interpretation: row.interpretation.to_string(),
        }
    }
}

impl std::fmt::Display for HexagramDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.id, self.name, self.symbol)
    }
}

/// An ordered, validated set of hexagram definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<HexagramDefinition>,
    by_symbol: HashMap<Symbol, usize>,
}

impl Catalog {
    /// The full sixty-four hexagram catalog.
    pub fn standard() -> Self {
        let entries: Vec<HexagramDefinition> =
            HEXAGRAMS.iter().map(HexagramDefinition::from).collect();
        let by_symbol = entries
            .iter()
            .enumerate()
            .map(|(i, d)| (d.symbol, i))
            .collect();
        Self { entries, by_symbol }
    }

    /// The first `len` entries of the standard catalog (at least one).
    pub fn excerpt(len: usize) -> Self {
        let entries: Vec<HexagramDefinition> = HEXAGRAMS
            .iter()
            .take(len.clamp(1, HEXAGRAMS.len()))
            .map(HexagramDefinition::from)
            .collect();
        let by_symbol = entries
            .iter()
            .enumerate()
            .map(|(i, d)| (d.symbol, i))
            .collect();
        Self { entries, by_symbol }
    }

    /// Build a catalog from arbitrary definitions, rejecting empty input and
    /// duplicate ids or symbols.
    pub fn from_definitions(entries: Vec<HexagramDefinition>) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        let mut by_symbol: HashMap<Symbol, usize> = HashMap::with_capacity(entries.len());
        let mut ids = std::collections::HashSet::with_capacity(entries.len());
        for (i, def) in entries.iter().enumerate() {
            if !ids.insert(def.id) {
                return Err(CoreError::DuplicateId(def.id));
            }
            if let Some(&prev) = by_symbol.get(&def.symbol) {
                return Err(CoreError::DuplicateSymbol {
                    symbol: def.symbol,
                    first: entries[prev].id,
                    second: def.id,
                });
            }
            by_symbol.insert(def.symbol, i);
        }
        Ok(Self { entries, by_symbol })
    }

    /// Parse a JSON array of definitions.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let entries: Vec<HexagramDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(entries)
    }

    /// Serialize the catalog as a JSON array.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Entry at a zero-based position.
    pub fn get(&self, index: usize) -> Option<&HexagramDefinition> {
        self.entries.get(index)
    }

    /// Entry with the given id.
    pub fn by_id(&self, id: u8) -> Option<&HexagramDefinition> {
        self.entries.iter().find(|d| d.id == id)
    }

    /// Entry with the given name, with or without the trailing "卦".
    pub fn by_name(&self, name: &str) -> Option<&HexagramDefinition> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|d| d.name == name || d.short_name() == name)
    }

    /// Exact symbol lookup.
    pub fn lookup(&self, symbol: &Symbol) -> Option<&HexagramDefinition> {
        self.by_symbol.get(symbol).map(|&i| &self.entries[i])
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries. Validated catalogs never do.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &HexagramDefinition> {
        self.entries.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
