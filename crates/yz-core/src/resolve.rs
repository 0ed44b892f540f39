//! Resolving six lines to a catalog entry.
//!
//! Lookup is exact on the derived symbol. A symbol absent from the catalog
//! falls back deterministically: all-yang to the first entry, all-yin to
//! the second, anything else to the third (each clamped to the catalog
//! length). Resolution of a complete cast therefore never fails.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, HexagramDefinition};
use crate::error::{CoreError, CoreResult};
use crate::line::LineResult;
use crate::symbol::Symbol;

/// Which fallback rule picked an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackRule {
    /// Six yang lines: first entry.
    AllYang,
    /// Six yin lines: second entry.
    AllYin,
    /// Any other symbol: third entry.
    Default,
}

impl FallbackRule {
    /// The rule that applies to a symbol.
    pub fn for_symbol(symbol: &Symbol) -> Self {
        if symbol.is_all_yang() {
            Self::AllYang
        } else if symbol.is_all_yin() {
            Self::AllYin
        } else {
            Self::Default
        }
    }

    /// Catalog index the rule prefers before clamping.
    pub fn preferred_index(self) -> usize {
        match self {
            Self::AllYang => 0,
            Self::AllYin => 1,
            Self::Default => 2,
        }
    }
}

/// How a symbol was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// The catalog contains the symbol.
    Exact,
    /// The catalog lacks the symbol; a fallback rule chose the entry.
    Fallback(FallbackRule),
}

/// A symbol together with the hexagram it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The symbol derived from the lines.
    pub symbol: Symbol,
    /// The resolved hexagram. On a fallback its own symbol differs.
    pub hexagram: HexagramDefinition,
    /// Whether the match was exact.
    pub match_kind: MatchKind,
}

/// Resolve a symbol against the catalog.
pub fn resolve_symbol(catalog: &Catalog, symbol: Symbol) -> CoreResult<Resolution> {
    if let Some(hexagram) = catalog.lookup(&symbol) {
        tracing::debug!(%symbol, hexagram = %hexagram.name, "exact match");
        return Ok(Resolution {
            symbol,
            hexagram: hexagram.clone(),
            match_kind: MatchKind::Exact,
        });
    }
    let rule = FallbackRule::for_symbol(&symbol);
    let index = rule.preferred_index().min(catalog.len().saturating_sub(1));
    let hexagram = catalog.get(index).cloned().ok_or(CoreError::EmptyCatalog)?;
    tracing::warn!(%symbol, ?rule, hexagram = %hexagram.name, "symbol not in catalog, using fallback");
    Ok(Resolution {
        symbol,
        hexagram,
        match_kind: MatchKind::Fallback(rule),
    })
}

/// Resolve a complete six-line cast.
pub fn resolve_lines(catalog: &Catalog, lines: &[LineResult]) -> CoreResult<Resolution> {
    let lines: &[LineResult; 6] = lines
        .try_into()
        .map_err(|_| CoreError::IncompleteCast(lines.len()))?;
    resolve_symbol(catalog, Symbol::from_lines(lines))
}
