//! Six-line hexagram symbols.
//!
//! A symbol is written as six characters over `0` and `1`. Index 0 is the
//! bottom line (the first toss) and index 5 the top line; `1` is a solid
//! yang line. The string is the literal concatenation of line digits with
//! no reordering.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::line::LineResult;
use crate::trigram::Trigram;

/// The six lines of a hexagram, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol([bool; 6]);

impl Symbol {
    /// Build a symbol from line polarities, bottom to top.
    pub fn new(lines: [bool; 6]) -> Self {
        Self(lines)
    }

    /// Build a symbol from six cast lines.
    pub fn from_lines(lines: &[LineResult; 6]) -> Self {
        Self(lines.map(LineResult::is_yang))
    }

    /// Stack a lower trigram beneath an upper one.
    pub fn from_trigrams(lower: Trigram, upper: Trigram) -> Self {
        let l = lower.lines();
        let u = upper.lines();
        Self([l[0], l[1], l[2], u[0], u[1], u[2]])
    }

    /// Line polarities, bottom to top.
    pub fn lines(&self) -> [bool; 6] {
        self.0
    }

    /// Whether the line at `position` (0 = bottom) is yang.
    pub fn is_yang(&self, position: usize) -> bool {
        self.0.get(position).copied().unwrap_or(false)
    }

    /// The trigram formed by lines 1-3.
    pub fn lower(&self) -> Trigram {
        Trigram::from_lines([self.0[0], self.0[1], self.0[2]])
    }

    /// The trigram formed by lines 4-6.
    pub fn upper(&self) -> Trigram {
        Trigram::from_lines([self.0[3], self.0[4], self.0[5]])
    }

    /// Return a copy with the given positions flipped. Out-of-range
    /// positions are ignored.
    pub fn flipped(&self, positions: &[usize]) -> Self {
        let mut lines = self.0;
        for &p in positions {
            if let Some(line) = lines.get_mut(p) {
                *line = !*line;
            }
        }
        Self(lines)
    }

    /// Whether all six lines are yang.
    pub fn is_all_yang(&self) -> bool {
        self.0.iter().all(|l| *l)
    }

    /// Whether all six lines are yin.
    pub fn is_all_yin(&self) -> bool {
        self.0.iter().all(|l| !*l)
    }

    /// Every possible symbol, from `000000` to `111111`.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0u8..64).map(|bits| {
            let mut lines = [false; 6];
            for (i, line) in lines.iter_mut().enumerate() {
                *line = bits & (1 << (5 - i)) != 0;
            }
            Symbol(lines)
        })
    }

    /// Render the symbol as stacked text lines, top line first.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .rev()
            .map(|yang| if *yang { "━━━━━━━" } else { "━━━ ━━━" })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for yang in self.0 {
            write!(f, "{}", if yang { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for Symbol {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 6 {
            return Err(CoreError::InvalidSymbol(s.to_string()));
        }
        let mut lines = [false; 6];
        for (line, c) in lines.iter_mut().zip(&chars) {
            *line = match c {
                '1' => true,
                '0' => false,
                _ => return Err(CoreError::InvalidSymbol(s.to_string())),
            };
        }
        Ok(Self(lines))
    }
}

impl TryFrom<String> for Symbol {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_line() -> impl Strategy<Value = LineResult> {
        prop_oneof![
            Just(LineResult::OldYang),
            Just(LineResult::YoungYang),
            Just(LineResult::YoungYin),
            Just(LineResult::OldYin),
        ]
    }

    proptest! {
        #[test]
        fn derived_symbol_is_literal_concatenation(lines in proptest::array::uniform6(any_line())) {
            let symbol = Symbol::from_lines(&lines);
            let text = symbol.to_string();
            prop_assert_eq!(text.chars().count(), 6);
            prop_assert!(text.chars().all(|c| c == '0' || c == '1'));
            let expected: String = lines.iter().map(|l| l.digit()).collect();
            prop_assert_eq!(&text, &expected);
            prop_assert_eq!(text.parse::<Symbol>().unwrap(), symbol);
        }
    }

    #[test]
    fn example_scenario_symbol() {
        let lines = [
            LineResult::YoungYang,
            LineResult::YoungYin,
            LineResult::YoungYang,
            LineResult::OldYin,
            LineResult::YoungYang,
            LineResult::YoungYin,
        ];
        assert_eq!(Symbol::from_lines(&lines).to_string(), "101010");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("10101".parse::<Symbol>().is_err());
        assert!("1010102".parse::<Symbol>().is_err());
        assert!("10a010".parse::<Symbol>().is_err());
    }

    #[test]
    fn trigram_split() {
        let s: Symbol = "101010".parse().unwrap();
        assert_eq!(s.lower(), Trigram::Li);
        assert_eq!(s.upper(), Trigram::Kan);
        assert_eq!(Symbol::from_trigrams(Trigram::Li, Trigram::Kan), s);
    }

    #[test]
    fn all_symbols_are_distinct() {
        let all: std::collections::HashSet<Symbol> = Symbol::all().collect();
        assert_eq!(all.len(), 64);
    }

    #[test]
    fn flipping() {
        let s: Symbol = "111111".parse().unwrap();
        assert_eq!(s.flipped(&[0, 5]).to_string(), "011110");
        assert_eq!(s.flipped(&[9]), s);
    }

    #[test]
    fn render_puts_top_line_first() {
        let s: Symbol = "100000".parse().unwrap();
        let rendered = s.render();
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5], "━━━━━━━");
        assert_eq!(rows[0], "━━━ ━━━");
    }

    #[test]
    fn serde_as_string() {
        let s: Symbol = "010001".parse().unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"010001\"");
        let back: Symbol = serde_json::from_str("\"010001\"").unwrap();
        assert_eq!(back, s);
        assert!(serde_json::from_str::<Symbol>("\"01\"").is_err());
    }
}
