//! The eight trigrams (八卦).
//!
//! Every hexagram is a lower trigram (lines 1-3) beneath an upper trigram
//! (lines 4-6). Line order inside a trigram is bottom to top.

use serde::{Deserialize, Serialize};

/// One of the eight three-line figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigram {
    /// 乾, heaven: three solid lines.
    Qian,
    /// 兑, lake: open at the top.
    Dui,
    /// 离, fire: broken in the middle.
    Li,
    /// 震, thunder: solid at the bottom.
    Zhen,
    /// 巽, wind: broken at the bottom.
    Xun,
    /// 坎, water: solid in the middle.
    Kan,
    /// 艮, mountain: solid at the top.
    Gen,
    /// 坤, earth: three broken lines.
    Kun,
}

impl Trigram {
    /// All trigrams in the Fu Xi order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Qian,
            Self::Dui,
            Self::Li,
            Self::Zhen,
            Self::Xun,
            Self::Kan,
            Self::Gen,
            Self::Kun,
        ]
    }

    /// Lines from bottom to top, `true` for yang.
    pub fn lines(self) -> [bool; 3] {
        match self {
            Self::Qian => [true, true, true],
            Self::Dui => [true, true, false],
            Self::Li => [true, false, true],
            Self::Zhen => [true, false, false],
            Self::Xun => [false, true, true],
            Self::Kan => [false, true, false],
            Self::Gen => [false, false, true],
            Self::Kun => [false, false, false],
        }
    }

    /// Find the trigram with the given lines (bottom to top).
    pub fn from_lines(lines: [bool; 3]) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.lines() == lines)
            .unwrap_or(Self::Kun)
    }

    /// The Chinese name of the trigram.
    pub fn chinese_name(self) -> &'static str {
        match self {
            Self::Qian => "乾",
            Self::Dui => "兑",
            Self::Li => "离",
            Self::Zhen => "震",
            Self::Xun => "巽",
            Self::Kan => "坎",
            Self::Gen => "艮",
            Self::Kun => "坤",
        }
    }

    /// The natural image the trigram stands for.
    pub fn image(self) -> &'static str {
        match self {
            Self::Qian => "天",
            Self::Dui => "泽",
            Self::Li => "火",
            Self::Zhen => "雷",
            Self::Xun => "风",
            Self::Kan => "水",
            Self::Gen => "山",
            Self::Kun => "地",
        }
    }
}

impl std::fmt::Display for Trigram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}（{}）", self.chinese_name(), self.image())
    }
}
