//! Line classifications.
//!
//! Three coins are tossed per line. The number of coins landing yang-side
//! decides the line: three is old yang, two young yang, one young yin, none
//! old yin. Old lines are the changing lines of classical practice.

use serde::{Deserialize, Serialize};

/// The classification of one line of a hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineResult {
    /// Three yang coins: a solid line that changes (老阳).
    OldYang,
    /// Two yang coins: a stable solid line (少阳).
    YoungYang,
    /// One yang coin: a stable broken line (少阴).
    YoungYin,
    /// No yang coins: a broken line that changes (老阴).
    OldYin,
}

impl LineResult {
    /// Classify a toss by its count of yang-side coins (0-3).
    pub fn from_yang_count(count: u8) -> Option<Self> {
        match count {
            3 => Some(Self::OldYang),
            2 => Some(Self::YoungYang),
            1 => Some(Self::YoungYin),
            0 => Some(Self::OldYin),
            _ => None,
        }
    }

    /// Whether the line is solid (yang).
    pub fn is_yang(self) -> bool {
        matches!(self, Self::OldYang | Self::YoungYang)
    }

    /// The symbol digit for this line: `'1'` for yang, `'0'` for yin.
    pub fn digit(self) -> char {
        if self.is_yang() { '1' } else { '0' }
    }

    /// Whether this is an old (changing) line.
    pub fn is_changing(self) -> bool {
        matches!(self, Self::OldYang | Self::OldYin)
    }

    /// The traditional Chinese name.
    pub fn chinese_name(self) -> &'static str {
        match self {
            Self::OldYang => "老阳",
            Self::YoungYang => "少阳",
            Self::YoungYin => "少阴",
            Self::OldYin => "老阴",
        }
    }

    /// Parse a line from its English or Chinese name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "old_yang" | "老阳" => Some(Self::OldYang),
            "young_yang" | "少阳" => Some(Self::YoungYang),
            "young_yin" | "少阴" => Some(Self::YoungYin),
            "old_yin" | "老阴" => Some(Self::OldYin),
            _ => None,
        }
    }
}

impl std::fmt::Display for LineResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chinese_name())
    }
}

/// Name of a line position (0 = bottom), e.g. "初爻" or "上爻".
pub fn position_name(position: usize) -> &'static str {
    match position {
        0 => "初爻",
        1 => "二爻",
        2 => "三爻",
        3 => "四爻",
        4 => "五爻",
        _ => "上爻",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yang_count_mapping() {
        assert_eq!(LineResult::from_yang_count(3), Some(LineResult::OldYang));
        assert_eq!(LineResult::from_yang_count(2), Some(LineResult::YoungYang));
        assert_eq!(LineResult::from_yang_count(1), Some(LineResult::YoungYin));
        assert_eq!(LineResult::from_yang_count(0), Some(LineResult::OldYin));
        assert_eq!(LineResult::from_yang_count(4), None);
    }

    #[test]
    fn digits() {
        assert_eq!(LineResult::OldYang.digit(), '1');
        assert_eq!(LineResult::YoungYang.digit(), '1');
        assert_eq!(LineResult::YoungYin.digit(), '0');
        assert_eq!(LineResult::OldYin.digit(), '0');
    }

    #[test]
    fn only_old_lines_change() {
        assert!(LineResult::OldYang.is_changing());
        assert!(LineResult::OldYin.is_changing());
        assert!(!LineResult::YoungYang.is_changing());
        assert!(!LineResult::YoungYin.is_changing());
    }

    #[test]
    fn parse_names() {
        assert_eq!(LineResult::parse("old yang"), Some(LineResult::OldYang));
        assert_eq!(LineResult::parse("YOUNG-YIN"), Some(LineResult::YoungYin));
        assert_eq!(LineResult::parse("老阴"), Some(LineResult::OldYin));
        assert_eq!(LineResult::parse("sideways"), None);
    }

    #[test]
    fn serde_uses_screaming_case() {
        let json = serde_json::to_string(&LineResult::OldYang).unwrap();
        assert_eq!(json, "\"OLD_YANG\"");
    }
}
