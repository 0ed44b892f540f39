//! Casting methods.

pub mod coins;
pub mod number;

use serde::{Deserialize, Serialize};

pub use coins::{Coin, CoinToss, cast_all, toss_coins};
pub use number::{NumberCast, cast_by_number, number_index};

/// How a reading is cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CastMethod {
    /// Six tosses of three coins.
    #[default]
    ManualCoins,
    /// A positive number picks a hexagram directly.
    NumberInput,
}

impl CastMethod {
    /// Parse a method name. Accepts `coins`, `manual`, `number`, and the
    /// serialized forms.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "coins" | "coin" | "manual" | "manual_coins" | "手动摇卦" => Some(Self::ManualCoins),
            "number" | "num" | "number_input" | "数字起卦" => Some(Self::NumberInput),
            _ => None,
        }
    }
}

impl std::fmt::Display for CastMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ManualCoins => write!(f, "MANUAL_COINS"),
            Self::NumberInput => write!(f, "NUMBER_INPUT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_methods() {
        assert_eq!(CastMethod::parse("coins"), Some(CastMethod::ManualCoins));
        assert_eq!(CastMethod::parse("NUMBER_INPUT"), Some(CastMethod::NumberInput));
        assert_eq!(CastMethod::parse("数字起卦"), Some(CastMethod::NumberInput));
        assert_eq!(CastMethod::parse("tarot"), None);
    }

    #[test]
    fn display_matches_serde() {
        for m in [CastMethod::ManualCoins, CastMethod::NumberInput] {
            assert_eq!(serde_json::to_string(&m).unwrap(), format!("\"{m}\""));
        }
    }
}
