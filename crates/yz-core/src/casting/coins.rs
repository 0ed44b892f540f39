//! Three-coin tosses.
//!
//! Toss `i` (the number of lines already recorded) draws three coins from a
//! generator seeded with `(date, question, i)`, so replaying a toss always
//! produces the same line.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{divination_seed, seeded_rng};
use crate::line::LineResult;

/// One coin face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coin {
    /// The yin face.
    Yin,
    /// The yang face.
    Yang,
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yin => write!(f, "阴"),
            Self::Yang => write!(f, "阳"),
        }
    }
}

/// The outcome of tossing three coins once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinToss {
    /// Zero-based toss index (the line position).
    pub index: usize,
    /// The three coin faces in draw order.
    pub coins: [Coin; 3],
    /// The seed the draw was made from.
    pub seed: u64,
}

impl CoinToss {
    /// Number of yang faces.
    pub fn yang_count(&self) -> u8 {
        self.coins.iter().filter(|c| **c == Coin::Yang).count() as u8
    }

    /// The line this toss produces.
    pub fn line(&self) -> LineResult {
        // Three coins never show more than three yang faces.
        LineResult::from_yang_count(self.yang_count()).unwrap_or(LineResult::OldYang)
    }
}

/// Toss three coins for line `index`.
pub fn toss_coins(date: NaiveDate, question: &str, index: usize) -> CoinToss {
    let seed = divination_seed(date, question, index as u64);
    let mut rng = seeded_rng(date, question, index as u64);
    let coins = [(); 3].map(|_| {
        if rng.random_range(0..2u8) == 1 {
            Coin::Yang
        } else {
            Coin::Yin
        }
    });
    CoinToss { index, coins, seed }
}

/// Toss all six lines in order.
pub fn cast_all(date: NaiveDate, question: &str) -> [CoinToss; 6] {
    std::array::from_fn(|i| toss_coins(date, question, i))
}
