//! Changing lines and the transformed hexagram (变卦).
//!
//! The default policy flips exactly the old lines of a coin cast. The
//! random policy flips one line picked by a caller-supplied generator,
//! which is how the original web frontend drew its second figure.
//!
//! [`ReadingGuide`] follows Zhu Xi's rules for which texts to consult
//! given the number of changing lines.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::line::{LineResult, position_name};
use crate::resolve::{Resolution, resolve_symbol};
use crate::symbol::Symbol;

/// How the transformed hexagram is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformPolicy {
    /// Flip the old (changing) lines. No old lines, no transformed hexagram.
    #[default]
    ChangingLines,
    /// Flip one randomly chosen line.
    RandomFlip,
}

impl TransformPolicy {
    /// Parse a policy name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "changing" | "changing_lines" | "classical" => Some(Self::ChangingLines),
            "random" | "random_flip" => Some(Self::RandomFlip),
            _ => None,
        }
    }
}

/// A transformed hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformed {
    /// Positions flipped, bottom = 0, ascending.
    pub changed_positions: Vec<usize>,
    /// The resolved transformed hexagram.
    pub resolution: Resolution,
}

/// Positions of the old lines, ascending.
pub fn changing_positions(lines: &[LineResult]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.is_changing())
        .map(|(i, _)| i)
        .collect()
}

/// Derive the transformed hexagram from a primary symbol.
///
/// `lines` is the cast that produced `symbol`, or `None` for a number cast.
/// The generator is only drawn from under [`TransformPolicy::RandomFlip`].
pub fn transform<R: Rng>(
    catalog: &Catalog,
    symbol: Symbol,
    lines: Option<&[LineResult]>,
    policy: TransformPolicy,
    rng: &mut R,
) -> CoreResult<Option<Transformed>> {
    let positions = match policy {
        TransformPolicy::ChangingLines => lines.map(changing_positions).unwrap_or_default(),
        TransformPolicy::RandomFlip => vec![rng.random_range(0..6usize)],
    };
    if positions.is_empty() {
        return Ok(None);
    }
    let resolution = resolve_symbol(catalog, symbol.flipped(&positions))?;
    Ok(Some(Transformed {
        changed_positions: positions,
        resolution,
    }))
}

/// Which texts a reading should be read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ReadingGuide {
    /// No changing lines: the primary judgment.
    PrimaryJudgment,
    /// One changing line: that line of the primary hexagram.
    ChangingLine {
        /// The changing position.
        position: usize,
    },
    /// Two changing lines: both lines of the primary, the upper one leading.
    UpperChangingLine {
        /// The upper of the two changing positions.
        upper: usize,
        /// The lower of the two changing positions.
        lower: usize,
    },
    /// Three changing lines: primary and transformed judgments together.
    BothJudgments,
    /// Four changing lines: the lower of the two unchanged lines, read in
    /// the transformed hexagram.
    LowerUnchangedLine {
        /// The lower unchanged position.
        position: usize,
    },
    /// Five changing lines: the single unchanged line of the transformed
    /// hexagram.
    UnchangedLine {
        /// The unchanged position.
        position: usize,
    },
    /// Six changing lines on 乾 or 坤: the extra line text (用九 / 用六).
    AllLinesText {
        /// "用九" or "用六".
        label: String,
    },
    /// Six changing lines elsewhere: the transformed judgment.
    TransformedJudgment,
}

impl ReadingGuide {
    /// Pick the guide for a set of changing positions on a primary symbol.
    pub fn for_changes(primary: &Symbol, changed: &[usize]) -> Self {
        let unchanged: Vec<usize> = (0..6).filter(|p| !changed.contains(p)).collect();
        match changed {
            [] => Self::PrimaryJudgment,
            [p] => Self::ChangingLine { position: *p },
            [lower, upper] => Self::UpperChangingLine {
                upper: *upper,
                lower: *lower,
            },
            [_, _, _] => Self::BothJudgments,
            [_, _, _, _] => Self::LowerUnchangedLine {
                position: unchanged.first().copied().unwrap_or(0),
            },
            [_, _, _, _, _] => Self::UnchangedLine {
                position: unchanged.first().copied().unwrap_or(0),
            },
            _ if primary.is_all_yang() => Self::AllLinesText {
                label: "用九".to_string(),
            },
            _ if primary.is_all_yin() => Self::AllLinesText {
                label: "用六".to_string(),
            },
            _ => Self::TransformedJudgment,
        }
    }
}

impl std::fmt::Display for ReadingGuide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrimaryJudgment => write!(f, "无变爻，以本卦卦辞断之"),
            Self::ChangingLine { position } => {
                write!(f, "一爻变，以本卦{}之辞断之", position_name(*position))
            }
            Self::UpperChangingLine { upper, lower } => write!(
                f,
                "二爻变，以本卦{}、{}之辞断之，以上者{}为主",
                position_name(*lower),
                position_name(*upper),
                position_name(*upper)
            ),
            Self::BothJudgments => write!(f, "三爻变，以本卦与之卦卦辞合断"),
            Self::LowerUnchangedLine { position } => write!(
                f,
                "四爻变，以之卦不变之下爻{}断之",
                position_name(*position)
            ),
            Self::UnchangedLine { position } => {
                write!(f, "五爻变，以之卦不变之{}断之", position_name(*position))
            }
            Self::AllLinesText { label } => write!(f, "六爻皆变，以{label}断之"),
            Self::TransformedJudgment => write!(f, "六爻皆变，以之卦卦辞断之"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LineResult::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn flips_only_old_lines() {
        let catalog = Catalog::standard();
        let lines = [YoungYang, YoungYin, YoungYang, OldYin, YoungYang, YoungYin];
        let symbol = Symbol::from_lines(&lines);
        let mut rng = StdRng::seed_from_u64(1);
        let t = transform(
            &catalog,
            symbol,
            Some(&lines[..]),
            TransformPolicy::ChangingLines,
            &mut rng,
        )
        .unwrap()
        .unwrap();
        assert_eq!(t.changed_positions, vec![3]);
        assert_eq!(t.resolution.symbol.to_string(), "101110");
        assert_eq!(t.resolution.hexagram.name, "革卦");
    }

    #[test]
    fn no_old_lines_no_transform() {
        let catalog = Catalog::standard();
        let lines = [YoungYang; 6];
        let mut rng = StdRng::seed_from_u64(1);
        let t = transform(
            &catalog,
            Symbol::from_lines(&lines),
            Some(&lines[..]),
            TransformPolicy::ChangingLines,
            &mut rng,
        )
        .unwrap();
        assert!(t.is_none());
        let number = transform(
            &catalog,
            Symbol::from_lines(&lines),
            None,
            TransformPolicy::ChangingLines,
            &mut rng,
        )
        .unwrap();
        assert!(number.is_none());
    }

    #[test]
    fn random_flip_changes_one_line() {
        let catalog = Catalog::standard();
        let symbol: Symbol = "111111".parse().unwrap();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let ta = transform(&catalog, symbol, None, TransformPolicy::RandomFlip, &mut a)
            .unwrap()
            .unwrap();
        let tb = transform(&catalog, symbol, None, TransformPolicy::RandomFlip, &mut b)
            .unwrap()
            .unwrap();
        assert_eq!(ta, tb);
        assert_eq!(ta.changed_positions.len(), 1);
        let diff = symbol
            .lines()
            .iter()
            .zip(ta.resolution.symbol.lines())
            .filter(|(x, y)| **x != *y)
            .count();
        assert_eq!(diff, 1);
    }

    #[test]
    fn guide_table() {
        let s: Symbol = "101010".parse().unwrap();
        assert_eq!(ReadingGuide::for_changes(&s, &[]), ReadingGuide::PrimaryJudgment);
        assert_eq!(
            ReadingGuide::for_changes(&s, &[4]),
            ReadingGuide::ChangingLine { position: 4 }
        );
        assert_eq!(
            ReadingGuide::for_changes(&s, &[1, 3]),
            ReadingGuide::UpperChangingLine { upper: 3, lower: 1 }
        );
        assert_eq!(ReadingGuide::for_changes(&s, &[0, 2, 5]), ReadingGuide::BothJudgments);
        assert_eq!(
            ReadingGuide::for_changes(&s, &[0, 2, 3, 5]),
            ReadingGuide::LowerUnchangedLine { position: 1 }
        );
        assert_eq!(
            ReadingGuide::for_changes(&s, &[0, 1, 2, 3, 5]),
            ReadingGuide::UnchangedLine { position: 4 }
        );
        let all = [0, 1, 2, 3, 4, 5];
        assert_eq!(ReadingGuide::for_changes(&s, &all), ReadingGuide::TransformedJudgment);
        assert_eq!(
            ReadingGuide::for_changes(&"111111".parse().unwrap(), &all),
            ReadingGuide::AllLinesText {
                label: "用九".to_string()
            }
        );
    }

    #[test]
    fn guide_display() {
        let g = ReadingGuide::ChangingLine { position: 0 };
        assert_eq!(g.to_string(), "一爻变，以本卦初爻之辞断之");
    }

    #[test]
    fn parse_policy() {
        assert_eq!(TransformPolicy::parse("random"), Some(TransformPolicy::RandomFlip));
        assert_eq!(TransformPolicy::parse("classical"), Some(TransformPolicy::ChangingLines));
        assert_eq!(TransformPolicy::parse("x"), None);
    }
}
