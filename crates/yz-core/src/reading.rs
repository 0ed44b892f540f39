//! A complete reading.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::casting::{CastMethod, CoinToss, cast_by_number};
use crate::catalog::{Catalog, HexagramDefinition};
use crate::engine::seeded_rng;
use crate::error::{CoreError, CoreResult};
use crate::line::LineResult;
use crate::resolve::{Resolution, resolve_lines, resolve_symbol};
use crate::transform::{ReadingGuide, TransformPolicy, Transformed, changing_positions, transform};

/// Discriminator for the generator used by [`TransformPolicy::RandomFlip`].
/// Tosses use 0-5, so 6 keeps the flip independent of every toss.
pub const TRANSFORM_DISCRIMINATOR: u64 = 6;

/// A resolved cast: primary hexagram, optional transformed hexagram, and
/// the guide for which texts to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// How the reading was cast.
    pub method: CastMethod,
    /// The calendar date of the cast.
    pub date: NaiveDate,
    /// The question asked.
    pub question: String,
    /// The six lines of a coin cast; `None` for a number cast.
    pub lines: Option<Vec<LineResult>>,
    /// The number supplied to a number cast.
    pub number: Option<u64>,
    /// Seed recorded for a number cast.
    pub seed: Option<u64>,
    /// The primary hexagram.
    pub primary: Resolution,
    /// The transformed hexagram, if any line changed.
    pub transformed: Option<Transformed>,
    /// Which texts to consult.
    pub guide: ReadingGuide,
}

impl Reading {
    /// Build a reading from six coin tosses.
    pub fn from_tosses(
        catalog: &Catalog,
        date: NaiveDate,
        question: &str,
        tosses: &[CoinToss],
        policy: TransformPolicy,
    ) -> CoreResult<Self> {
        let lines: Vec<LineResult> = tosses.iter().map(CoinToss::line).collect();
        Self::from_lines(catalog, date, question, lines, policy)
    }

    /// Build a reading from six recorded lines.
    pub fn from_lines(
        catalog: &Catalog,
        date: NaiveDate,
        question: &str,
        lines: Vec<LineResult>,
        policy: TransformPolicy,
    ) -> CoreResult<Self> {
        if lines.len() != 6 {
            return Err(CoreError::IncompleteCast(lines.len()));
        }
        let primary = resolve_lines(catalog, &lines)?;
        let mut rng = seeded_rng(date, question, TRANSFORM_DISCRIMINATOR);
        let transformed = transform(catalog, primary.symbol, Some(lines.as_slice()), policy, &mut rng)?;
        // The guide follows the old lines, whatever the display policy flipped.
        let guide = ReadingGuide::for_changes(&primary.symbol, &changing_positions(&lines));
        Ok(Self {
            method: CastMethod::ManualCoins,
            date,
            question: question.to_string(),
            lines: Some(lines),
            number: None,
            seed: None,
            primary,
            transformed,
            guide,
        })
    }

    /// Build a reading from a positive number.
    pub fn from_number(
        catalog: &Catalog,
        date: NaiveDate,
        question: &str,
        n: u64,
        policy: TransformPolicy,
    ) -> CoreResult<Self> {
        let cast = cast_by_number(catalog, n, date, question)?;
        let primary = resolve_symbol(catalog, cast.hexagram.symbol)?;
        let mut rng = seeded_rng(date, question, TRANSFORM_DISCRIMINATOR);
        let transformed = transform(catalog, primary.symbol, None, policy, &mut rng)?;
        let guide = ReadingGuide::for_changes(&primary.symbol, &[]);
        Ok(Self {
            method: CastMethod::NumberInput,
            date,
            question: question.to_string(),
            lines: None,
            number: Some(n),
            seed: Some(cast.seed),
            primary,
            transformed,
            guide,
        })
    }

    /// The primary hexagram definition.
    pub fn hexagram(&self) -> &HexagramDefinition {
        &self.primary.hexagram
    }

    /// The transformed hexagram definition, if any.
    pub fn transformed_hexagram(&self) -> Option<&HexagramDefinition> {
        self.transformed.as_ref().map(|t| &t.resolution.hexagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casting::cast_all;
    use crate::catalog::EXCERPT_SIZE;
    use crate::resolve::MatchKind;
    use LineResult::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn coin_reading_is_reproducible() {
        let catalog = Catalog::standard();
        let q = "我今年的事业运势如何？";
        let a = Reading::from_tosses(&catalog, day(), q, &cast_all(day(), q), TransformPolicy::default())
            .unwrap();
        let b = Reading::from_tosses(&catalog, day(), q, &cast_all(day(), q), TransformPolicy::default())
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.lines.as_ref().map(Vec::len), Some(6));
        assert_eq!(a.method, CastMethod::ManualCoins);
    }

    #[test]
    fn example_scenario_in_excerpt() {
        let catalog = Catalog::excerpt(EXCERPT_SIZE);
        let lines = vec![YoungYang, YoungYin, YoungYang, OldYin, YoungYang, YoungYin];
        let r = Reading::from_lines(&catalog, day(), "我今年的事业运势如何？", lines, TransformPolicy::ChangingLines)
            .unwrap();
        assert_eq!(r.primary.symbol.to_string(), "101010");
        assert!(matches!(r.primary.match_kind, MatchKind::Fallback(_)));
        assert_eq!(r.hexagram().name, "屯卦");
        assert_eq!(r.guide, ReadingGuide::ChangingLine { position: 3 });
    }

    #[test]
    fn number_reading_records_seed() {
        let catalog = Catalog::standard();
        let r = Reading::from_number(&catalog, day(), "问", 65, TransformPolicy::ChangingLines).unwrap();
        assert_eq!(r.hexagram().id, 1);
        assert!(r.seed.is_some());
        assert!(r.lines.is_none());
        assert!(r.transformed.is_none());
        assert_eq!(r.guide, ReadingGuide::PrimaryJudgment);
    }

    #[test]
    fn number_reading_with_random_flip() {
        let catalog = Catalog::standard();
        let r = Reading::from_number(&catalog, day(), "问", 1, TransformPolicy::RandomFlip).unwrap();
        let t = r.transformed_hexagram().unwrap();
        assert_ne!(t.symbol, r.hexagram().symbol);
        assert_eq!(r.guide, ReadingGuide::PrimaryJudgment);
    }

    #[test]
    fn random_flip_does_not_invent_changing_lines() {
        let catalog = Catalog::standard();
        let r = Reading::from_lines(&catalog, day(), "问", vec![YoungYang; 6], TransformPolicy::RandomFlip)
            .unwrap();
        assert!(r.transformed.is_some());
        assert_eq!(r.guide, ReadingGuide::PrimaryJudgment);

        let lines = vec![YoungYang, YoungYin, YoungYang, OldYin, YoungYang, YoungYin];
        let r = Reading::from_lines(&catalog, day(), "问", lines, TransformPolicy::RandomFlip).unwrap();
        assert_eq!(r.guide, ReadingGuide::ChangingLine { position: 3 });

        let r = Reading::from_number(&catalog, day(), "问", 5, TransformPolicy::RandomFlip).unwrap();
        assert_eq!(r.guide, ReadingGuide::PrimaryJudgment);
    }

    #[test]
    fn short_cast_is_rejected() {
        let catalog = Catalog::standard();
        let err = Reading::from_lines(&catalog, day(), "q", vec![OldYang], TransformPolicy::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::IncompleteCast(1)));
    }
}
