//! Number-input casting.
//!
//! A positive number `n` selects catalog entry `(n - 1) mod size`. A seed
//! is still derived from the day, the question, and `n` itself, and kept on
//! the result, but it plays no part in the selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, HexagramDefinition};
use crate::engine::divination_seed;
use crate::error::{CoreError, CoreResult};

/// The result of a number cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberCast {
    /// The number supplied.
    pub number: u64,
    /// Zero-based catalog index selected.
    pub index: usize,
    /// The seed recorded for the day, question, and number.
    pub seed: u64,
    /// The selected hexagram.
    pub hexagram: HexagramDefinition,
}

/// Map a positive number onto a catalog of `size` entries.
pub fn number_index(n: u64, size: usize) -> CoreResult<usize> {
    if n == 0 {
        return Err(CoreError::InvalidNumber(n));
    }
    if size == 0 {
        return Err(CoreError::EmptyCatalog);
    }
    Ok(((n - 1) % size as u64) as usize)
}

/// Select a hexagram by number.
pub fn cast_by_number(
    catalog: &Catalog,
    n: u64,
    date: NaiveDate,
    question: &str,
) -> CoreResult<NumberCast> {
    let index = number_index(n, catalog.len())?;
    let hexagram = catalog.get(index).cloned().ok_or(CoreError::EmptyCatalog)?;
    let seed = divination_seed(date, question, n);
    tracing::debug!(n, index, hexagram = %hexagram.name, "number cast");
    Ok(NumberCast {
        number: n,
        index,
        seed,
        hexagram,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EXCERPT_SIZE;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn zero_is_rejected() {
        assert!(matches!(number_index(0, 64), Err(CoreError::InvalidNumber(0))));
        assert!(cast_by_number(&Catalog::standard(), 0, day(), "q").is_err());
    }

    #[test]
    fn boundaries() {
        for size in [1usize, EXCERPT_SIZE, 64] {
            assert_eq!(number_index(1, size).unwrap(), 0);
            assert_eq!(number_index(size as u64, size).unwrap(), size - 1);
            assert_eq!(
                number_index(1, size).unwrap(),
                number_index(size as u64 + 1, size).unwrap()
            );
        }
    }

    #[test]
    fn selection_ignores_question() {
        let catalog = Catalog::standard();
        let a = cast_by_number(&catalog, 17, day(), "甲").unwrap();
        let b = cast_by_number(&catalog, 17, day(), "乙").unwrap();
        assert_eq!(a.hexagram, b.hexagram);
        assert_eq!(a.hexagram.name, "随卦");
        assert_ne!(a.seed, b.seed);
    }

    #[test]
    fn seed_depends_on_number() {
        let catalog = Catalog::standard();
        let a = cast_by_number(&catalog, 5, day(), "问").unwrap();
        let b = cast_by_number(&catalog, 17, day(), "问").unwrap();
        assert_ne!(a.seed, b.seed);
        assert_eq!(a.seed, divination_seed(day(), "问", 5));
        assert_ne!(a.seed, divination_seed(day(), "问", 0));
    }

    #[test]
    fn large_numbers_wrap() {
        let catalog = Catalog::excerpt(EXCERPT_SIZE);
        let cast = cast_by_number(&catalog, u64::MAX, day(), "").unwrap();
        assert_eq!(cast.index, ((u64::MAX - 1) % 12) as usize);
    }
}
