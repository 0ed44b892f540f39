//! Error types for catalogs, casting, and resolution.

use thiserror::Error;

use crate::symbol::Symbol;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building catalogs or casting.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A symbol string was not six characters over `0` and `1`.
    #[error("invalid symbol \"{0}\": expected six characters of 0 or 1")]
    InvalidSymbol(String),

    /// A catalog must contain at least one hexagram.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// Two catalog entries share the same symbol.
    #[error("duplicate symbol {symbol} in catalog (entries {first} and {second})")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: Symbol,
        /// Id of the first entry carrying the symbol.
        first: u8,
        /// Id of the second entry carrying the symbol.
        second: u8,
    },

    /// Two catalog entries share the same id.
    #[error("duplicate hexagram id {0} in catalog")]
    DuplicateId(u8),

    /// Number-input casting needs a positive number.
    #[error("number must be at least 1, got {0}")]
    InvalidNumber(u64),

    /// A cast was resolved before all six lines were recorded.
    #[error("cast is incomplete: {0} of 6 lines recorded")]
    IncompleteCast(usize),

    /// A custom catalog could not be parsed.
    #[error("invalid catalog json: {0}")]
    CatalogJson(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(CoreError::InvalidNumber(0).to_string(), "number must be at least 1, got 0");
        assert_eq!(
            CoreError::IncompleteCast(4).to_string(),
            "cast is incomplete: 4 of 6 lines recorded"
        );
        let json = serde_json::from_str::<u8>("x").unwrap_err();
        let err: CoreError = json.into();
        assert!(err.to_string().starts_with("invalid catalog json:"));
    }
}
