use thiserror::Error;

use crate::domain::Symbol;
use crate::provider::{Facet, SourceError};

/// Validation and contract errors exposed by `netnet-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("api token cannot be empty")]
    EmptyToken,
    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
}

/// Failure while evaluating a single ticker.
///
/// The batch driver logs these and moves on to the next ticker.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValuationError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{facet} data missing for '{symbol}'")]
    MissingFacet { symbol: Symbol, facet: Facet },
}

impl ValuationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Source(error) => error.code(),
            Self::MissingFacet { .. } => "valuation.missing_facet",
        }
    }

    /// Whether a later run could succeed for the same ticker. Nothing
    /// retries within a run.
    pub fn retryable(&self) -> bool {
        match self {
            Self::Source(error) => error.retryable(),
            Self::MissingFacet { .. } => false,
        }
    }
}

/// Spreadsheet export failures. These are fatal for a run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("output base name cannot be empty")]
    EmptyBaseName,

    #[error("table has {rows} rows, more than a worksheet can hold")]
    TooManyRows { rows: usize },

    #[error("failed to format export date: {0}")]
    DateFormat(#[from] time::error::Format),

    /// Also covers file-system failures while saving.
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
