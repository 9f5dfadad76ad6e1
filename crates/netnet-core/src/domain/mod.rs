//! # Domain Models
//!
//! Typed views of the per-ticker data the valuation pipeline consumes and
//! the record it produces.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`KeyStats`] | Market cap and P/E from the key-stats facet |
//! | [`FinancialsSnapshot`] | Latest balance-sheet line items |
//! | [`CashFlowSnapshot`] | Latest reported cash flow |
//! | [`CompanyProfile`] | Descriptive company fields |
//! | [`StockValuation`] | One row of the exported table |
//!
//! Numeric provider fields are `Option<f64>`. A missing or non-finite value
//! is `None`; zero is never used to mean "no data".

mod facets;
mod record;
mod symbol;

pub use facets::{CashFlowSnapshot, CompanyProfile, FinancialsSnapshot, KeyStats};
pub use record::StockValuation;
pub use symbol::Symbol;

/// Drops NaN and infinities coming from provider payloads.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}
