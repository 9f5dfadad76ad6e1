//! Market-data provider contract.
//!
//! Every per-ticker call answers with one of three outcomes:
//!
//! | Result | Meaning |
//! |--------|---------|
//! | `Ok(Some(facet))` | Provider returned data |
//! | `Ok(None)` | Provider answered but had nothing for this ticker |
//! | `Err(SourceError)` | Transport, auth or decoding failure |
//!
//! The valuation pipeline decides per facet whether an empty answer is
//! fatal for the ticker; errors always skip the ticker.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{CashFlowSnapshot, CompanyProfile, FinancialsSnapshot, KeyStats, Symbol};

/// Boxed future returned by [`MarketDataProvider`] methods.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SourceError>> + Send + 'a>>;

/// One independently fetchable category of provider data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Symbols,
    KeyStats,
    Financials,
    CashFlow,
    Company,
    Price,
}

impl Facet {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Symbols => "symbols",
            Self::KeyStats => "key_stats",
            Self::Financials => "financials",
            Self::CashFlow => "cash_flow",
            Self::Company => "company",
            Self::Price => "price",
        }
    }
}

impl Display for Facet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    Unauthorized,
    NotFound,
    RateLimited,
    InvalidResponse,
    Internal,
}

/// Structured provider error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unauthorized,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::Unauthorized => "source.unauthorized",
            SourceErrorKind::NotFound => "source.not_found",
            SourceErrorKind::RateLimited => "source.rate_limited",
            SourceErrorKind::InvalidResponse => "source.invalid_response",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Market-data provider contract.
///
/// | Method | Facet |
/// |--------|-------|
/// | [`symbols`](MarketDataProvider::symbols) | Tradable ticker universe |
/// | [`key_stats`](MarketDataProvider::key_stats) | Market cap, P/E |
/// | [`financials`](MarketDataProvider::financials) | Balance-sheet snapshot |
/// | [`cash_flow`](MarketDataProvider::cash_flow) | Cash-flow snapshot |
/// | [`company`](MarketDataProvider::company) | Name, exchange, country, sector |
/// | [`price`](MarketDataProvider::price) | Current trading price |
pub trait MarketDataProvider: Send + Sync {
    /// Returns every tradable symbol the provider knows about.
    fn symbols<'a>(&'a self) -> ProviderFuture<'a, Vec<Symbol>>;

    fn key_stats<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<KeyStats>>;

    fn financials<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> ProviderFuture<'a, Option<FinancialsSnapshot>>;

    fn cash_flow<'a>(&'a self, symbol: &'a Symbol)
        -> ProviderFuture<'a, Option<CashFlowSnapshot>>;

    fn company<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<CompanyProfile>>;

    fn price<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<f64>>;
}
