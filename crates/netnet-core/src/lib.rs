//! # Netnet Core
//!
//! Graham-style net-net screening over IEX Cloud data.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | IEX Cloud adapter |
//! | [`batch`] | Sequential batch driver and final table |
//! | [`domain`] | Facets, symbols and the valuation record |
//! | [`error`] | Core error types |
//! | [`export`] | Dated `.xlsx` export |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`provider`] | Market-data provider contract |
//! | [`universe`] | Ticker universe retrieval and ordering |
//! | [`valuation`] | Net-net score, target price and OBI classification |
//!
//! ## Flow
//!
//! ```text
//! TickerUniverse ──▶ BatchDriver ──▶ StockValuator (per ticker)
//!                        │                 │
//!                        │                 ▼
//!                        │           MarketDataProvider (IEX Cloud)
//!                        ▼
//!                  ValuationTable ──▶ export_table (.xlsx)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use netnet_core::{
//!     export_table, today_local, BatchDriver, CurrentAssetsPolicy, IexCloudAdapter, IexConfig,
//!     TickerUniverse, UniverseOrder,
//! };
//!
//! let adapter = IexCloudAdapter::new(IexConfig::new(token)?);
//! let universe = TickerUniverse::fetch(&adapter, UniverseOrder::Shuffled).await?;
//! let outcome = BatchDriver::new(&adapter, CurrentAssetsPolicy::Reported)
//!     .run(universe.symbols())
//!     .await;
//! let path = export_table(&outcome.table, "stocks_info", today_local())?;
//! ```

pub mod adapters;
pub mod batch;
pub mod domain;
pub mod error;
pub mod export;
pub mod http_client;
pub mod provider;
pub mod universe;
pub mod valuation;

pub use adapters::{IexCloudAdapter, IexConfig};

pub use batch::{BatchDriver, BatchOutcome, BatchSummary, ValuationRow, ValuationTable};

pub use domain::{
    CashFlowSnapshot, CompanyProfile, FinancialsSnapshot, KeyStats, StockValuation, Symbol,
};

pub use error::{ExportError, ValidationError, ValuationError};

pub use export::{dated_file_name, export_table, today_local, DEFAULT_OUTPUT_NAME};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use provider::{Facet, MarketDataProvider, ProviderFuture, SourceError, SourceErrorKind};

pub use universe::{TickerUniverse, UniverseOrder};

pub use valuation::{classify_obi, CurrentAssetsPolicy, StockValuator};
