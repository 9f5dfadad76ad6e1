use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::provider::{Facet, MarketDataProvider, ProviderFuture, SourceError};
use crate::{
    CashFlowSnapshot, CompanyProfile, FinancialsSnapshot, KeyStats, Symbol, ValidationError,
};

pub const CLOUD_BASE_URL: &str = "https://cloud.iexapis.com/stable";
pub const SANDBOX_BASE_URL: &str = "https://sandbox.iexapis.com/stable";

/// Connection settings for IEX Cloud. Every request carries `token`.
#[derive(Clone, PartialEq, Eq)]
pub struct IexConfig {
    token: String,
    base_url: String,
    timeout_ms: Option<u64>,
}

impl IexConfig {
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into().trim().to_owned();
        if token.is_empty() {
            return Err(ValidationError::EmptyToken);
        }
        Ok(Self {
            token,
            base_url: String::from(CLOUD_BASE_URL),
            timeout_ms: None,
        })
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl {
                value: base_url.as_ref().to_owned(),
            });
        }
        self.base_url = trimmed.to_owned();
        Ok(self)
    }

    pub fn sandbox(self) -> Self {
        Self {
            base_url: String::from(SANDBOX_BASE_URL),
            ..self
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout_ms(&self) -> Option<u64> {
        self.timeout_ms
    }
}

impl Debug for IexConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IexConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// IEX Cloud REST adapter.
#[derive(Clone)]
pub struct IexCloudAdapter {
    config: IexConfig,
    http_client: Arc<dyn HttpClient>,
}

impl IexCloudAdapter {
    pub fn new(config: IexConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: IexConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn config(&self) -> &IexConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}?token={}",
            self.config.base_url,
            path,
            urlencoding::encode(&self.config.token)
        )
    }

    fn stock_path(symbol: &Symbol, resource: &str) -> String {
        format!("/stock/{}/{}", urlencoding::encode(symbol.as_str()), resource)
    }

    /// Fetches a path and returns its JSON body, or `None` when the provider
    /// answered with nothing (`null`, `{}`, `[]` or an empty body).
    async fn fetch_json(&self, facet: Facet, path: &str) -> Result<Option<Value>, SourceError> {
        let request = HttpRequest::get(self.endpoint(path))
            .with_header("Accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!("iex {facet} transport error: {}", error.message()))
            } else {
                SourceError::internal(format!("iex {facet} transport error: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            return Err(status_error(facet, response.status, &response.body));
        }

        let body = response.body.trim();
        if body.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(body).map_err(|e| {
            SourceError::invalid_response(format!("failed to parse iex {facet} response: {e}"))
        })?;

        Ok(non_empty(value))
    }

    async fn fetch_facet<T: DeserializeOwned>(
        &self,
        facet: Facet,
        path: &str,
    ) -> Result<Option<T>, SourceError> {
        match self.fetch_json(facet, path).await? {
            Some(value) => decode(facet, value).map(Some),
            None => Ok(None),
        }
    }
}

impl MarketDataProvider for IexCloudAdapter {
    fn symbols<'a>(&'a self) -> ProviderFuture<'a, Vec<Symbol>> {
        Box::pin(async move {
            let entries: Vec<IexSymbolEntry> = self
                .fetch_facet(Facet::Symbols, "/ref-data/symbols")
                .await?
                .unwrap_or_default();

            let symbols = entries
                .into_iter()
                .filter_map(|entry| {
                    if entry.is_enabled == Some(false) {
                        debug!(symbol = %entry.symbol, "skipping disabled symbol");
                        return None;
                    }
                    match Symbol::parse(&entry.symbol) {
                        Ok(symbol) => Some(symbol),
                        Err(error) => {
                            debug!(symbol = %entry.symbol, %error, "skipping unparseable symbol");
                            None
                        }
                    }
                })
                .collect();

            Ok(symbols)
        })
    }

    fn key_stats<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<KeyStats>> {
        Box::pin(async move {
            let payload: Option<IexStatsPayload> = self
                .fetch_facet(Facet::KeyStats, &Self::stock_path(symbol, "stats"))
                .await?;
            Ok(payload.map(|stats| KeyStats::new(stats.marketcap, stats.pe_ratio)))
        })
    }

    fn financials<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> ProviderFuture<'a, Option<FinancialsSnapshot>> {
        Box::pin(async move {
            let payload: Option<IexFinancialsResponse> = self
                .fetch_facet(Facet::Financials, &Self::stock_path(symbol, "financials"))
                .await?;

            Ok(payload
                .and_then(|response| response.financials.into_iter().next())
                .map(normalize_financials))
        })
    }

    fn cash_flow<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> ProviderFuture<'a, Option<CashFlowSnapshot>> {
        Box::pin(async move {
            let payload: Option<IexCashFlowResponse> = self
                .fetch_facet(Facet::CashFlow, &Self::stock_path(symbol, "cash-flow"))
                .await?;

            Ok(payload
                .and_then(|response| response.cashflow.into_iter().next())
                .map(|statement| CashFlowSnapshot::new(statement.cash_flow)))
        })
    }

    fn company<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<CompanyProfile>> {
        Box::pin(async move {
            let payload: Option<IexCompanyPayload> = self
                .fetch_facet(Facet::Company, &Self::stock_path(symbol, "company"))
                .await?;

            Ok(payload.map(|company| CompanyProfile {
                symbol: company.symbol.and_then(non_blank),
                company_name: company.company_name.and_then(non_blank),
                exchange: company.exchange.and_then(non_blank),
                country: company.country.and_then(non_blank),
                sector: company.sector.and_then(non_blank),
            }))
        })
    }

    fn price<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<f64>> {
        Box::pin(async move {
            let value = self
                .fetch_json(Facet::Price, &Self::stock_path(symbol, "price"))
                .await?;

            // Anything but a finite number counts as no price.
            Ok(value
                .and_then(|value| value.as_f64())
                .filter(|price| price.is_finite()))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexSymbolEntry {
    symbol: String,
    #[serde(default)]
    is_enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexStatsPayload {
    #[serde(default)]
    marketcap: Option<f64>,
    #[serde(default)]
    pe_ratio: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct IexFinancialsResponse {
    #[serde(default)]
    financials: Vec<IexFinancialStatement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexFinancialStatement {
    #[serde(default)]
    report_date: Option<String>,
    #[serde(default)]
    current_assets: Option<f64>,
    #[serde(default)]
    total_liabilities: Option<f64>,
    #[serde(default)]
    receivables: Option<f64>,
    #[serde(default)]
    inventory: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct IexCashFlowResponse {
    #[serde(default)]
    cashflow: Vec<IexCashFlowStatement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexCashFlowStatement {
    #[serde(default)]
    cash_flow: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexCompanyPayload {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    sector: Option<String>,
}

fn normalize_financials(statement: IexFinancialStatement) -> FinancialsSnapshot {
    let snapshot = FinancialsSnapshot::new(
        statement.current_assets,
        statement.total_liabilities,
        statement.receivables,
        statement.inventory,
    );
    match statement.report_date {
        Some(report_date) => snapshot.with_report_date(report_date),
        None => snapshot,
    }
}

fn status_error(facet: Facet, status: u16, body: &str) -> SourceError {
    let detail = body.trim();
    let message = if detail.is_empty() {
        format!("iex {facet} returned status {status}")
    } else {
        format!("iex {facet} returned status {status}: {detail}")
    };

    match status {
        401 | 402 | 403 => SourceError::unauthorized(message),
        404 => SourceError::not_found(message),
        429 => SourceError::rate_limited(message),
        _ => SourceError::unavailable(message),
    }
}

fn non_empty(value: Value) -> Option<Value> {
    match &value {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        _ => Some(value),
    }
}

fn decode<T: DeserializeOwned>(facet: Facet, value: Value) -> Result<T, SourceError> {
    serde_json::from_value(value).map_err(|e| {
        SourceError::invalid_response(format!("unexpected iex {facet} payload: {e}"))
    })
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
