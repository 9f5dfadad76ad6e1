//! Net-net valuation of a single ticker.
//!
//! ```text
//! net_net_score     = market_cap / (current_assets - total_liabilities)
//! destination_price = current_price * (1 / net_net_score)
//! gain_value        = destination_price / current_price * 100
//! ```
//!
//! Every division is checked, so a zero denominator makes
//! the result absent instead of producing an infinity that would leak into
//! the exported sheet.

use tracing::debug;

use crate::provider::{Facet, MarketDataProvider};
use crate::{FinancialsSnapshot, StockValuation, Symbol, ValuationError};

pub const RECEIVABLES_WEIGHT: f64 = 0.75;
pub const INVENTORY_WEIGHT: f64 = 0.5;

/// Exclusive upper bounds for the obvious-buy indicator. Both inputs must
/// also be strictly positive.
pub const OBI_MAX_NET_NET_SCORE: f64 = 0.7;
pub const OBI_MAX_PE: f64 = 100.0;

/// How the current-assets figure is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CurrentAssetsPolicy {
    /// Use the reported `currentAssets` line verbatim.
    #[default]
    Reported,
    /// `cash_flow + receivables * 0.75 + inventory * 0.5`, falling back to
    /// the reported figure when any input is missing.
    Strict,
}

impl CurrentAssetsPolicy {
    pub const fn from_strict_flag(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Reported
        }
    }
}

/// Runs the valuation pipeline for one ticker at a time.
pub struct StockValuator<'a, P: ?Sized> {
    provider: &'a P,
    policy: CurrentAssetsPolicy,
}

impl<'a, P: MarketDataProvider + ?Sized> StockValuator<'a, P> {
    pub fn new(provider: &'a P, policy: CurrentAssetsPolicy) -> Self {
        Self { provider, policy }
    }

    pub const fn policy(&self) -> CurrentAssetsPolicy {
        self.policy
    }

    /// Evaluates `symbol`.
    ///
    /// Returns `Ok(None)` when financials are missing or when market cap,
    /// current assets or total liabilities cannot be determined. A missing
    /// company profile is an error. The returned record has `obi` unset.
    pub async fn evaluate(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<StockValuation>, ValuationError> {
        let stats = self.provider.key_stats(symbol).await?;

        let Some(financials) = self.provider.financials(symbol).await? else {
            debug!(ticker = %symbol, "no financials; skipping");
            return Ok(None);
        };

        let company = self.provider.company(symbol).await?.ok_or_else(|| {
            ValuationError::MissingFacet {
                symbol: symbol.clone(),
                facet: Facet::Company,
            }
        })?;

        let current_assets = self.current_assets(symbol, &financials).await?;
        let total_liabilities = financials.total_liabilities;
        let market_cap = stats.as_ref().and_then(|stats| stats.market_cap);

        let (Some(current_assets), Some(total_liabilities), Some(market_cap)) =
            (current_assets, total_liabilities, market_cap)
        else {
            debug!(
                ticker = %symbol,
                has_current_assets = current_assets.is_some(),
                has_total_liabilities = total_liabilities.is_some(),
                has_market_cap = market_cap.is_some(),
                "required balance-sheet inputs missing; skipping"
            );
            return Ok(None);
        };

        let score = net_net_score(market_cap, current_assets, total_liabilities);
        let current_price = self.provider.price(symbol).await?;
        let destination = destination_price(current_price, score);
        let gain = gain_value(destination, current_price);

        Ok(Some(StockValuation {
            ticker: company
                .symbol
                .unwrap_or_else(|| symbol.as_str().to_owned()),
            company_name: company.company_name,
            stock_market: company.exchange,
            country: company.country,
            sector: company.sector,
            market_cap,
            current_assets,
            total_liabilities,
            net_net_score: score,
            pe: stats.and_then(|stats| stats.pe_ratio),
            current_stock_price: current_price,
            destination_stock_price: destination,
            gain_value: gain,
            obi: None,
        }))
    }

    async fn current_assets(
        &self,
        symbol: &Symbol,
        financials: &FinancialsSnapshot,
    ) -> Result<Option<f64>, ValuationError> {
        match self.policy {
            CurrentAssetsPolicy::Reported => Ok(financials.current_assets),
            CurrentAssetsPolicy::Strict => {
                let cash_flow = self
                    .provider
                    .cash_flow(symbol)
                    .await?
                    .and_then(|snapshot| snapshot.cash_flow);
                Ok(strict_current_assets(cash_flow, financials))
            }
        }
    }
}

/// Liquidity-weighted current assets, or the reported figure when cash flow,
/// receivables or inventory is missing.
pub fn strict_current_assets(
    cash_flow: Option<f64>,
    financials: &FinancialsSnapshot,
) -> Option<f64> {
    match (cash_flow, financials.receivables, financials.inventory) {
        (Some(cash_flow), Some(receivables), Some(inventory)) => Some(
            cash_flow + receivables * RECEIVABLES_WEIGHT + inventory * INVENTORY_WEIGHT,
        ),
        _ => financials.current_assets,
    }
}

/// `None` when the net current asset value is zero.
pub fn net_net_score(market_cap: f64, current_assets: f64, total_liabilities: f64) -> Option<f64> {
    checked_div(market_cap, current_assets - total_liabilities)
}

pub fn destination_price(current_price: Option<f64>, net_net_score: Option<f64>) -> Option<f64> {
    let current_price = current_price?;
    checked_div(1.0, net_net_score?).map(|inverse| current_price * inverse)
}

pub fn gain_value(destination_price: Option<f64>, current_price: Option<f64>) -> Option<f64> {
    checked_div(destination_price?, current_price?).map(|ratio| ratio * 100.0)
}

/// Obvious-buy indicator. Three-valued: `None` when either input is missing.
pub fn classify_obi(pe: Option<f64>, net_net_score: Option<f64>) -> Option<bool> {
    let pe = pe?;
    let score = net_net_score?;
    Some(
        score > 0.0 && score < OBI_MAX_NET_NET_SCORE && pe > 0.0 && pe < OBI_MAX_PE,
    )
}

fn checked_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|quotient| quotient.is_finite())
}
