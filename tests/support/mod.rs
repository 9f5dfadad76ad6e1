//! In-memory provider shared by the behavior tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use netnet_core::{
    CashFlowSnapshot, CompanyProfile, Facet, FinancialsSnapshot, KeyStats, MarketDataProvider,
    ProviderFuture, SourceError, Symbol,
};

/// Canned facets for one ticker.
#[derive(Debug, Clone, Default)]
pub struct FakeTicker {
    pub stats: Option<KeyStats>,
    pub financials: Option<FinancialsSnapshot>,
    pub cash_flow: Option<CashFlowSnapshot>,
    pub company: Option<CompanyProfile>,
    pub price: Option<f64>,
    pub failure: Option<(Facet, SourceError)>,
}

impl FakeTicker {
    /// A ticker with every facet populated.
    pub fn complete(
        symbol: &str,
        current_assets: f64,
        total_liabilities: f64,
        market_cap: f64,
        pe: f64,
        price: f64,
    ) -> Self {
        Self {
            stats: Some(KeyStats::new(Some(market_cap), Some(pe))),
            financials: Some(FinancialsSnapshot::new(
                Some(current_assets),
                Some(total_liabilities),
                None,
                None,
            )),
            cash_flow: None,
            company: Some(CompanyProfile {
                symbol: Some(symbol.to_owned()),
                company_name: Some(format!("{symbol} Holdings")),
                exchange: Some(String::from("NYSE")),
                country: Some(String::from("US")),
                sector: Some(String::from("Industrials")),
            }),
            price: Some(price),
            failure: None,
        }
    }

    pub fn with_stats(mut self, stats: Option<KeyStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_financials(mut self, financials: Option<FinancialsSnapshot>) -> Self {
        self.financials = financials;
        self
    }

    pub fn with_cash_flow(mut self, cash_flow: Option<f64>) -> Self {
        self.cash_flow = Some(CashFlowSnapshot::new(cash_flow));
        self
    }

    pub fn with_company(mut self, company: Option<CompanyProfile>) -> Self {
        self.company = company;
        self
    }

    pub fn with_price(mut self, price: Option<f64>) -> Self {
        self.price = price;
        self
    }

    pub fn failing_on(mut self, facet: Facet, error: SourceError) -> Self {
        self.failure = Some((facet, error));
        self
    }
}

/// Serves [`FakeTicker`]s and records every facet request.
#[derive(Default)]
pub struct FakeProvider {
    tickers: HashMap<String, FakeTicker>,
    universe: Vec<Symbol>,
    calls: Mutex<Vec<(String, Facet)>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticker(mut self, symbol: &str, ticker: FakeTicker) -> Self {
        let parsed = Symbol::parse(symbol).expect("fixture symbols are valid");
        self.universe.push(parsed.clone());
        self.tickers.insert(parsed.as_str().to_owned(), ticker);
        self
    }

    pub fn universe(&self) -> Vec<Symbol> {
        self.universe.clone()
    }

    pub fn calls(&self) -> Vec<(String, Facet)> {
        self.calls.lock().expect("call log should not be poisoned").clone()
    }

    pub fn requested(&self, symbol: &str, facet: Facet) -> bool {
        self.calls()
            .iter()
            .any(|(called, called_facet)| called == symbol && *called_facet == facet)
    }

    fn facet<T>(
        &self,
        symbol: &Symbol,
        facet: Facet,
        pick: impl FnOnce(&FakeTicker) -> Option<T>,
    ) -> Result<Option<T>, SourceError> {
        self.calls
            .lock()
            .expect("call log should not be poisoned")
            .push((symbol.as_str().to_owned(), facet));

        let ticker = self
            .tickers
            .get(symbol.as_str())
            .ok_or_else(|| SourceError::not_found(format!("Unknown symbol {symbol}")))?;

        match &ticker.failure {
            Some((failing, error)) if *failing == facet => Err(error.clone()),
            _ => Ok(pick(ticker)),
        }
    }
}

impl MarketDataProvider for FakeProvider {
    fn symbols<'a>(&'a self) -> ProviderFuture<'a, Vec<Symbol>> {
        let symbols = self.universe.clone();
        Box::pin(async move { Ok(symbols) })
    }

    fn key_stats<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<KeyStats>> {
        let result = self.facet(symbol, Facet::KeyStats, |ticker| ticker.stats.clone());
        Box::pin(async move { result })
    }

    fn financials<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> ProviderFuture<'a, Option<FinancialsSnapshot>> {
        let result = self.facet(symbol, Facet::Financials, |ticker| ticker.financials.clone());
        Box::pin(async move { result })
    }

    fn cash_flow<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> ProviderFuture<'a, Option<CashFlowSnapshot>> {
        let result = self.facet(symbol, Facet::CashFlow, |ticker| ticker.cash_flow.clone());
        Box::pin(async move { result })
    }

    fn company<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<CompanyProfile>> {
        let result = self.facet(symbol, Facet::Company, |ticker| ticker.company.clone());
        Box::pin(async move { result })
    }

    fn price<'a>(&'a self, symbol: &'a Symbol) -> ProviderFuture<'a, Option<f64>> {
        let result = self.facet(symbol, Facet::Price, |ticker| ticker.price);
        Box::pin(async move { result })
    }
}

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("fixture symbols are valid")
}

pub fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|actual| (actual - expected).abs() < 1e-9)
}
