use serde::{Deserialize, Serialize};

use super::finite;

/// Key statistics facet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyStats {
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
}

impl KeyStats {
    pub fn new(market_cap: Option<f64>, pe_ratio: Option<f64>) -> Self {
        Self {
            market_cap: finite(market_cap),
            pe_ratio: finite(pe_ratio),
        }
    }
}

/// Most recent financial-statement line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialsSnapshot {
    pub report_date: Option<String>,
    pub current_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub receivables: Option<f64>,
    pub inventory: Option<f64>,
}

impl FinancialsSnapshot {
    pub fn new(
        current_assets: Option<f64>,
        total_liabilities: Option<f64>,
        receivables: Option<f64>,
        inventory: Option<f64>,
    ) -> Self {
        Self {
            report_date: None,
            current_assets: finite(current_assets),
            total_liabilities: finite(total_liabilities),
            receivables: finite(receivables),
            inventory: finite(inventory),
        }
    }

    pub fn with_report_date(mut self, report_date: impl Into<String>) -> Self {
        self.report_date = Some(report_date.into());
        self
    }
}

/// Most recent cash-flow statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSnapshot {
    pub cash_flow: Option<f64>,
}

impl CashFlowSnapshot {
    pub fn new(cash_flow: Option<f64>) -> Self {
        Self {
            cash_flow: finite(cash_flow),
        }
    }
}

/// Descriptive company fields.
///
/// `symbol` is the provider's canonical spelling of the ticker, which is what
/// ends up in the exported `Ticker` column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub exchange: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
}
