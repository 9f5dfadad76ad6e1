use serde::{Deserialize, Serialize};

/// One evaluated ticker, i.e. one row of the exported table.
///
/// Market cap, current assets and total liabilities are plain numbers: a
/// ticker missing any of them never becomes a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockValuation {
    pub ticker: String,
    pub company_name: Option<String>,
    pub stock_market: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub market_cap: f64,
    pub current_assets: f64,
    pub total_liabilities: f64,
    pub net_net_score: Option<f64>,
    pub pe: Option<f64>,
    pub current_stock_price: Option<f64>,
    pub destination_stock_price: Option<f64>,
    pub gain_value: Option<f64>,
    /// Filled in by the batch driver once every ticker has been evaluated.
    pub obi: Option<bool>,
}

impl StockValuation {
    /// Header row of the exported sheet, in column order.
    pub const COLUMNS: [&'static str; 14] = [
        "Ticker",
        "Company Name",
        "Stock Market",
        "Country",
        "Sector",
        "Market Cap",
        "Current Assets",
        "Total Liabilities",
        "Net Net Score",
        "PE",
        "Current Stock Price",
        "Destination Stock Price",
        "Gain Value",
        "OBI",
    ];
}
