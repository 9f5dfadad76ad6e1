//! Sequential batch evaluation over a ticker list.

use tracing::{info, warn};

use crate::provider::MarketDataProvider;
use crate::valuation::{classify_obi, CurrentAssetsPolicy, StockValuator};
use crate::{StockValuation, Symbol};

pub const DEFAULT_PROGRESS_EVERY: usize = 100;

/// A record plus the position it was produced in, before sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRow {
    pub index: usize,
    pub record: StockValuation,
}

/// Final table: OBI classified, ordered by ticker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationTable {
    rows: Vec<ValuationRow>,
}

impl ValuationTable {
    /// Builds a table from records in evaluation order.
    pub fn from_records(records: Vec<StockValuation>) -> Self {
        let mut rows = records
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                record.obi = classify_obi(record.pe, record.net_net_score);
                ValuationRow { index, record }
            })
            .collect::<Vec<_>>();

        // Byte-wise, so case-sensitive.
        rows.sort_by(|left, right| left.record.ticker.cmp(&right.record.ticker));
        Self { rows }
    }

    pub fn rows(&self) -> &[ValuationRow] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &StockValuation> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub recorded: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub table: ValuationTable,
    pub summary: BatchSummary,
}

/// Evaluates tickers one after another. A failing ticker is logged and
/// skipped; it never stops the run.
pub struct BatchDriver<'a, P: ?Sized> {
    valuator: StockValuator<'a, P>,
    progress_every: usize,
}

impl<'a, P: MarketDataProvider + ?Sized> BatchDriver<'a, P> {
    pub fn new(provider: &'a P, policy: CurrentAssetsPolicy) -> Self {
        Self {
            valuator: StockValuator::new(provider, policy),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    /// `0` disables progress lines.
    pub fn with_progress_every(mut self, progress_every: usize) -> Self {
        self.progress_every = progress_every;
        self
    }

    pub async fn run(&self, tickers: &[Symbol]) -> BatchOutcome {
        let total = tickers.len();
        let mut summary = BatchSummary::default();
        let mut records = Vec::new();

        info!(total, policy = ?self.valuator.policy(), "fetching stocks' information");

        for (position, symbol) in tickers.iter().enumerate() {
            summary.attempted += 1;

            match self.valuator.evaluate(symbol).await {
                Ok(Some(record)) => {
                    summary.recorded += 1;
                    records.push(record);
                }
                Ok(None) => summary.skipped += 1,
                Err(error) => {
                    summary.failed += 1;
                    warn!(
                        ticker = %symbol,
                        code = error.code(),
                        retryable = error.retryable(),
                        "{symbol} error: {error}"
                    );
                }
            }

            let done = position + 1;
            if self.progress_every > 0 && (done % self.progress_every == 0 || done == total) {
                info!(
                    done,
                    total,
                    recorded = summary.recorded,
                    failed = summary.failed,
                    "progress"
                );
            }
        }

        BatchOutcome {
            table: ValuationTable::from_records(records),
            summary,
        }
    }
}
