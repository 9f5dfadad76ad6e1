//! Ticker universe retrieval and ordering.

use tracing::info;

use crate::provider::{MarketDataProvider, SourceError};
use crate::Symbol;

/// Order in which the batch walks the universe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UniverseOrder {
    #[default]
    AsListed,
    /// Random order, so a restarted run does not retry the same early
    /// tickers first.
    Shuffled,
}

/// The list of tickers a batch run will evaluate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerUniverse {
    symbols: Vec<Symbol>,
}

impl TickerUniverse {
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Fetches every tradable symbol from `provider`.
    pub async fn fetch<P>(provider: &P, order: UniverseOrder) -> Result<Self, SourceError>
    where
        P: MarketDataProvider + ?Sized,
    {
        Self::fetch_with_rng(provider, order, &mut fastrand::Rng::new()).await
    }

    pub async fn fetch_with_rng<P>(
        provider: &P,
        order: UniverseOrder,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, SourceError>
    where
        P: MarketDataProvider + ?Sized,
    {
        let universe = Self::from_symbols(provider.symbols().await?).ordered_with(order, rng);
        info!(tickers = universe.len(), ?order, "ticker universe loaded");
        Ok(universe)
    }

    pub fn ordered(self, order: UniverseOrder) -> Self {
        self.ordered_with(order, &mut fastrand::Rng::new())
    }

    pub fn ordered_with(mut self, order: UniverseOrder, rng: &mut fastrand::Rng) -> Self {
        if order == UniverseOrder::Shuffled {
            self.shuffle_with(rng);
        }
        self
    }

    pub fn shuffle_with(&mut self, rng: &mut fastrand::Rng) {
        rng.shuffle(&mut self.symbols);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}
