//! The screening run: universe, batch evaluation, export.

use std::path::PathBuf;

use netnet_core::{
    export_table, today_local, BatchDriver, BatchSummary, CurrentAssetsPolicy, IexCloudAdapter,
    IexConfig, MarketDataProvider, Symbol, TickerUniverse, UniverseOrder,
};
use tracing::info;

use crate::cli::Cli;
use crate::error::CliError;

#[derive(Debug)]
pub struct ScreenReport {
    pub output: PathBuf,
    pub summary: BatchSummary,
}

pub async fn run(cli: &Cli) -> Result<ScreenReport, CliError> {
    let adapter = IexCloudAdapter::new(iex_config(cli)?);
    let tickers = resolve_tickers(cli, &adapter).await?;

    let policy = CurrentAssetsPolicy::from_strict_flag(cli.obi_strict);
    let outcome = BatchDriver::new(&adapter, policy)
        .with_progress_every(cli.progress_every)
        .run(&tickers)
        .await;

    let summary = outcome.summary;
    info!(
        attempted = summary.attempted,
        recorded = summary.recorded,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch complete"
    );

    let output = export_table(&outcome.table, &cli.output, today_local())?;
    Ok(ScreenReport { output, summary })
}

fn iex_config(cli: &Cli) -> Result<IexConfig, CliError> {
    let mut config = IexConfig::new(cli.iex_token.as_str())?.with_timeout_ms(cli.timeout_ms);
    if cli.sandbox {
        config = config.sandbox();
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    Ok(config)
}

async fn resolve_tickers<P>(cli: &Cli, provider: &P) -> Result<Vec<Symbol>, CliError>
where
    P: MarketDataProvider + ?Sized,
{
    let order = if cli.shuffle {
        UniverseOrder::Shuffled
    } else {
        UniverseOrder::AsListed
    };

    let universe = if cli.symbols.is_empty() {
        TickerUniverse::fetch(provider, order).await?
    } else {
        let symbols = cli
            .symbols
            .iter()
            .map(|raw| Symbol::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        TickerUniverse::from_symbols(symbols).ordered(order)
    };

    Ok(universe.into_symbols())
}
