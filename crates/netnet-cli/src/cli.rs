//! Command-line arguments.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--iex-token` | `$IEX_TOKEN` | IEX Cloud API token |
//! | `--output` | `stocks_info` | Output base name; `_<YYYY_MM_DD>.xlsx` is appended |
//! | `--OBI-strict [BOOL]` | `false` | Liquidity-weighted current assets |
//! | `--shuffle` | `false` | Walk the universe in random order |
//! | `--sandbox` | `false` | Use the IEX sandbox environment |
//! | `--base-url` | cloud | Override the API base url |
//! | `--timeout-ms` | none | Per-request timeout |
//! | `--progress-every` | `100` | Log progress every N tickers (`0` disables) |
//! | `--log-level` | `info` | Base log level (`RUST_LOG` wins) |
//! | `--log-format` | `pretty` | `pretty` or `json` |
//!
//! The single-dash spellings `-iex-token`, `-output` and `-OBI-strict` are
//! accepted too.
//!
//! `--OBI-strict` takes an optional value, so a symbol placed right after a
//! bare `--OBI-strict` is read as that value and rejected. Put symbols first,
//! or write `--OBI-strict=true`.
//!
//! ```bash
//! netnet -iex-token pk_xxx -output screens/deep_value -OBI-strict true
//! netnet --iex-token pk_xxx --shuffle
//! netnet --iex-token pk_xxx AAPL MSFT GE
//! netnet --iex-token pk_xxx AAPL MSFT --OBI-strict
//! ```

use std::ffi::OsString;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use netnet_core::batch::DEFAULT_PROGRESS_EVERY;
use netnet_core::DEFAULT_OUTPUT_NAME;

const LEGACY_FLAGS: [&str; 3] = ["-iex-token", "-output", "-OBI-strict"];

#[derive(Debug, Parser)]
#[command(
    name = "netnet",
    author,
    version,
    about = "Net-net deep-value screen over IEX Cloud data",
    long_about = "Fetches key stats, financials, company info and price for every listed \
ticker, computes the Net Net Score, a target price and the OBI flag, and writes the \
surviving tickers to a dated .xlsx file."
)]
pub struct Cli {
    /// IEX Cloud API token.
    #[arg(long = "iex-token", env = "IEX_TOKEN", hide_env_values = true)]
    pub iex_token: String,

    /// Output base file name.
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    pub output: String,

    /// Compute current assets as cash flow + 0.75 * receivables + 0.5 * inventory.
    ///
    /// Accepts an optional boolean value (`--OBI-strict`, `--OBI-strict=false`).
    /// Put symbols before this flag or use `=` when passing a value.
    #[arg(
        long = "OBI-strict",
        visible_alias = "obi-strict",
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
        action = ArgAction::Set
    )]
    pub obi_strict: bool,

    /// Shuffle the ticker universe before evaluating.
    #[arg(long, default_value_t = false)]
    pub shuffle: bool,

    /// Use the IEX sandbox environment.
    #[arg(long, default_value_t = false, conflicts_with = "base_url")]
    pub sandbox: bool,

    /// Override the API base url.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds. Requests are unbounded by default.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Log a progress line every N tickers.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    pub progress_every: usize,

    /// Base log level.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Evaluate only these symbols instead of the full universe.
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Rewrites `-iex-token`, `-output` and `-OBI-strict` (optionally with
/// `=value`) to their double-dash form.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str().and_then(legacy_to_long) {
            Some(long) => OsString::from(long),
            None => arg,
        })
        .collect()
}

fn legacy_to_long(arg: &str) -> Option<String> {
    LEGACY_FLAGS
        .iter()
        .any(|flag| {
            arg.strip_prefix(flag)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('='))
        })
        .then(|| format!("-{arg}"))
}
