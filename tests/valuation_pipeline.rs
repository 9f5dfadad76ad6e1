//! Behavior tests for single-ticker valuation.
//!
//! These tests drive `StockValuator` against an in-memory provider and check
//! which facets decide whether a ticker yields a record.

mod support;

use netnet_core::{
    classify_obi, CompanyProfile, CurrentAssetsPolicy, Facet, FinancialsSnapshot, KeyStats,
    SourceError, SourceErrorKind, StockValuator, ValuationError,
};
use support::{approx, symbol, FakeProvider, FakeTicker};

// =============================================================================
// Scenario tickers
// =============================================================================

#[tokio::test]
async fn ordinary_ticker_gets_score_target_price_and_gain() {
    // Given: AAA with 1000 current assets, 400 liabilities, 5000 market cap
    let provider = FakeProvider::new().with_ticker(
        "AAA",
        FakeTicker::complete("AAA", 1_000.0, 400.0, 5_000.0, 20.0, 50.0),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    // When: It is evaluated in non-strict mode
    let record = valuator
        .evaluate(&symbol("AAA"))
        .await
        .expect("evaluation should succeed")
        .expect("AAA should produce a record");

    // Then: The score is 5000 / 600 and the target price follows from it
    assert_eq!(record.ticker, "AAA");
    assert_eq!(record.current_assets, 1_000.0);
    assert_eq!(record.total_liabilities, 400.0);
    assert_eq!(record.market_cap, 5_000.0);
    assert!(approx(record.net_net_score, 5_000.0 / 600.0));
    assert_eq!(record.pe, Some(20.0));
    assert_eq!(record.current_stock_price, Some(50.0));
    assert!(approx(record.destination_stock_price, 50.0 * 600.0 / 5_000.0));
    assert!(approx(record.gain_value, 12.0));
    assert_eq!(record.company_name.as_deref(), Some("AAA Holdings"));
    assert_eq!(record.stock_market.as_deref(), Some("NYSE"));

    // And: OBI is left for the batch, and would be false (score > 0.7)
    assert_eq!(record.obi, None);
    assert_eq!(classify_obi(record.pe, record.net_net_score), Some(false));
}

#[tokio::test]
async fn zero_market_cap_gives_zero_score_and_no_target_price() {
    // Given: BBB whose market cap is exactly zero
    let provider = FakeProvider::new().with_ticker(
        "BBB",
        FakeTicker::complete("BBB", 1_000.0, 400.0, 0.0, 15.0, 8.0),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    // When: It is evaluated
    let record = valuator
        .evaluate(&symbol("BBB"))
        .await
        .expect("zero score must not fault")
        .expect("BBB should produce a record");

    // Then: The score is zero and nothing is inverted
    assert_eq!(record.net_net_score, Some(0.0));
    assert_eq!(record.destination_stock_price, None);
    assert_eq!(record.gain_value, None);
    assert_eq!(record.current_stock_price, Some(8.0));
}

#[tokio::test]
async fn zero_net_current_assets_keeps_ticker_with_absent_score() {
    // Given: Current assets exactly equal total liabilities
    let provider = FakeProvider::new().with_ticker(
        "EVEN",
        FakeTicker::complete("EVEN", 700.0, 700.0, 3_000.0, 12.0, 4.0),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    // When: It is evaluated
    let record = valuator
        .evaluate(&symbol("EVEN"))
        .await
        .expect("zero denominator must not fault")
        .expect("ticker is retained");

    // Then: Every score-derived field is absent, nothing is infinite
    assert_eq!(record.net_net_score, None);
    assert_eq!(record.destination_stock_price, None);
    assert_eq!(record.gain_value, None);
    assert_eq!(classify_obi(record.pe, record.net_net_score), None);
}

#[tokio::test]
async fn liabilities_above_assets_give_negative_score_and_no_obi() {
    let provider = FakeProvider::new().with_ticker(
        "DEBT",
        FakeTicker::complete("DEBT", 100.0, 400.0, 150.0, 10.0, 2.0),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    let record = valuator
        .evaluate(&symbol("DEBT"))
        .await
        .expect("evaluation should succeed")
        .expect("ticker is retained");

    assert!(approx(record.net_net_score, -0.5));
    assert!(approx(record.destination_stock_price, -4.0));
    assert_eq!(classify_obi(record.pe, record.net_net_score), Some(false));
}

// =============================================================================
// Missing facets
// =============================================================================

#[tokio::test]
async fn missing_financials_yield_no_record_and_stop_early() {
    // Given: A ticker whose financials facet is empty
    let provider = FakeProvider::new().with_ticker(
        "NOFIN",
        FakeTicker::complete("NOFIN", 1.0, 1.0, 1.0, 1.0, 1.0).with_financials(None),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    // When: It is evaluated
    let outcome = valuator
        .evaluate(&symbol("NOFIN"))
        .await
        .expect("missing financials is not an error");

    // Then: There is no record, and neither company nor price was requested
    assert_eq!(outcome, None);
    assert!(provider.requested("NOFIN", Facet::KeyStats));
    assert!(!provider.requested("NOFIN", Facet::Company));
    assert!(!provider.requested("NOFIN", Facet::Price));
}

#[tokio::test]
async fn missing_price_keeps_record_without_target_price() {
    // Given: A ticker whose price facet has no price
    let provider = FakeProvider::new().with_ticker(
        "NOPX",
        FakeTicker::complete("NOPX", 2_000.0, 500.0, 600.0, 9.0, 0.0).with_price(None),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    // When: It is evaluated
    let record = valuator
        .evaluate(&symbol("NOPX"))
        .await
        .expect("evaluation should succeed")
        .expect("record is still produced");

    // Then: Price-derived fields are absent, the rest is populated
    assert_eq!(record.current_stock_price, None);
    assert_eq!(record.destination_stock_price, None);
    assert_eq!(record.gain_value, None);
    assert!(approx(record.net_net_score, 0.4));
    assert_eq!(record.pe, Some(9.0));
    assert_eq!(record.sector.as_deref(), Some("Industrials"));
}

#[tokio::test]
async fn empty_stats_leave_market_cap_unknown_and_drop_ticker() {
    let provider = FakeProvider::new().with_ticker(
        "NOSTAT",
        FakeTicker::complete("NOSTAT", 1_000.0, 100.0, 1.0, 1.0, 1.0).with_stats(None),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    let outcome = valuator
        .evaluate(&symbol("NOSTAT"))
        .await
        .expect("empty stats is not an error");

    assert_eq!(outcome, None);
}

#[tokio::test]
async fn missing_total_liabilities_drops_ticker() {
    let provider = FakeProvider::new().with_ticker(
        "NOLIAB",
        FakeTicker::complete("NOLIAB", 1.0, 1.0, 1.0, 1.0, 1.0).with_financials(Some(
            FinancialsSnapshot::new(Some(1_000.0), None, None, None),
        )),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    let outcome = valuator
        .evaluate(&symbol("NOLIAB"))
        .await
        .expect("missing liabilities is not an error");

    assert_eq!(outcome, None);
}

#[tokio::test]
async fn missing_pe_keeps_record_with_absent_pe() {
    let provider = FakeProvider::new().with_ticker(
        "NOPE",
        FakeTicker::complete("NOPE", 1_000.0, 0.0, 500.0, 1.0, 3.0)
            .with_stats(Some(KeyStats::new(Some(500.0), None))),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    let record = valuator
        .evaluate(&symbol("NOPE"))
        .await
        .expect("evaluation should succeed")
        .expect("record is produced");

    assert_eq!(record.pe, None);
    assert!(approx(record.net_net_score, 0.5));
    assert_eq!(classify_obi(record.pe, record.net_net_score), None);
}

#[tokio::test]
async fn missing_company_profile_is_an_error() {
    // Given: Financials exist but the company facet is empty
    let provider = FakeProvider::new().with_ticker(
        "NOCO",
        FakeTicker::complete("NOCO", 1_000.0, 100.0, 50.0, 5.0, 1.0).with_company(None),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    // When: It is evaluated
    let error = valuator
        .evaluate(&symbol("NOCO"))
        .await
        .expect_err("company profile is required once financials exist");

    // Then: The error names the facet so the batch can log it
    assert_eq!(
        error,
        ValuationError::MissingFacet {
            symbol: symbol("NOCO"),
            facet: Facet::Company,
        }
    );
    assert_eq!(error.code(), "valuation.missing_facet");
}

#[tokio::test]
async fn provider_failure_propagates_as_source_error() {
    let provider = FakeProvider::new().with_ticker(
        "BOOM",
        FakeTicker::complete("BOOM", 1_000.0, 100.0, 50.0, 5.0, 1.0)
            .failing_on(Facet::Price, SourceError::unavailable("connection reset")),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    let error = valuator
        .evaluate(&symbol("BOOM"))
        .await
        .expect_err("transport failure must surface");

    match error {
        ValuationError::Source(source) => assert_eq!(source.kind(), SourceErrorKind::Unavailable),
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Ticker identity
// =============================================================================

#[tokio::test]
async fn ticker_comes_from_provider_canonical_symbol() {
    let mut company = FakeTicker::complete("X", 1.0, 1.0, 1.0, 1.0, 1.0)
        .company
        .expect("complete fixture has a company");
    company.symbol = Some(String::from("BRK-A"));

    let provider = FakeProvider::new().with_ticker(
        "brk.a",
        FakeTicker::complete("BRK.A", 1_000.0, 100.0, 50.0, 5.0, 1.0).with_company(Some(company)),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    let record = valuator
        .evaluate(&symbol("brk.a"))
        .await
        .expect("evaluation should succeed")
        .expect("record is produced");

    assert_eq!(record.ticker, "BRK-A");
}

#[tokio::test]
async fn ticker_falls_back_to_requested_symbol() {
    let provider = FakeProvider::new().with_ticker(
        "ANON",
        FakeTicker::complete("ANON", 1_000.0, 100.0, 50.0, 5.0, 1.0)
            .with_company(Some(CompanyProfile::default())),
    );
    let valuator = StockValuator::new(&provider, CurrentAssetsPolicy::Reported);

    let record = valuator
        .evaluate(&symbol("ANON"))
        .await
        .expect("evaluation should succeed")
        .expect("record is produced");

    assert_eq!(record.ticker, "ANON");
    assert_eq!(record.company_name, None);
}

// =============================================================================
// Current assets policies
// =============================================================================

#[tokio::test]
async fn strict_mode_weights_cash_flow_receivables_and_inventory() {
    // Given: Full liquidity data
    let provider = FakeProvider::new().with_ticker(
        "LIQ",
        FakeTicker::complete("LIQ", 1.0, 1.0, 1.0, 1.0, 1.0)
            .with_stats(Some(KeyStats::new(Some(100.0), Some(8.0))))
            .with_financials(Some(FinancialsSnapshot::new(
                Some(10_000.0),
                Some(300.0),
                Some(400.0),
                Some(200.0),
            )))
            .with_cash_flow(Some(100.0)),
    );

    // When: It is evaluated in strict mode
    let record = StockValuator::new(&provider, CurrentAssetsPolicy::Strict)
        .evaluate(&symbol("LIQ"))
        .await
        .expect("evaluation should succeed")
        .expect("record is produced");

    // Then: 100 + 400 * 0.75 + 200 * 0.5 = 500, instead of the reported 10000
    assert_eq!(record.current_assets, 500.0);
    assert!(approx(record.net_net_score, 0.5));
    assert!(provider.requested("LIQ", Facet::CashFlow));
}

#[tokio::test]
async fn reported_mode_never_requests_cash_flow() {
    let provider = FakeProvider::new().with_ticker(
        "LIQ",
        FakeTicker::complete("LIQ", 1_000.0, 100.0, 50.0, 5.0, 1.0).with_cash_flow(Some(1.0)),
    );

    let record = StockValuator::new(&provider, CurrentAssetsPolicy::Reported)
        .evaluate(&symbol("LIQ"))
        .await
        .expect("evaluation should succeed")
        .expect("record is produced");

    assert_eq!(record.current_assets, 1_000.0);
    assert!(!provider.requested("LIQ", Facet::CashFlow));
}

#[tokio::test]
async fn strict_and_reported_agree_without_liquidity_data() {
    // Given: No cash flow, receivables or inventory
    let ticker = FakeTicker::complete("PLAIN", 1_200.0, 200.0, 400.0, 11.0, 6.0);
    let provider = FakeProvider::new().with_ticker("PLAIN", ticker);

    // When: Both policies evaluate the same ticker
    let strict = StockValuator::new(&provider, CurrentAssetsPolicy::Strict)
        .evaluate(&symbol("PLAIN"))
        .await
        .expect("strict evaluation should succeed");
    let reported = StockValuator::new(&provider, CurrentAssetsPolicy::Reported)
        .evaluate(&symbol("PLAIN"))
        .await
        .expect("reported evaluation should succeed");

    // Then: Both degrade to the reported current assets
    assert_eq!(strict, reported);
    assert_eq!(strict.map(|record| record.current_assets), Some(1_200.0));
}

#[tokio::test]
async fn strict_mode_falls_back_when_cash_flow_facet_is_empty() {
    let provider = FakeProvider::new().with_ticker(
        "NOCF",
        FakeTicker::complete("NOCF", 1.0, 1.0, 1.0, 1.0, 1.0).with_financials(Some(
            FinancialsSnapshot::new(Some(900.0), Some(100.0), Some(400.0), Some(200.0)),
        )),
    );

    let record = StockValuator::new(&provider, CurrentAssetsPolicy::Strict)
        .evaluate(&symbol("NOCF"))
        .await
        .expect("evaluation should succeed")
        .expect("record is produced");

    assert_eq!(record.current_assets, 900.0);
}

#[tokio::test]
async fn strict_mode_without_any_current_assets_drops_ticker() {
    let provider = FakeProvider::new().with_ticker(
        "BARE",
        FakeTicker::complete("BARE", 1.0, 1.0, 1.0, 1.0, 1.0)
            .with_financials(Some(FinancialsSnapshot::new(None, Some(100.0), Some(1.0), None)))
            .with_cash_flow(Some(5.0)),
    );

    let outcome = StockValuator::new(&provider, CurrentAssetsPolicy::Strict)
        .evaluate(&symbol("BARE"))
        .await
        .expect("evaluation should succeed");

    assert_eq!(outcome, None);
}
