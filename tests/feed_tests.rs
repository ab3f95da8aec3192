// Behaviour of `OracleFeed::fetch`: caching, per-symbol fallback and
// batch-level failures.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use oracle_watch::error::Error;
use oracle_watch::feed::{FeedTarget, OracleFeed};
use oracle_watch::types::PriceRecord;

#[tokio::test(start_paused = true)]
async fn second_fetch_within_ttl_hits_cache() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);
    let target = target(&["BTC", "ETH"]);

    let first = feed.fetch(&target).await.unwrap();
    let calls = oracle.calls();
    assert!(calls > 0);

    tokio::time::advance(Duration::from_secs(29)).await;
    let second = feed.fetch(&target).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(oracle.calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn fetch_after_ttl_goes_back_to_network() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);
    let target = target(&["BTC"]);

    let first = feed.fetch(&target).await.unwrap();
    assert_eq!(first[0].price, "65432.1");
    let calls = oracle.calls();

    oracle.set_price("BTC", 7_000_000_000_000);
    tokio::time::advance(Duration::from_secs(30)).await;

    let second = feed.fetch(&target).await.unwrap();
    assert!(oracle.calls() > calls);
    assert_eq!(second[0].price, "70000.0");
}

#[tokio::test(start_paused = true)]
async fn slow_batch_expires_one_ttl_after_it_started() {
    let oracle = MockOracle::standard();
    oracle.set_latency(Duration::from_millis(500));
    let feed = feed_with(&oracle);
    let target = target(&["BTC"]);

    feed.fetch(&target).await.unwrap();
    let calls = oracle.calls();

    // Already 1s into the TTL when the batch finished.
    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(!feed.is_cached(&target));
    feed.fetch(&target).await.unwrap();
    assert_eq!(oracle.calls(), calls * 2);
}

#[tokio::test(start_paused = true)]
async fn live_feed_is_normalized() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);

    let records = feed.fetch(&target(&["BTC", "DOT"])).await.unwrap();

    assert_eq!(records[0], PriceRecord {
        symbol: "BTC".to_string(),
        price: "65432.1".to_string(),
        last_updated: "2023-11-14 22:13:20 UTC".to_string(),
        exists: true,
        is_active: true,
    });
    assert_eq!(records[1].symbol, "DOT");
    assert_eq!(records[1].price, "4.5");
    assert!(records[1].exists);
    assert!(!records[1].is_active);
}

#[tokio::test(start_paused = true)]
async fn missing_feed_yields_placeholder() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);

    let records = feed.fetch(&target(&["SOL"])).await.unwrap();

    assert_eq!(records, vec![PriceRecord::placeholder("SOL")]);
    assert_eq!(records[0].price, "0");
    assert_eq!(records[0].last_updated, "N/A");
    // Only the existence check is issued for a missing feed.
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn one_failing_symbol_does_not_spoil_the_batch() {
    let oracle = MockOracle::standard();
    oracle.fail("ETH");
    oracle.fail_price("DOT");
    let feed = feed_with(&oracle);

    let records = feed.fetch(&target(&["BTC", "ETH", "DOT"])).await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(records[0].is_live());
    assert_eq!(records[0].price, "65432.1");
    assert_eq!(records[1], PriceRecord::placeholder("ETH"));
    assert_eq!(records[2], PriceRecord::placeholder("DOT"));
}

#[tokio::test(start_paused = true)]
async fn invalidate_forces_network_call() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);
    let target = target(&["BTC"]);

    feed.fetch(&target).await.unwrap();
    let calls = oracle.calls();
    assert!(feed.is_cached(&target));

    feed.invalidate(&target);
    assert!(!feed.is_cached(&target));

    feed.fetch(&target).await.unwrap();
    assert_eq!(oracle.calls(), calls * 2);
}

#[tokio::test(start_paused = true)]
async fn symbol_order_shares_cache_entry() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);

    feed.fetch(&target(&["BTC", "ETH"])).await.unwrap();
    let calls = oracle.calls();

    let reordered = feed.fetch(&target(&["ETH", "BTC"])).await.unwrap();
    assert_eq!(oracle.calls(), calls);
    assert_eq!(reordered[0].symbol, "ETH");
    assert_eq!(reordered[1].symbol, "BTC");
    assert_eq!(feed.cache().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn different_address_is_not_served_from_cache() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);

    feed.fetch(&target(&["BTC"])).await.unwrap();
    let calls = oracle.calls();

    let elsewhere = FeedTarget::new(Some(other_address()), Some(symbols(&["BTC"])));
    feed.fetch(&elsewhere).await.unwrap();
    assert!(oracle.calls() > calls);
    assert_eq!(feed.cache().len(), 2);
}

#[tokio::test]
async fn missing_provider_fails_batch() {
    let feed = OracleFeed::new(None, Duration::from_secs(30));
    let err = feed.fetch(&target(&["BTC"])).await.unwrap_err();
    assert!(matches!(err, Error::ProviderUnavailable));
    assert_eq!(err.to_string(), "Provider not available");
}

#[tokio::test]
async fn missing_address_fails_batch() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);

    let err = feed.fetch(&FeedTarget::new(None, None)).await.unwrap_err();
    assert_eq!(err.to_string(), "Oracle address not available");
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn panicking_symbol_task_fails_batch_without_caching() {
    let oracle = MockOracle::standard();
    oracle.panic_on("ETH");
    let feed = feed_with(&oracle);
    let target = target(&["BTC", "ETH"]);

    let err = feed.fetch(&target).await.unwrap_err();
    assert!(matches!(err, Error::TaskFailed(_)));
    assert!(feed.cache().is_empty());
}

#[tokio::test]
async fn default_target_reads_six_symbols() {
    let oracle = MockOracle::standard();
    let feed = feed_with(&oracle);

    let records = feed
        .fetch(&FeedTarget::new(Some(oracle_address()), None))
        .await
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(names, ["BTC", "DOT", "ETH", "SOL", "USDT", "USDC"]);
    assert_eq!(records.iter().filter(|r| r.is_live()).count(), 2);
}

#[tokio::test]
async fn custom_decimals_change_scale() {
    let oracle = MockOracle::standard();
    let reader: Arc<dyn oracle_watch::oracle::OracleReader> = oracle.clone();
    let feed = OracleFeed::new(Some(reader), Duration::from_secs(30)).with_decimals(6);

    let records = feed.fetch(&target(&["BTC"])).await.unwrap();
    assert_eq!(records[0].price, "6543210.0");
}
