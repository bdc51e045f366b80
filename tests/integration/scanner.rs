//! Scan cycle driver tests with stubbed collaborators

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use perpscout::config::Config;
use perpscout::metrics::Metrics;
use perpscout::models::{Candle, Timeframe};
use perpscout::scanner::cache::CandleCache;
use perpscout::scanner::cooldown::CooldownTracker;
use perpscout::scanner::Scanner;
use perpscout::services::market_data::{MarketDataError, MarketDataProvider};
use perpscout::services::telegram::{Notifier, NotifyError};
use std::sync::Arc;
use tokio::sync::Mutex;

fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    let ts = Utc.timestamp_opt(1_700_000_000 + (i as i64) * 900, 0).unwrap();
    Candle::new(open, high, low, close, 1_000.0, ts)
}

fn uptrend(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 100.0 + i as f64 * 0.5;
            candle(i, close - 0.2, close + 0.3, close - 0.4, close)
        })
        .collect()
}

fn long_setup_entry(count: usize) -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..count - 1)
        .map(|i| candle(i, 100.0, 100.5, 99.5, 100.0))
        .collect();
    candles.push(candle(count - 1, 99.8, 100.35, 99.7, 100.2));
    candles
}

/// Serves a bullish setup for BTC and a hard failure for ETH.
struct StubProvider;

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        _limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        match symbol {
            "BTC/USDT:USDT" => Ok(match timeframe {
                Timeframe::M15 => long_setup_entry(260),
                _ => uptrend(220),
            }),
            _ => Err(MarketDataError::Status { status: 503 }),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.messages.lock().await.push(text.to_string());
        Ok(())
    }
}

fn test_config() -> Arc<Config> {
    // error symbols first: a failing symbol must not stop the cycle
    Arc::new(Config {
        symbols: vec![
            "ETHUSDT".to_string(),
            "BAD-SYMBOL".to_string(),
            "BTCUSDT".to_string(),
        ],
        ..Config::default()
    })
}

fn build_scanner(notifier: Arc<RecordingNotifier>) -> (Scanner, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new().expect("metrics"));
    let scanner = Scanner::new(
        test_config(),
        Arc::new(StubProvider),
        Some(notifier),
        CandleCache::new(),
        CooldownTracker::new(),
        metrics.clone(),
    );
    (scanner, metrics)
}

#[tokio::test]
async fn failing_symbols_do_not_abort_the_cycle() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (scanner, metrics) = build_scanner(notifier.clone());

    let summary = scanner.run_cycle().await;

    assert_eq!(summary.symbols_scanned, 3);
    assert_eq!(summary.errors, 2);
    assert_eq!(summary.signals_sent, 1);
    assert_eq!(metrics.symbol_errors_total.get(), 2);
    assert_eq!(metrics.signals_emitted_total.get(), 1);

    let messages = notifier.messages.lock().await;
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Pair: BTCUSDT"));
    assert!(messages[0].contains("Side: LONG"));
    assert!(messages[0].contains("Score: 70/100"));
}

#[tokio::test]
async fn cooldown_suppresses_repeat_alerts() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (scanner, metrics) = build_scanner(notifier.clone());

    let first = scanner.run_cycle().await;
    assert_eq!(first.signals_sent, 1);
    assert_eq!(first.signals_suppressed, 0);

    // same setup again inside the cooldown window
    let second = scanner.run_cycle().await;
    assert_eq!(second.signals_sent, 0);
    assert_eq!(second.signals_suppressed, 1);
    assert_eq!(metrics.signals_suppressed_total.get(), 1);

    let messages = notifier.messages.lock().await;
    assert_eq!(messages.len(), 1);
}

#[tokio::test]
async fn cycle_summary_reaches_the_health_handle() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (scanner, _metrics) = build_scanner(notifier);
    let handle = scanner.last_cycle();

    assert!(handle.read().await.is_none());
    let summary = scanner.run_cycle().await;
    {
        let mut last = handle.write().await;
        *last = Some(summary.clone());
    }
    let stored = handle.read().await;
    assert_eq!(stored.as_ref().unwrap().signals_sent, 1);
}
