//! Property-style tests for the gate pipeline

use chrono::{TimeZone, Utc};
use perpscout::config::StrategyParams;
use perpscout::models::{Candle, Direction};
use perpscout::signals::SignalEngine;

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

fn downtrend(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 300.0 - i as f64 * 0.5;
            candle(i, close + 0.2, close + 0.4, close - 0.3, close)
        })
        .collect()
}

/// Flat series ending in a green reclaim bar right at the fast EMA.
fn entry_with_long_setup(count: usize) -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..count - 1)
        .map(|i| candle(i, 100.0, 100.5, 99.5, 100.0))
        .collect();
    candles.push(candle(count - 1, 99.8, 100.35, 99.7, 100.2));
    candles
}

/// Flat series ending in a red rejection bar right at the fast EMA.
fn entry_with_short_setup(count: usize) -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..count - 1)
        .map(|i| candle(i, 100.0, 100.5, 99.5, 100.0))
        .collect();
    candles.push(candle(count - 1, 100.2, 100.3, 99.65, 99.8));
    candles
}

#[test]
fn rejects_any_short_series_without_evaluating() {
    let params = StrategyParams::default();
    let good_entry = entry_with_long_setup(260);
    let good_regime = uptrend(220);

    let short = uptrend(100);
    assert!(SignalEngine::evaluate(&short, &good_regime, &good_regime, "BTC/USDT:USDT", &params).is_none());
    assert!(SignalEngine::evaluate(&good_entry, &short, &good_regime, "BTC/USDT:USDT", &params).is_none());
    assert!(SignalEngine::evaluate(&good_entry, &good_regime, &short, "BTC/USDT:USDT", &params).is_none());
}

#[test]
fn alignment_gate_is_absolute() {
    let params = StrategyParams::default();
    let entry = entry_with_long_setup(260);

    // bull regime with short bias
    assert!(SignalEngine::evaluate(&entry, &downtrend(220), &uptrend(220), "BTC/USDT:USDT", &params).is_none());
    // bear regime with long bias
    assert!(SignalEngine::evaluate(&entry, &uptrend(220), &downtrend(220), "BTC/USDT:USDT", &params).is_none());
}

#[test]
fn accepted_long_has_ordered_risk_plan() {
    let params = StrategyParams::default();
    let signal = SignalEngine::evaluate(
        &entry_with_long_setup(260),
        &uptrend(220),
        &uptrend(220),
        "BTC/USDT:USDT",
        &params,
    )
    .expect("long setup should be accepted");

    assert_eq!(signal.direction, Direction::Long);
    assert!(signal.tp2 > signal.tp1);
    assert!(signal.tp1 > signal.entry);
    assert!(signal.entry > signal.stop);
    assert!(signal.risk_reward >= params.min_risk_reward);
    assert!(signal.score <= 100);
}

#[test]
fn accepted_short_has_ordered_risk_plan() {
    let params = StrategyParams::default();
    let signal = SignalEngine::evaluate(
        &entry_with_short_setup(260),
        &downtrend(220),
        &downtrend(220),
        "ETH/USDT:USDT",
        &params,
    )
    .expect("short setup should be accepted");

    assert_eq!(signal.direction, Direction::Short);
    assert!(signal.tp2 < signal.tp1);
    assert!(signal.tp1 < signal.entry);
    assert!(signal.entry < signal.stop);
    assert!(signal.risk_reward >= params.min_risk_reward);
}

#[test]
fn entry_price_is_latest_close() {
    let params = StrategyParams::default();
    let entry = entry_with_long_setup(260);
    let last_close = entry.last().unwrap().close;
    let signal =
        SignalEngine::evaluate(&entry, &uptrend(220), &uptrend(220), "BTC/USDT:USDT", &params)
            .unwrap();
    assert_eq!(signal.entry, last_close);
}

#[test]
fn full_pipeline_scores_seventy() {
    let params = StrategyParams::default();
    let signal = SignalEngine::evaluate(
        &entry_with_long_setup(260),
        &uptrend(220),
        &uptrend(220),
        "BTC/USDT:USDT",
        &params,
    )
    .unwrap();
    assert_eq!(signal.score, 70);
}

#[test]
fn evaluation_is_idempotent() {
    let params = StrategyParams::default();
    let entry = entry_with_long_setup(260);
    let bias = uptrend(220);
    let regime = uptrend(220);

    let first = SignalEngine::evaluate(&entry, &bias, &regime, "BTC/USDT:USDT", &params);
    let second = SignalEngine::evaluate(&entry, &bias, &regime, "BTC/USDT:USDT", &params);
    assert_eq!(first, second);
    assert!(first.is_some());
}

#[test]
fn min_candles_follows_slow_length() {
    let params = StrategyParams::default();
    assert_eq!(SignalEngine::min_candles(&params), params.ema_slow + 10);
}
