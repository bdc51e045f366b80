//! Entry-timeframe trigger candle classification
//!
//! Looks only at the two most-recently-closed bars against a reference
//! moving-average level.

use crate::models::Candle;

/// Bullish continuation/reclaim trigger.
///
/// The latest candle must close green, close at or above the moving
/// average (or reclaim it from below), and close at or above the previous
/// close.
pub fn bullish_trigger(candles: &[Candle], ma: f64) -> bool {
    let [prev, last] = match candles {
        [.., prev, last] => [prev, last],
        _ => return false,
    };

    let green = last.close > last.open;
    let closes_above = last.close >= ma;
    let reclaim = prev.close < ma && last.close > ma;
    let strength = last.close >= prev.close;

    green && (closes_above || reclaim) && strength
}

/// Bearish continuation/rejection trigger, symmetric to [`bullish_trigger`].
pub fn bearish_trigger(candles: &[Candle], ma: f64) -> bool {
    let [prev, last] = match candles {
        [.., prev, last] => [prev, last],
        _ => return false,
    };

    let red = last.close < last.open;
    let closes_below = last.close <= ma;
    let reject = prev.close > ma && last.close < ma;
    let strength = last.close <= prev.close;

    red && (closes_below || reject) && strength
}
