//! ATR (Average True Range) indicator

use crate::models::Candle;

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Calculate the ATR series, aligned one-to-one with the input candles.
///
/// The rolling mean of true range over `length` bars. The first bar has no
/// previous close and positions before a full window are undefined, so
/// indices `0..length` are `None`. Consumers must treat `None` (or a
/// non-positive value) as "not ready".
pub fn atr_series(candles: &[Candle], length: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if length == 0 || candles.len() <= length {
        return out;
    }

    // tr[j] is the true range of candle j + 1
    let mut tr = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        tr.push(true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }

    for (i, slot) in out.iter_mut().enumerate().skip(length) {
        let window = &tr[i - length..i];
        *slot = Some(window.iter().sum::<f64>() / length as f64);
    }

    out
}

/// ATR value at the latest index, if defined.
pub fn last_atr(candles: &[Candle], length: usize) -> Option<f64> {
    atr_series(candles, length).last().copied().flatten()
}
