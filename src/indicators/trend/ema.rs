//! EMA (Exponential Moving Average) indicator

/// Calculate the full EMA series for a slice of values.
///
/// Smoothing factor is `2 / (length + 1)`, seeded at the first value with
/// no warm-up correction, so every input index gets an output. Early
/// values are less reliable; callers gate on having enough history.
pub fn ema_series(values: &[f64], length: usize) -> Vec<f64> {
    if values.is_empty() || length == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (length as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = values[0];
    out.push(current);

    for &value in &values[1..] {
        current = alpha * value + (1.0 - alpha) * current;
        out.push(current);
    }

    out
}

/// EMA value at the latest index, if any.
pub fn last_ema(values: &[f64], length: usize) -> Option<f64> {
    ema_series(values, length).last().copied()
}
