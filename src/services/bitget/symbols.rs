//! Symbol normalization between alias, canonical and exchange forms

use crate::services::market_data::MarketDataError;

/// Convert a compact alias (`BTCUSDT`) to canonical exchange-pair
/// notation (`BTC/USDT:USDT`). Canonical input passes through unchanged;
/// anything else is rejected.
pub fn normalize_symbol(raw: &str) -> Result<String, MarketDataError> {
    let s = raw.trim().to_ascii_uppercase();

    if s.contains('/') {
        return Ok(s);
    }

    if s.ends_with("USDT") && s.len() > 4 {
        let base = &s[..s.len() - 4];
        return Ok(format!("{}/USDT:USDT", base));
    }

    Err(MarketDataError::Symbol(raw.to_string()))
}

/// Exchange instrument id for a canonical symbol: `BTC/USDT:USDT` becomes
/// `BTCUSDT`.
pub fn instrument_id(symbol: &str) -> String {
    let pair = symbol.split(':').next().unwrap_or(symbol);
    pair.replace('/', "")
}
