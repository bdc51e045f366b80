//! Candle series cache with per-timeframe freshness windows

use crate::models::{Candle, Timeframe};
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::RwLock;

struct CacheEntry {
    fetched_at: Instant,
    candles: Vec<Candle>,
}

/// Cache keyed by `(symbol, timeframe)`. Each timeframe carries its own
/// TTL so the entry series refreshes every cycle while bias/regime data
/// is reused across cycles.
///
/// Constructed per scanner instance and injected, never held as ambient
/// global state.
#[derive(Default)]
pub struct CandleCache {
    entries: RwLock<HashMap<(String, Timeframe), CacheEntry>>,
}

impl CandleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, symbol: &str, timeframe: Timeframe) -> Option<Vec<Candle>> {
        self.get_at(symbol, timeframe, Instant::now()).await
    }

    /// Freshness check against an explicit clock, for tests.
    pub async fn get_at(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        now: Instant,
    ) -> Option<Vec<Candle>> {
        let entries = self.entries.read().await;
        let entry = entries.get(&(symbol.to_string(), timeframe))?;
        if now.duration_since(entry.fetched_at) < timeframe.cache_ttl() {
            Some(entry.candles.clone())
        } else {
            None
        }
    }

    pub async fn insert(&self, symbol: &str, timeframe: Timeframe, candles: Vec<Candle>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            (symbol.to_string(), timeframe),
            CacheEntry {
                fetched_at: Instant::now(),
                candles,
            },
        );
    }
}
