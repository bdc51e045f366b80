//! Market data provider interface and error taxonomy

use crate::models::{Candle, Timeframe};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("exchange returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed candle payload: {0}")]
    Malformed(String),

    #[error("unsupported symbol format: {0}")]
    Symbol(String),
}

impl MarketDataError {
    /// Whether the fetch layer should retry this failure with backoff.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Transport(e) => e.is_timeout() || e.is_connect(),
            MarketDataError::Status { status } => *status == 429 || *status >= 500,
            MarketDataError::Malformed(_) | MarketDataError::Symbol(_) => false,
        }
    }
}

/// Source of OHLCV candle series for an instrument/timeframe pair.
///
/// `symbol` is the canonical exchange-pair notation (`BASE/QUOTE:SETTLE`).
/// Implementations own their retry policy; exhausting retries surfaces an
/// error scoped to the one fetch.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}
