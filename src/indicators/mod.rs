//! Indicator library: causal transforms over candle series.
//!
//! Every indicator depends only on current and past candles, never
//! future ones.

pub mod trend;
pub mod volatility;
