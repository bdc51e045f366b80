//! Trend-following indicators

pub mod ema;
