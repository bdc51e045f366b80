//! Volatility indicators

pub mod atr;
