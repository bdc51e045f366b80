//! Multi-timeframe swing-signal scanner for USDT-m perpetual futures.
//!
//! The core is a pure signal engine ([`signals::SignalEngine`]) that
//! evaluates regime (4h), bias (1h) and entry (15m) candle series into an
//! accept/reject decision and, on accept, a fully parameterized trade
//! plan. Around it sit the Bitget market data client, a candle cache
//! with per-timeframe freshness, alert cooldown bookkeeping, the Telegram
//! notifier and a bar-close-aligned scan loop.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod scanner;
pub mod services;
pub mod signals;
