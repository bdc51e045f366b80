//! Bitget market data integration

pub mod client;
pub mod symbols;

pub use client::BitgetClient;
pub use symbols::{instrument_id, normalize_symbol};
