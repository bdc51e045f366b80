//! External collaborators: market data source and notification sink

pub mod bitget;
pub mod market_data;
pub mod telegram;
