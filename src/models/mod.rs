//! Data models shared across the crate

pub mod candle;
pub mod signal;
pub mod timeframe;

pub use candle::Candle;
pub use signal::{Direction, Signal};
pub use timeframe::Timeframe;
