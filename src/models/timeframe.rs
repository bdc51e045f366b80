//! Timeframes used by the three-stage evaluation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Candle timeframe. The scanner uses one per role: entry (15m),
/// bias (1h) and regime (4h) by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M15,
    H1,
    H4,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
        }
    }

    /// Granularity value expected by the Bitget candles endpoint.
    pub fn granularity(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1H",
            Timeframe::H4 => "4H",
        }
    }

    /// Bar duration in seconds.
    pub fn seconds(&self) -> u64 {
        match self {
            Timeframe::M15 => 900,
            Timeframe::H1 => 3_600,
            Timeframe::H4 => 14_400,
        }
    }

    /// How long a cached series for this timeframe stays fresh.
    ///
    /// Short for the entry timeframe, long for bias/regime, to bound
    /// request volume against the exchange.
    pub fn cache_ttl(&self) -> Duration {
        match self {
            Timeframe::M15 => Duration::from_secs(60),
            Timeframe::H1 => Duration::from_secs(55 * 60),
            Timeframe::H4 => Duration::from_secs(13_680),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "15m" => Ok(Timeframe::M15),
            "1h" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            other => Err(format!("unsupported timeframe: {}", other)),
        }
    }
}
