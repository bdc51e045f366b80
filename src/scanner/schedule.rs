//! Cadence alignment to candle close boundaries

use crate::models::Timeframe;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use tracing::info;

/// Delay until just after the next bar close for `timeframe`, with a
/// small randomized buffer to tolerate exchange finalization lag.
pub fn next_close_delay(timeframe: Timeframe, now: DateTime<Utc>) -> Duration {
    let period = timeframe.seconds();
    let elapsed = now.timestamp().rem_euclid(period as i64) as u64;
    let remaining = period - elapsed;
    let buffer = rand::thread_rng().gen_range(2..=5);
    Duration::from_secs((remaining + buffer).max(5))
}

pub async fn sleep_until_next_close(timeframe: Timeframe) {
    let delay = next_close_delay(timeframe, Utc::now());
    info!(
        timeframe = %timeframe,
        delay_secs = delay.as_secs(),
        "sleeping until next candle close"
    );
    tokio::time::sleep(delay).await;
}

/// Small random pause between per-symbol requests so a cycle does not
/// burst the exchange API.
pub async fn stagger() {
    let millis = rand::thread_rng().gen_range(400..=1_100);
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
