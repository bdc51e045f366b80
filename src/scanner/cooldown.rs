//! Per-(instrument, direction) alert cooldown

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Tracks the last dispatch time per `"{symbol}:{direction}"` key to
/// suppress repeat alerts inside the configured window.
///
/// Injected into the scanner so tests can construct fresh instances.
#[derive(Default)]
pub struct CooldownTracker {
    last_sent: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a dispatch for `key` is allowed. On `true`, the current
    /// time is recorded against `key` for future checks.
    pub async fn is_allowed(&self, key: &str, window_minutes: u64) -> bool {
        self.is_allowed_at(key, window_minutes, Utc::now()).await
    }

    /// Window check against an explicit clock, for tests.
    pub async fn is_allowed_at(
        &self,
        key: &str,
        window_minutes: u64,
        now: DateTime<Utc>,
    ) -> bool {
        let mut last_sent = self.last_sent.lock().await;
        if let Some(last) = last_sent.get(key) {
            if now - *last < Duration::minutes(window_minutes as i64) {
                return false;
            }
        }
        last_sent.insert(key.to_string(), now);
        true
    }
}
