//! Scan cycle driver
//!
//! Iterates the configured instrument set on a cadence aligned to the
//! entry timeframe's bar close: fetch (through the cache), evaluate,
//! cooldown-check, dispatch. A failure on one symbol never aborts the
//! rest of the cycle.

pub mod cache;
pub mod cooldown;
pub mod schedule;

use crate::config::Config;
use crate::metrics::Metrics;
use crate::models::{Candle, Signal, Timeframe};
use crate::services::bitget::normalize_symbol;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::services::telegram::{format_signal, Notifier};
use crate::signals::SignalEngine;
use cache::CandleCache;
use chrono::{DateTime, Utc};
use cooldown::CooldownTracker;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Outcome of one full pass over the instrument set, exposed through the
/// health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CycleSummary {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub symbols_scanned: usize,
    pub signals_sent: usize,
    pub signals_suppressed: usize,
    pub errors: usize,
}

/// What one symbol contributed to the cycle.
enum ScanOutcome {
    NoSignal,
    Suppressed,
    Sent(Signal),
}

pub struct Scanner {
    config: Arc<Config>,
    provider: Arc<dyn MarketDataProvider>,
    notifier: Option<Arc<dyn Notifier>>,
    cache: CandleCache,
    cooldown: CooldownTracker,
    metrics: Arc<Metrics>,
    last_cycle: Arc<RwLock<Option<CycleSummary>>>,
}

impl Scanner {
    pub fn new(
        config: Arc<Config>,
        provider: Arc<dyn MarketDataProvider>,
        notifier: Option<Arc<dyn Notifier>>,
        cache: CandleCache,
        cooldown: CooldownTracker,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            config,
            provider,
            notifier,
            cache,
            cooldown,
            metrics,
            last_cycle: Arc::new(RwLock::new(None)),
        }
    }

    /// Handle to the latest cycle summary, shared with the health server.
    pub fn last_cycle(&self) -> Arc<RwLock<Option<CycleSummary>>> {
        self.last_cycle.clone()
    }

    /// Run scan cycles forever, sleeping to the next entry-timeframe bar
    /// close between cycles. Terminates only with the process.
    pub async fn run(&self) {
        loop {
            let summary = self.run_cycle().await;
            info!(
                symbols = summary.symbols_scanned,
                sent = summary.signals_sent,
                suppressed = summary.signals_suppressed,
                errors = summary.errors,
                duration_ms = summary.duration_ms,
                "scan cycle complete"
            );
            {
                let mut last = self.last_cycle.write().await;
                *last = Some(summary);
            }
            schedule::sleep_until_next_close(self.config.entry_tf).await;
        }
    }

    /// One pass over every configured symbol.
    pub async fn run_cycle(&self) -> CycleSummary {
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut sent = 0;
        let mut suppressed = 0;
        let mut errors = 0;

        for (i, symbol) in self.config.symbols.iter().enumerate() {
            if i > 0 {
                schedule::stagger().await;
            }

            match self.scan_symbol(symbol).await {
                Ok(ScanOutcome::Sent(signal)) => {
                    sent += 1;
                    self.metrics.signals_emitted_total.inc();
                    info!(
                        symbol = %symbol,
                        direction = %signal.direction,
                        rr = format!("{:.2}", signal.risk_reward),
                        score = signal.score,
                        "signal sent"
                    );
                }
                Ok(ScanOutcome::Suppressed) => {
                    suppressed += 1;
                    self.metrics.signals_suppressed_total.inc();
                    info!(symbol = %symbol, "signal suppressed by cooldown");
                }
                Ok(ScanOutcome::NoSignal) => {
                    debug!(symbol = %symbol, "no signal");
                }
                Err(e) => {
                    errors += 1;
                    self.metrics.symbol_errors_total.inc();
                    warn!(symbol = %symbol, error = %e, "symbol scan failed");
                }
            }
        }

        let duration = clock.elapsed();
        self.metrics.scan_cycles_total.inc();
        self.metrics
            .scan_cycle_duration_seconds
            .observe(duration.as_secs_f64());

        CycleSummary {
            started_at,
            duration_ms: duration.as_millis() as u64,
            symbols_scanned: self.config.symbols.len(),
            signals_sent: sent,
            signals_suppressed: suppressed,
            errors,
        }
    }

    async fn scan_symbol(&self, raw_symbol: &str) -> Result<ScanOutcome, MarketDataError> {
        let symbol = normalize_symbol(raw_symbol)?;

        let entry = self.fetch_cached(&symbol, self.config.entry_tf).await?;
        let bias = self.fetch_cached(&symbol, self.config.bias_tf).await?;
        let regime = self.fetch_cached(&symbol, self.config.regime_tf).await?;

        let signal = match SignalEngine::evaluate(
            &entry,
            &bias,
            &regime,
            &symbol,
            &self.config.params,
        ) {
            Some(signal) => signal,
            None => return Ok(ScanOutcome::NoSignal),
        };

        let key = format!("{}:{}", raw_symbol, signal.direction);
        if !self
            .cooldown
            .is_allowed(&key, self.config.params.cooldown_minutes)
            .await
        {
            return Ok(ScanOutcome::Suppressed);
        }

        let message = format_signal(&signal, raw_symbol);
        match &self.notifier {
            Some(notifier) => {
                // Best-effort dispatch: a delivery failure is logged but
                // the signal still counts as handled.
                if let Err(e) = notifier.send(&message).await {
                    warn!(symbol = %raw_symbol, error = %e, "notification delivery failed");
                }
            }
            None => {
                info!(symbol = %raw_symbol, "notifier not configured, signal:\n{}", message);
            }
        }

        Ok(ScanOutcome::Sent(signal))
    }

    async fn fetch_cached(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>, MarketDataError> {
        if let Some(candles) = self.cache.get(symbol, timeframe).await {
            return Ok(candles);
        }

        let candles = self
            .provider
            .fetch_candles(symbol, timeframe, self.config.candle_limit)
            .await?;
        self.cache
            .insert(symbol, timeframe, candles.clone())
            .await;
        Ok(candles)
    }
}
