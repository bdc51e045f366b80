//! Prometheus metrics for the scan loop

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub scan_cycles_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub signals_suppressed_total: IntCounter,
    pub symbol_errors_total: IntCounter,
    pub scan_cycle_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scan_cycles_total =
            IntCounter::new("scan_cycles_total", "Completed scan cycles")?;
        let signals_emitted_total = IntCounter::new(
            "signals_emitted_total",
            "Signals dispatched to the notification sink",
        )?;
        let signals_suppressed_total = IntCounter::new(
            "signals_suppressed_total",
            "Signals suppressed by the cooldown window",
        )?;
        let symbol_errors_total = IntCounter::new(
            "symbol_errors_total",
            "Per-symbol fetch/evaluation failures",
        )?;
        let scan_cycle_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "scan_cycle_duration_seconds",
            "Wall time of one full scan cycle",
        ))?;

        registry.register(Box::new(scan_cycles_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(signals_suppressed_total.clone()))?;
        registry.register(Box::new(symbol_errors_total.clone()))?;
        registry.register(Box::new(scan_cycle_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            scan_cycles_total,
            signals_emitted_total,
            signals_suppressed_total,
            symbol_errors_total,
            scan_cycle_duration_seconds,
        })
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics not utf-8: {}", e)))
    }
}
