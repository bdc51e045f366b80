//! Perpscout scanner process
//!
//! Wakes on the entry-timeframe candle close, scans every configured
//! symbol, and sends a Telegram alert when the signal engine accepts a
//! setup and the cooldown passes. Runs until interrupted.

use dotenvy::dotenv;
use perpscout::config::Config;
use perpscout::core::http::{start_server, AppState};
use perpscout::logging;
use perpscout::metrics::Metrics;
use perpscout::scanner::cache::CandleCache;
use perpscout::scanner::cooldown::CooldownTracker;
use perpscout::scanner::Scanner;
use perpscout::services::bitget::BitgetClient;
use perpscout::services::market_data::MarketDataProvider;
use perpscout::services::telegram::{Notifier, TelegramNotifier};
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Arc::new(Config::from_env()?);
    let env = perpscout::config::get_environment();

    info!("Starting Perpscout scanner");
    info!(environment = %env, "Environment");
    info!(
        symbols = config.symbols.len(),
        entry = %config.entry_tf,
        bias = %config.bias_tf,
        regime = %config.regime_tf,
        "Scanning {} symbols on candle close",
        config.symbols.len()
    );

    let metrics = Arc::new(Metrics::new()?);

    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(BitgetClient::new(config.fetch_retries));

    let notifier: Option<Arc<dyn Notifier>> = match &config.telegram {
        Some(tg) => {
            info!("Telegram notifier configured");
            Some(Arc::new(TelegramNotifier::new(tg)))
        }
        None => {
            warn!("TG_BOT_TOKEN/TG_CHAT_ID not set, signals will only be logged");
            None
        }
    };

    let scanner = Scanner::new(
        config.clone(),
        provider,
        notifier,
        CandleCache::new(),
        CooldownTracker::new(),
        metrics.clone(),
    );

    let state = AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
        last_cycle: scanner.last_cycle(),
    };
    let health_port = config.health_port;
    tokio::spawn(async move {
        if let Err(e) = start_server(health_port, state).await {
            error!(error = %e, "HTTP server exited");
        }
    });

    tokio::select! {
        _ = scanner.run() => {}
        _ = signal::ctrl_c() => {
            info!("Interrupt received, shutting down");
        }
    }

    Ok(())
}
