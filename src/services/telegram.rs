//! Telegram notification sink
//!
//! Fire-and-forget delivery: the scanner logs failures but never lets
//! them abort a scan.

use crate::config::TelegramConfig;
use crate::models::Signal;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("telegram returned HTTP {status}")]
    Status { status: u16 },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

pub struct TelegramNotifier {
    http: reqwest::Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        }
    }

    /// Point the notifier at a different host (used by the wiremock tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        let response = self
            .http
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "disable_web_page_preview": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Render a signal as the outgoing alert message.
pub fn format_signal(signal: &Signal, display_symbol: &str) -> String {
    format!(
        "Pair: {}\n\
         Side: {}\n\
         Entry: {:.4}\n\
         SL: {:.4}\n\
         TP1: {:.4} | TP2: {:.4}\n\
         RR: 1:{:.2} | Score: {}/100\n\
         Reason: {}\n\
         Invalidate: {}",
        display_symbol,
        signal.direction,
        signal.entry,
        signal.stop,
        signal.tp1,
        signal.tp2,
        signal.risk_reward,
        signal.score,
        signal.reason,
        signal.invalidate
    )
}
